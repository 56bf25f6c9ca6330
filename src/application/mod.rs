pub mod enqueue_gateway;
