pub mod in_memory;
pub mod redis_queue;
