use std::sync::Arc;

use dotenvy::dotenv;
use sale_queue_service::errors::StartupError;
use sale_queue_service::infrastructure::redis_queue::RedisQueueStore;
use sale_queue_service::{build_server, create_pool, AppConfig, EnqueueGateway};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    run().await.inspect_err(|e| log::error!("Startup failed: {}", e))
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    log::info!(
        "Queue store {}:{}, queue '{}', enqueue timeout {} ms",
        config.redis_host,
        config.redis_port,
        config.queue_name,
        config.enqueue_timeout.as_millis()
    );

    let pool = create_pool(&config)?;
    let gateway = EnqueueGateway::new(
        Arc::new(RedisQueueStore::new(pool)),
        config.queue_name.clone(),
        config.enqueue_timeout,
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    build_server(gateway, &config.host, config.port)?.await?;

    log::info!("Shutting down");
    Ok(())
}
