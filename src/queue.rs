use r2d2::Pool;
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::config::AppConfig;
use crate::domain::ports::QueueStore;
use crate::errors::StartupError;
use crate::infrastructure::redis_queue::RedisQueueStore;

pub type QueuePool = Pool<Client>;

pub fn connection_info(config: &AppConfig) -> ConnectionInfo {
    let password = (!config.redis_password.is_empty()).then(|| config.redis_password.clone());
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port),
        redis: RedisConnectionInfo {
            db: 0,
            password,
            ..Default::default()
        },
    }
}

/// Build the shared connection pool without checking the store answers.
///
/// Checkouts skip r2d2's validity `PING`: a store refusing commands must
/// surface as that refusal on the append, not as a checkout timeout.
pub(crate) fn build_pool(config: &AppConfig) -> Result<QueuePool, StartupError> {
    let client = Client::open(connection_info(config))?;
    let pool = Pool::builder()
        .connection_timeout(config.enqueue_timeout)
        .test_on_check_out(false)
        .build(client)?;
    Ok(pool)
}

/// Build the shared connection pool and make sure the store accepts commands.
///
/// An unreachable store fails while opening the initial connections; bad or
/// missing credentials fail on the startup `PING`.
pub fn create_pool(config: &AppConfig) -> Result<QueuePool, StartupError> {
    let pool = build_pool(config)?;
    RedisQueueStore::new(pool.clone()).ping(config.enqueue_timeout)?;
    Ok(pool)
}
