use std::time::Duration;

use r2d2::PooledConnection;
use redis::{Client, ErrorKind, RedisError};

use crate::domain::errors::EnqueueError;
use crate::domain::ports::{QueueAck, QueueStore};
use crate::queue::QueuePool;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<r2d2::Error> for EnqueueError {
    fn from(e: r2d2::Error) -> Self {
        EnqueueError::StoreUnavailable(e.to_string())
    }
}

impl From<RedisError> for EnqueueError {
    fn from(e: RedisError) -> Self {
        if is_transient(&e) {
            EnqueueError::StoreUnavailable(e.to_string())
        } else {
            EnqueueError::StoreRejected(e.to_string())
        }
    }
}

/// Errors where the store never answered, or answered "not now".
/// Everything else is the store refusing the command.
fn is_transient(e: &RedisError) -> bool {
    e.is_io_error()
        || e.is_timeout()
        || e.is_connection_dropped()
        || e.is_connection_refusal()
        || matches!(
            e.kind(),
            ErrorKind::BusyLoadingError | ErrorKind::TryAgain | ErrorKind::ClusterDown
        )
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Redis list used as the sales queue. One `RPUSH` per append.
pub struct RedisQueueStore {
    pool: QueuePool,
}

impl RedisQueueStore {
    pub fn new(pool: QueuePool) -> Self {
        Self { pool }
    }

    /// A pooled connection whose checkout and socket I/O are bounded by `timeout`.
    fn checkout(&self, timeout: Duration) -> Result<PooledConnection<Client>, EnqueueError> {
        let conn = self.pool.get_timeout(timeout)?;
        conn.set_read_timeout(Some(timeout))?;
        conn.set_write_timeout(Some(timeout))?;
        Ok(conn)
    }
}

impl QueueStore for RedisQueueStore {
    fn append(
        &self,
        queue: &str,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<QueueAck, EnqueueError> {
        let mut conn = self.checkout(timeout)?;
        let queue_length: u64 = redis::cmd("RPUSH")
            .arg(queue)
            .arg(payload)
            .query(&mut *conn)?;
        Ok(QueueAck { queue_length })
    }

    fn ping(&self, timeout: Duration) -> Result<(), EnqueueError> {
        let mut conn = self.checkout(timeout)?;
        redis::cmd("PING").query::<String>(&mut *conn)?;
        Ok(())
    }
}
