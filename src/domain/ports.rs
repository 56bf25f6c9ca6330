use std::sync::Arc;
use std::time::Duration;

use super::errors::EnqueueError;

/// Store acknowledgment of a durable append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueAck {
    /// Length of the queue right after the append, as reported by the store.
    pub queue_length: u64,
}

/// A FIFO list store. Only append-to-tail is relied on.
///
/// Implementations are shared by every in-flight request and must be safe for
/// concurrent use. Calls may block; callers run them off the async executor.
/// `timeout` bounds the whole call, including waiting for a connection.
pub trait QueueStore: Send + Sync + 'static {
    /// Append `payload` to the tail of `queue` in a single atomic operation.
    fn append(
        &self,
        queue: &str,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<QueueAck, EnqueueError>;

    /// Round trip to the store without touching any queue.
    fn ping(&self, timeout: Duration) -> Result<(), EnqueueError>;
}

pub type SharedQueueStore = Arc<dyn QueueStore>;
