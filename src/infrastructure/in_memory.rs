use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::errors::EnqueueError;
use crate::domain::ports::{QueueAck, QueueStore};

/// How the in-memory store answers calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    Healthy,
    /// Every call fails as if the connection was refused.
    Unavailable,
    /// Every call is refused as if credentials were wrong.
    Rejecting,
    /// Calls block for the given time, then succeed.
    Stalled(Duration),
}

/// A thread-safe in-memory queue store.
///
/// Clones share the same queues, so a test can keep one handle for
/// inspection and give another to the gateway.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueueStore {
    queues: Arc<Mutex<HashMap<String, VecDeque<Vec<u8>>>>>,
    mode: Arc<Mutex<FailureMode>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failure_mode(&self, mode: FailureMode) {
        *lock(&self.mode) = mode;
    }

    /// Entries of `queue`, head first.
    pub fn contents(&self, queue: &str) -> Vec<Vec<u8>> {
        lock(&self.queues)
            .get(queue)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, queue: &str) -> usize {
        lock(&self.queues).get(queue).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, queue: &str) -> bool {
        self.len(queue) == 0
    }

    fn check_mode(&self) -> Result<(), EnqueueError> {
        let mode = *lock(&self.mode);
        match mode {
            FailureMode::Healthy => Ok(()),
            FailureMode::Unavailable => Err(EnqueueError::StoreUnavailable(
                "connection refused".to_string(),
            )),
            FailureMode::Rejecting => Err(EnqueueError::StoreRejected(
                "NOAUTH Authentication required".to_string(),
            )),
            FailureMode::Stalled(delay) => {
                std::thread::sleep(delay);
                Ok(())
            }
        }
    }
}

// Mutations are single pushes; a poisoned lock still guards consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl QueueStore for InMemoryQueueStore {
    fn append(
        &self,
        queue: &str,
        payload: &[u8],
        _timeout: Duration,
    ) -> Result<QueueAck, EnqueueError> {
        self.check_mode()?;

        let mut queues = lock(&self.queues);
        let entries = queues.entry(queue.to_string()).or_default();
        entries.push_back(payload.to_vec());
        Ok(QueueAck {
            queue_length: entries.len() as u64,
        })
    }

    fn ping(&self, _timeout: Duration) -> Result<(), EnqueueError> {
        self.check_mode()
    }
}
