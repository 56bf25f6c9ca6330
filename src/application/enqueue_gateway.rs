use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::EnqueueError;
use crate::domain::ports::{QueueAck, QueueStore, SharedQueueStore};
use crate::domain::sale::Sale;
use crate::wire;

/// Proof that the store accepted an append.
///
/// `receipt_id` correlates logs and responses only. It is not stored with the
/// payload and does not deduplicate anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueReceipt {
    pub receipt_id: Uuid,
    pub queue: String,
    pub queue_length: u64,
    pub accepted_at: DateTime<Utc>,
}

/// Serializes validated sales and appends them to one named queue.
///
/// Built once at startup around the shared store handle; cheap to clone.
/// Each call performs at most one append and never retries.
#[derive(Clone)]
pub struct EnqueueGateway {
    store: SharedQueueStore,
    queue: String,
    deadline: Duration,
}

impl EnqueueGateway {
    pub fn new(store: SharedQueueStore, queue: impl Into<String>, deadline: Duration) -> Self {
        Self {
            store,
            queue: queue.into(),
            deadline,
        }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Append `sale` using the default deadline.
    pub async fn enqueue(&self, sale: &Sale) -> Result<EnqueueReceipt, EnqueueError> {
        self.enqueue_within(sale, self.deadline).await
    }

    /// Append `sale`, giving up with `StoreUnavailable` once `deadline` passes.
    ///
    /// The deadline also bounds the store call itself (connection checkout and
    /// socket reads), so a longer deadline than the default is honored too.
    /// On expiry the append may still land; the caller sees an unknown outcome.
    pub async fn enqueue_within(
        &self,
        sale: &Sale,
        deadline: Duration,
    ) -> Result<EnqueueReceipt, EnqueueError> {
        let payload =
            wire::encode_sale(sale).map_err(|e| EnqueueError::StoreRejected(e.to_string()))?;

        let queue = self.queue.clone();
        let ack = self
            .run_blocking(deadline, move |store| store.append(&queue, &payload, deadline))
            .await?;

        Ok(self.receipt(ack))
    }

    /// Ping the store within the default deadline.
    pub async fn health(&self) -> Result<(), EnqueueError> {
        let deadline = self.deadline;
        self.run_blocking(deadline, move |store| store.ping(deadline)).await
    }

    fn receipt(&self, ack: QueueAck) -> EnqueueReceipt {
        EnqueueReceipt {
            receipt_id: Uuid::new_v4(),
            queue: self.queue.clone(),
            queue_length: ack.queue_length,
            accepted_at: Utc::now(),
        }
    }

    /// Run a store call on the blocking pool, bounded by `deadline`.
    async fn run_blocking<T, F>(&self, deadline: Duration, call: F) -> Result<T, EnqueueError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn QueueStore) -> Result<T, EnqueueError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let task = tokio::task::spawn_blocking(move || call(store.as_ref()));

        match tokio::time::timeout(deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(EnqueueError::StoreUnavailable(format!(
                "store call did not complete: {}",
                e
            ))),
            Err(_) => Err(EnqueueError::StoreUnavailable(format!(
                "no acknowledgment within {} ms",
                deadline.as_millis()
            ))),
        }
    }
}
