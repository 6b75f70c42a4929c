//! Durable retry queue of creation payloads.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum payloads attempted per drain cycle.
pub const RETRY_BATCH_SIZE: usize = 10;

/// Ordered queue of payloads whose remote submission failed.
///
/// Holds drafts, never entities: identities only become meaningful once a
/// submission succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetryQueue<D> {
    items: VecDeque<D>,
}

impl<D> Default for RetryQueue<D> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<D> RetryQueue<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, draft: D) {
        self.items.push_back(draft);
    }

    /// Take up to `limit` of the oldest payloads, preserving their order
    pub fn take_batch(&mut self, limit: usize) -> Vec<D> {
        let count = limit.min(self.items.len());
        self.items.drain(..count).collect()
    }

    /// Re-append a failed payload behind the not-yet-attempted items
    pub fn requeue(&mut self, draft: D) {
        self.items.push_back(draft);
    }

    /// Put an aborted batch back at the front, preserving enqueue order
    pub fn restore(&mut self, drafts: Vec<D>) {
        for draft in drafts.into_iter().rev() {
            self.items.push_front(draft);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_take_batch_preserves_order_and_bound() {
        let mut queue = RetryQueue::new();
        for n in 0..25 {
            queue.push(n);
        }

        let batch = queue.take_batch(RETRY_BATCH_SIZE);
        assert_eq!(batch, (0..10).collect::<Vec<_>>());
        assert_eq!(queue.len(), 15);
    }

    #[test]
    fn test_requeue_goes_behind_untried_items() {
        let mut queue = RetryQueue::new();
        for n in 0..12 {
            queue.push(n);
        }

        let batch = queue.take_batch(RETRY_BATCH_SIZE);
        for failed in batch {
            queue.requeue(failed);
        }

        // 10 and 11 were never attempted and stay ahead of the retried batch
        let next = queue.take_batch(4);
        assert_eq!(next, vec![10, 11, 0, 1]);
        assert_eq!(queue.len(), 8);
    }

    #[test]
    fn test_restore_goes_ahead_of_remaining_items() {
        let mut queue = RetryQueue::new();
        for n in 0..12 {
            queue.push(n);
        }

        let batch = queue.take_batch(RETRY_BATCH_SIZE);
        queue.restore(batch);

        // the aborted batch stays ahead of 10 and 11
        assert_eq!(queue.take_batch(12), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_take_batch_on_short_queue() {
        let mut queue = RetryQueue::new();
        queue.push("only");
        let batch = queue.take_batch(RETRY_BATCH_SIZE);
        assert_eq!(batch, vec!["only"]);
        assert!(queue.is_empty());
    }
}
