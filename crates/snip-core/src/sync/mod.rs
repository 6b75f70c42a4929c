//! Local/remote reconciliation engine.

mod cache;
mod queue;
mod scheduler;
mod status;
mod store;

pub use cache::{EntityStore, LocalCache};
pub use queue::{RetryQueue, RETRY_BATCH_SIZE};
pub use scheduler::{SyncScheduler, RETRY_INTERVAL};
pub use status::{SyncLedger, SyncStatus};
pub use store::SyncStore;
