pub mod auth;
pub mod snippets;
pub mod sync;
pub mod tags;

use snip_core::sync::SyncStatus;

/// Badge text for a possibly unknown sync status
fn status_badge(status: Option<SyncStatus>) -> &'static str {
    status.map_or("Unknown", SyncStatus::badge)
}
