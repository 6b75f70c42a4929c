//! Sync status ledger.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EntityId;

/// Reconciliation state of one entity identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Exists only in the local cache; never successfully submitted
    Local,
    /// A submission attempt failed; the payload sits in the retry queue
    Pending,
    /// Mirrors remote state under its canonical id
    Synced,
}

impl SyncStatus {
    /// Badge text for display next to an entity
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Local => "Local Storage",
            Self::Pending => "Pending Upload",
            Self::Synced => "Uploaded",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Local => "local",
            Self::Pending => "pending",
            Self::Synced => "synced",
        };
        write!(f, "{label}")
    }
}

/// Durable mapping from entity identity to its reconciliation state.
///
/// At most one entry exists per identity: rebinding removes the provisional
/// entry in the same step that inserts the canonical one, so a logical
/// entity is never dual-booked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncLedger {
    entries: HashMap<EntityId, SyncStatus>,
}

impl SyncLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self, id: EntityId) -> Option<SyncStatus> {
        self.entries.get(&id).copied()
    }

    pub fn set(&mut self, id: EntityId, status: SyncStatus) {
        self.entries.insert(id, status);
    }

    pub fn remove(&mut self, id: EntityId) {
        self.entries.remove(&id);
    }

    /// Move an identity's entry from provisional to canonical in one step
    pub fn rebind(&mut self, provisional: EntityId, canonical: EntityId) {
        self.entries.remove(&provisional);
        self.entries.insert(canonical, SyncStatus::Synced);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_set_and_remove() {
        let mut ledger = SyncLedger::new();
        let id = EntityId::new(1);
        ledger.set(id, SyncStatus::Local);
        assert_eq!(ledger.status(id), Some(SyncStatus::Local));

        ledger.remove(id);
        assert_eq!(ledger.status(id), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rebind_leaves_single_entry() {
        let mut ledger = SyncLedger::new();
        let provisional = EntityId::new(1_700_000_000_000);
        let canonical = EntityId::new(42);
        ledger.set(provisional, SyncStatus::Local);

        ledger.rebind(provisional, canonical);
        assert_eq!(ledger.status(provisional), None);
        assert_eq!(ledger.status(canonical), Some(SyncStatus::Synced));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_serde_roundtrip_with_integer_keys() {
        let mut ledger = SyncLedger::new();
        ledger.set(EntityId::new(5), SyncStatus::Pending);
        ledger.set(EntityId::new(9), SyncStatus::Synced);

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: SyncLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.status(EntityId::new(5)), Some(SyncStatus::Pending));
        assert_eq!(restored.status(EntityId::new(9)), Some(SyncStatus::Synced));
    }
}
