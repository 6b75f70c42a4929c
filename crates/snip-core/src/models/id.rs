//! Entity identity and provisional id generation

use std::cell::Cell;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a snippet or tag.
///
/// Two regimes share this type: provisional ids are generated client-side
/// from the creation instant and only mean something to this session, while
/// canonical ids are assigned by the remote authority on successful creation
/// and are authoritative thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wrap a raw identity value
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw identity value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps width and alignment flags working for column output
        f.pad(&self.0.to_string())
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Generator for provisional ids.
///
/// Ids are derived from the wall clock in milliseconds and bumped past the
/// previously issued value, so two entities created within the same
/// millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct ProvisionalIds {
    last: Cell<i64>,
}

impl ProvisionalIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next provisional id for the given instant
    pub fn next(&self, now: DateTime<Utc>) -> EntityId {
        let id = now.timestamp_millis().max(self.last.get() + 1);
        self.last.set(id);
        EntityId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_parse() {
        let id: EntityId = "1700000000000".parse().unwrap();
        assert_eq!(id.get(), 1_700_000_000_000);
        assert_eq!(id.to_string(), "1700000000000");
    }

    #[test]
    fn test_entity_id_display_honors_width() {
        let id = EntityId::new(42);
        assert_eq!(format!("{id:<6}|"), "42    |");
        assert_eq!(format!("{id:>6}|"), "    42|");
    }

    #[test]
    fn test_provisional_ids_unique_within_same_instant() {
        let ids = ProvisionalIds::new();
        let now = Utc::now();
        let first = ids.next(now);
        let second = ids.next(now);
        let third = ids.next(now);
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_provisional_ids_follow_clock() {
        let ids = ProvisionalIds::new();
        let now = Utc::now();
        let id = ids.next(now);
        assert_eq!(id.get(), now.timestamp_millis());
    }
}
