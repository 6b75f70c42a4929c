//! Entity models shared by the sync engine

mod id;
mod snippet;
mod tag;

pub use id::{EntityId, ProvisionalIds};
pub use snippet::{Snippet, SnippetDraft};
pub use tag::{Tag, TagDraft};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity kind the reconciliation engine can manage.
pub trait Syncable: Clone + Serialize + DeserializeOwned + 'static {
    /// Creation payload carrying no identity.
    type Draft: Clone + PartialEq + Serialize + DeserializeOwned + 'static;

    /// Prefix for this kind's durable storage records.
    const KIND: &'static str;

    /// The entity's current identity (provisional or canonical)
    fn id(&self) -> EntityId;

    /// Materialize a provisional entity from a creation payload
    fn from_draft(draft: &Self::Draft, id: EntityId, user_id: i64, now: DateTime<Utc>) -> Self;

    /// Whether this entity was materialized from the given payload.
    ///
    /// Used for identity rebinding after a queued retry succeeds. The match
    /// key is deliberately weak (title+content for snippets, name for tags):
    /// two local entities with identical content rebind to the first found.
    fn matches_draft(&self, draft: &Self::Draft) -> bool;
}
