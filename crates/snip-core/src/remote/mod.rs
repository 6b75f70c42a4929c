//! Remote Access Facade.
//!
//! The sync engine is generic over these traits; [`http`] provides the
//! production implementation against the snippet API. Beyond success or
//! failure and the returned entity, remote behavior is opaque to the engine.

mod http;

pub use http::{ApiClient, HttpSnippetRemote, HttpTagRemote};

use std::future::Future;

use thiserror::Error;

use crate::models::{EntityId, Syncable, Tag};

/// Failure classes reported by the remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Transient transport failure; always retryable
    #[error("Network error: {0}")]
    Network(String),

    /// Session expired or missing; forces re-authentication, never retried
    #[error("Unauthorized")]
    Unauthorized,

    /// Payload rejected by the remote; resubmission would fail identically
    #[error("Validation rejected: {0}")]
    Validation(String),

    /// Remote entity does not exist
    #[error("Not found")]
    NotFound,
}

impl RemoteError {
    /// Whether queueing the payload for a later retry can help
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Network create/read/delete for one entity kind.
pub trait RemoteStore<E: Syncable> {
    /// Create an entity from a payload; the result carries the canonical id
    fn create(&self, draft: &E::Draft) -> impl Future<Output = RemoteResult<E>>;

    /// Fetch a single entity by canonical id
    fn fetch(&self, id: EntityId) -> impl Future<Output = RemoteResult<E>>;

    /// List the current user's entities
    fn list(&self) -> impl Future<Output = RemoteResult<Vec<E>>>;

    /// Delete an entity by canonical id
    fn delete(&self, id: EntityId) -> impl Future<Output = RemoteResult<()>>;
}

/// Tag-specific remote operations.
pub trait TagRemote: RemoteStore<Tag> {
    /// Change a tag's visibility flag
    fn update_visibility(
        &self,
        id: EntityId,
        hidden: bool,
    ) -> impl Future<Output = RemoteResult<Tag>>;
}
