//! Error types for snip-core

use thiserror::Error;

use crate::models::EntityId;
use crate::remote::RemoteError;

/// Result type alias using snip-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snip-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote API error
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity not found
    #[error("Entity not found: {0}")]
    NotFound(EntityId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
