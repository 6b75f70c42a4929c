use std::io;

use thiserror::Error;

use snip_core::remote::RemoteError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] snip_core::Error),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No snippet content provided")]
    EmptyContent,
    #[error("Snippet not found: {0}")]
    SnippetNotFound(i64),
    #[error("Tag not found: {0}")]
    TagNotFound(i64),
    #[error("Not signed in. Run `snip login` first.")]
    NotSignedIn,
}
