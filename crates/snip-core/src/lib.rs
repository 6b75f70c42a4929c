//! snip-core - Core library for Snip
//!
//! Offline-first models, durable caches, and the local/remote
//! reconciliation engine shared by all Snip interfaces.
//!
//! All engine state lives on one logical thread of control: stores hand out
//! `Rc` handles, suspend only at remote-call boundaries, and need no
//! locking.

pub mod error;
pub mod models;
pub mod remote;
pub mod session;
pub mod storage;
pub mod sync;

pub use error::{Error, Result};
pub use models::{EntityId, Snippet, SnippetDraft, Syncable, Tag, TagDraft};
pub use session::{AuthUser, Session};
pub use sync::{SyncStatus, SyncStore};
