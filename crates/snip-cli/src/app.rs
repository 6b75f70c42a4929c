//! Wiring of storage, session, and the two sync stores.

use std::path::Path;
use std::rc::Rc;

use snip_core::remote::{ApiClient, HttpSnippetRemote, HttpTagRemote};
use snip_core::storage::{JsonFileStorage, Storage};
use snip_core::{Session, Snippet, SyncStore, Tag};

use crate::error::CliError;

pub type SnippetStore = SyncStore<Snippet, HttpSnippetRemote>;
pub type TagStore = SyncStore<Tag, HttpTagRemote>;

/// One CLI invocation's view of the world.
///
/// Both stores share one storage root and one session handle, so a sign-in
/// through the session is observed by every remote call that follows.
pub struct App {
    pub storage: Rc<dyn Storage>,
    pub session: Session,
    pub snippets: SnippetStore,
    pub tags: TagStore,
}

impl App {
    pub fn open(data_dir: &Path, api_url: &str) -> Result<Self, CliError> {
        let storage: Rc<dyn Storage> = Rc::new(JsonFileStorage::open(data_dir)?);
        let session = Session::restore(storage.as_ref())?;
        let api = ApiClient::new(api_url, session.clone())?;

        let snippets = SyncStore::open(
            HttpSnippetRemote::new(api.clone()),
            session.clone(),
            Rc::clone(&storage),
        )?;
        let tags = SyncStore::open(HttpTagRemote::new(api), session.clone(), Rc::clone(&storage))?;

        Ok(Self {
            storage,
            session,
            snippets,
            tags,
        })
    }
}
