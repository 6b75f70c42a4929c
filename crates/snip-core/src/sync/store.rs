//! The reconciliation engine.
//!
//! Routes every mutating operation between the durable local cache and the
//! remote authority, rebinds provisional identities onto canonical ones
//! after successful submissions, and drains the retry queue in bounded
//! batches.
//!
//! Mutations are optimistic and two-phase: phase one is synchronous, always
//! succeeds, and yields a provisional entity; phase two is asynchronous and
//! observable only through [`SyncStore::status`].
//!
//! Everything runs on one logical thread of control. Interior state lives in
//! `RefCell`s and no borrow is held across a suspension point; code running
//! after an await re-validates what it saw before (a provisional entity may
//! have been deleted while a request was in flight).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::{EntityId, ProvisionalIds, Syncable, Tag};
use crate::remote::{RemoteError, RemoteStore, TagRemote};
use crate::session::Session;
use crate::storage::{load_record, save_record, Storage};
use crate::sync::cache::{EntityStore, LocalCache};
use crate::sync::queue::{RetryQueue, RETRY_BATCH_SIZE};
use crate::sync::status::{SyncLedger, SyncStatus};

/// Offline-first store for one entity kind.
pub struct SyncStore<E: Syncable, R: RemoteStore<E>> {
    remote: R,
    session: Session,
    storage: Rc<dyn Storage>,
    local: RefCell<LocalCache<E>>,
    store: RefCell<EntityStore<E>>,
    ledger: RefCell<SyncLedger>,
    queue: RefCell<RetryQueue<E::Draft>>,
    ids: ProvisionalIds,
}

impl<E, R> SyncStore<E, R>
where
    E: Syncable,
    R: RemoteStore<E>,
{
    /// Open the store, restoring durable state from previous sessions
    pub fn open(remote: R, session: Session, storage: Rc<dyn Storage>) -> Result<Self> {
        let local = load_record(storage.as_ref(), &Self::local_record())?.unwrap_or_default();
        let ledger = load_record(storage.as_ref(), &Self::status_record())?.unwrap_or_default();
        let queue = load_record(storage.as_ref(), &Self::queue_record())?.unwrap_or_default();
        Ok(Self {
            remote,
            session,
            storage,
            local: RefCell::new(local),
            store: RefCell::new(EntityStore::new()),
            ledger: RefCell::new(ledger),
            queue: RefCell::new(queue),
            ids: ProvisionalIds::new(),
        })
    }

    fn local_record() -> String {
        format!("local-{}", E::KIND)
    }

    fn status_record() -> String {
        format!("{}-sync-status", E::KIND)
    }

    fn queue_record() -> String {
        format!("{}-sync-queue", E::KIND)
    }

    fn persist_local(&self) -> Result<()> {
        save_record(self.storage.as_ref(), &Self::local_record(), &*self.local.borrow())
    }

    fn persist_ledger(&self) -> Result<()> {
        save_record(self.storage.as_ref(), &Self::status_record(), &*self.ledger.borrow())
    }

    fn persist_queue(&self) -> Result<()> {
        save_record(self.storage.as_ref(), &Self::queue_record(), &*self.queue.borrow())
    }

    /// Create an entity.
    ///
    /// The entity is materialized locally first, so creation succeeds even
    /// with no connectivity. When authenticated, the payload is submitted
    /// in line: on success the canonical entity replaces the provisional
    /// one; on a transport failure the payload is queued for retry and the
    /// provisional entity is returned. Validation and authorization
    /// failures are surfaced and never queued.
    pub async fn create(&self, draft: E::Draft) -> Result<E> {
        let now = Utc::now();
        let user_id = self.session.current_user_id().unwrap_or(0);
        let provisional_id = self.ids.next(now);
        let provisional = E::from_draft(&draft, provisional_id, user_id, now);

        self.local.borrow_mut().push(provisional.clone());
        self.ledger.borrow_mut().set(provisional_id, SyncStatus::Local);
        self.persist_local()?;
        self.persist_ledger()?;

        if !self.session.is_authenticated() {
            return Ok(provisional);
        }

        match self.remote.create(&draft).await {
            Ok(canonical) => {
                // The provisional copy may have been deleted while the
                // request was in flight; rebind only what is still there.
                if self.local.borrow_mut().remove(provisional_id).is_some() {
                    self.ledger
                        .borrow_mut()
                        .rebind(provisional_id, canonical.id());
                } else {
                    self.ledger
                        .borrow_mut()
                        .set(canonical.id(), SyncStatus::Synced);
                }
                self.store.borrow_mut().insert(canonical.clone());
                self.persist_local()?;
                self.persist_ledger()?;
                Ok(canonical)
            }
            Err(error) if error.is_retryable() => {
                tracing::warn!(
                    kind = E::KIND,
                    error = %error,
                    "remote create failed, payload queued for retry"
                );
                self.queue.borrow_mut().push(draft);
                self.persist_queue()?;
                Ok(provisional)
            }
            Err(error) => {
                tracing::warn!(
                    kind = E::KIND,
                    error = %error,
                    "remote create rejected, payload not queued"
                );
                Err(error.into())
            }
        }
    }

    /// Look up an entity: local cache, then entity store, then the remote.
    ///
    /// Local copies are cheapest and freshest for entities that have not
    /// round-tripped yet; the remote fetch is the fallback of last resort.
    pub async fn get(&self, id: EntityId) -> Result<Option<E>> {
        if let Some(entity) = self.local.borrow().get(id).cloned() {
            return Ok(Some(entity));
        }
        if let Some(entity) = self.store.borrow().get(id).cloned() {
            return Ok(Some(entity));
        }
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        match self.remote.fetch(id).await {
            Ok(entity) => Ok(Some(entity)),
            Err(RemoteError::NotFound) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Delete an entity from whichever side currently holds it.
    ///
    /// Provisional entities never trigger a remote call: the remote
    /// authority has never observed their identity. For synced entities the
    /// delete is all-or-nothing; a remote failure leaves every store
    /// untouched and is surfaced to the caller.
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        if self.local.borrow().contains(id) {
            self.local.borrow_mut().remove(id);
            self.ledger.borrow_mut().remove(id);
            self.persist_local()?;
            self.persist_ledger()?;
            return Ok(());
        }

        if !self.session.is_authenticated() {
            return Err(Error::NotFound(id));
        }

        match self.remote.delete(id).await {
            // A remote NotFound means the entity already vanished
            // server-side; clean up the stale local view instead of failing.
            Ok(()) | Err(RemoteError::NotFound) => {
                self.store.borrow_mut().remove(id);
                self.ledger.borrow_mut().remove(id);
                self.persist_ledger()?;
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// All entities the current session may see.
    ///
    /// Guest mode only ever surfaces the local cache: the entity store is
    /// scoped to the authenticated session and must not leak after
    /// sign-out. No deduplication is needed, an identity lives in at most
    /// one of the two containers.
    #[must_use]
    pub fn visible(&self) -> Vec<E> {
        let mut entities: Vec<E> = Vec::new();
        if self.session.is_authenticated() {
            entities.extend(self.store.borrow().iter().cloned());
        }
        entities.extend(self.local.borrow().iter().cloned());
        entities
    }

    /// Reconciliation state for one identity, for UI badges
    #[must_use]
    pub fn status(&self, id: EntityId) -> Option<SyncStatus> {
        self.ledger.borrow().status(id)
    }

    /// Number of payloads waiting for a retry cycle
    #[must_use]
    pub fn pending_retries(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Replace the session entity store with the remote listing.
    ///
    /// Every fetched entity is marked synced. A no-op in guest mode.
    pub async fn refresh(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            return Ok(());
        }

        let entities = self.remote.list().await?;
        {
            let mut ledger = self.ledger.borrow_mut();
            for entity in &entities {
                ledger.set(entity.id(), SyncStatus::Synced);
            }
        }
        self.store.borrow_mut().replace_all(entities);
        self.persist_ledger()?;
        Ok(())
    }

    /// Replay queued creation payloads against the remote.
    ///
    /// Attempts at most [`RETRY_BATCH_SIZE`] of the oldest payloads, in
    /// enqueue order, each at most once per cycle. A success rebinds onto
    /// the matching still-local entity when one exists (it may have been
    /// deleted in the interim). A transient failure goes back behind the
    /// untried remainder of the queue and promotes the matching local
    /// entity to pending. Returns the number of payloads synced.
    pub async fn drain_retry_queue(&self) -> Result<usize> {
        if !self.session.is_authenticated() || self.queue.borrow().is_empty() {
            return Ok(0);
        }

        let mut batch: VecDeque<E::Draft> =
            self.queue.borrow_mut().take_batch(RETRY_BATCH_SIZE).into();
        let mut synced = 0usize;

        while let Some(draft) = batch.pop_front() {
            match self.remote.create(&draft).await {
                Ok(canonical) => {
                    if let Some(provisional) = self.local.borrow_mut().remove_matching(&draft) {
                        self.ledger
                            .borrow_mut()
                            .rebind(provisional.id(), canonical.id());
                    } else {
                        // Deleted locally while queued; keep the canonical copy.
                        self.ledger
                            .borrow_mut()
                            .set(canonical.id(), SyncStatus::Synced);
                    }
                    self.store.borrow_mut().insert(canonical);
                    synced += 1;
                }
                Err(RemoteError::Unauthorized) => {
                    tracing::warn!(
                        kind = E::KIND,
                        "session expired during retry drain, cycle aborted"
                    );
                    // Back to the front of the queue, ahead of any payloads
                    // this cycle never took, so enqueue order is preserved.
                    let mut aborted = vec![draft];
                    aborted.extend(batch.drain(..));
                    self.queue.borrow_mut().restore(aborted);
                    break;
                }
                Err(RemoteError::Validation(message)) => {
                    tracing::warn!(
                        kind = E::KIND,
                        %message,
                        "payload rejected by remote, dropped from retry queue"
                    );
                }
                Err(error) => {
                    tracing::debug!(kind = E::KIND, error = %error, "retry failed, payload requeued");
                    if let Some(id) = self.local.borrow().find_matching(&draft) {
                        self.ledger.borrow_mut().set(id, SyncStatus::Pending);
                    }
                    self.queue.borrow_mut().requeue(draft);
                }
            }
        }

        self.persist_local()?;
        self.persist_ledger()?;
        self.persist_queue()?;
        Ok(synced)
    }
}

impl<R: TagRemote> SyncStore<Tag, R> {
    /// Change a tag's visibility wherever the tag currently lives.
    ///
    /// Local tags mutate in place; synced tags round-trip through the
    /// remote and the returned copy replaces the cached one. Remote
    /// failures are surfaced.
    pub async fn set_hidden(&self, id: EntityId, hidden: bool) -> Result<Tag> {
        if self.local.borrow().contains(id) {
            let updated = self.local.borrow_mut().update(id, |tag| tag.is_hidden = hidden);
            self.persist_local()?;
            return updated.ok_or(Error::NotFound(id));
        }

        if !self.session.is_authenticated() {
            return Err(Error::NotFound(id));
        }

        let updated = self.remote.update_visibility(id, hidden).await?;
        self.store.borrow_mut().insert(updated.clone());
        Ok(updated)
    }
}
