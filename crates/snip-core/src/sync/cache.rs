//! Entity containers: the durable local cache and the session entity store.

use serde::{Deserialize, Serialize};

use crate::models::{EntityId, Syncable};

/// Durable list of entities created while offline or awaiting submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalCache<E> {
    entries: Vec<E>,
}

impl<E> Default for LocalCache<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Syncable> LocalCache<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: E) {
        self.entries.push(entity);
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.iter().any(|entity| entity.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.entries.iter().find(|entity| entity.id() == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        let index = self.entries.iter().position(|entity| entity.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Remove the first entity materialized from the given payload
    pub fn remove_matching(&mut self, draft: &E::Draft) -> Option<E> {
        let index = self
            .entries
            .iter()
            .position(|entity| entity.matches_draft(draft))?;
        Some(self.entries.remove(index))
    }

    /// Identity of the first entity materialized from the given payload
    #[must_use]
    pub fn find_matching(&self, draft: &E::Draft) -> Option<EntityId> {
        self.entries
            .iter()
            .find(|entity| entity.matches_draft(draft))
            .map(Syncable::id)
    }

    /// Apply a mutation to an entity in place, returning the updated copy
    pub fn update(&mut self, id: EntityId, apply: impl FnOnce(&mut E)) -> Option<E> {
        let entity = self.entries.iter_mut().find(|entity| entity.id() == id)?;
        apply(entity);
        Some(entity.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
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

/// In-memory cache of synced entities for the current session.
///
/// Never persisted: its contents are scoped to the authenticated session
/// and must not leak into guest mode after sign-out.
#[derive(Debug, Clone)]
pub struct EntityStore<E> {
    entries: Vec<E>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Syncable> EntityStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, replacing any stale copy under the same id
    pub fn insert(&mut self, entity: E) {
        self.entries.retain(|existing| existing.id() != entity.id());
        self.entries.push(entity);
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.entries.iter().find(|entity| entity.id() == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        let index = self.entries.iter().position(|entity| entity.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Replace the entire contents with a fresh remote listing
    pub fn replace_all(&mut self, entities: Vec<E>) {
        self.entries = entities;
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
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
