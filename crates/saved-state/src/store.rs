//! Saved-State Store - per-identity bookmarks and favorites
//!
//! Owns two independent id sets for the bound identity and mirrors every
//! change to durable storage immediately.
//!
//! ## State machine
//! ```text
//!            bind(Some(a))              bind(Some(b))
//! Unbound ─────────────────▶ Bound(a) ─────────────────▶ Bound(b)
//!    ▲                          │                           │
//!    └──────── bind(None) ──────┴───────── bind(None) ──────┘
//! ```
//! - Every transition into `Bound` loads both sets from storage first
//! - `bind(None)` (logout) clears memory and writes nothing; storage keeps
//!   the sets for the next sign-in
//! - Toggles while `Unbound` are no-ops with zero writes

use crate::error::Result;
use crate::keys::{SavedKind, storage_key};
use crate::storage::KeyValueStorage;
use catalog::InternshipId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The two id sets of one identity.
///
/// An id may be in both sets, either, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedState {
    pub bookmarked_ids: HashSet<InternshipId>,
    pub favorited_ids: HashSet<InternshipId>,
}

impl SavedState {
    fn ids(&self, kind: SavedKind) -> &HashSet<InternshipId> {
        match kind {
            SavedKind::Bookmarks => &self.bookmarked_ids,
            SavedKind::Favorites => &self.favorited_ids,
        }
    }

    fn ids_mut(&mut self, kind: SavedKind) -> &mut HashSet<InternshipId> {
        match kind {
            SavedKind::Bookmarks => &mut self.bookmarked_ids,
            SavedKind::Favorites => &mut self.favorited_ids,
        }
    }
}

/// Which identity, if any, the store is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Unbound,
    Bound { identity_id: String },
}

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// No identity bound; nothing changed and nothing was written
    Unauthenticated,
}

/// Per-identity bookmark/favorite state with write-through persistence.
pub struct SavedStateStore {
    storage: Arc<dyn KeyValueStorage>,
    binding: Binding,
    state: SavedState,
}

impl SavedStateStore {
    /// Create an `Unbound` store over `storage`.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            binding: Binding::Unbound,
            state: SavedState::default(),
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Id of the bound identity, if any.
    pub fn identity_id(&self) -> Option<&str> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Bound { identity_id } => Some(identity_id),
        }
    }

    pub fn state(&self) -> &SavedState {
        &self.state
    }

    /// Read both saved sets of `identity_id` from storage.
    ///
    /// Missing or unparsable records load as empty sets; a corrupted record
    /// never blocks the caller.
    pub fn load_for(&self, identity_id: &str) -> SavedState {
        SavedState {
            bookmarked_ids: self.load_ids(SavedKind::Bookmarks, identity_id),
            favorited_ids: self.load_ids(SavedKind::Favorites, identity_id),
        }
    }

    fn load_ids(&self, kind: SavedKind, identity_id: &str) -> HashSet<InternshipId> {
        let key = storage_key(kind, identity_id);
        let stored = match self.storage.get_item(&key) {
            Ok(Some(text)) => text,
            Ok(None) => return HashSet::new(),
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return HashSet::new();
            }
        };
        match serde_json::from_str::<Vec<InternshipId>>(&stored) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!("Discarding unreadable {}: {}", key, e);
                HashSet::new()
            }
        }
    }

    /// React to an identity change.
    ///
    /// `Some(id)` binds (or rebinds) the store and loads that identity's
    /// sets; `None` unbinds and resets memory without touching storage.
    /// Rebinding the identity already bound is a no-op.
    #[instrument(skip(self))]
    pub fn bind(&mut self, identity_id: Option<&str>) {
        match identity_id {
            Some(id) if self.identity_id() == Some(id) => {
                debug!("Store already bound to {}", id);
            }
            Some(id) => {
                self.state = self.load_for(id);
                self.binding = Binding::Bound {
                    identity_id: id.to_string(),
                };
                info!(
                    "Bound saved state to {} ({} bookmarks, {} favorites)",
                    id,
                    self.state.bookmarked_ids.len(),
                    self.state.favorited_ids.len()
                );
            }
            None => {
                self.binding = Binding::Unbound;
                self.state = SavedState::default();
                info!("Saved state unbound");
            }
        }
    }

    /// Flip `internship_id` in the bookmark set and persist the set.
    pub fn toggle_bookmark(&mut self, internship_id: InternshipId) -> Result<ToggleOutcome> {
        self.toggle(SavedKind::Bookmarks, internship_id)
    }

    /// Flip `internship_id` in the favorite set and persist the set.
    pub fn toggle_favorite(&mut self, internship_id: InternshipId) -> Result<ToggleOutcome> {
        self.toggle(SavedKind::Favorites, internship_id)
    }

    /// Flip membership, then write the whole affected set once.
    ///
    /// If the write fails the flip is undone so memory keeps matching storage.
    fn toggle(&mut self, kind: SavedKind, internship_id: InternshipId) -> Result<ToggleOutcome> {
        let identity_id = match &self.binding {
            Binding::Unbound => {
                debug!("Ignoring {} toggle for {}: no identity bound", kind, internship_id);
                return Ok(ToggleOutcome::Unauthenticated);
            }
            Binding::Bound { identity_id } => identity_id.clone(),
        };

        let ids = self.state.ids_mut(kind);
        let outcome = if ids.remove(&internship_id) {
            ToggleOutcome::Removed
        } else {
            ids.insert(internship_id);
            ToggleOutcome::Added
        };

        if let Err(e) = self.persist(kind, &identity_id) {
            let ids = self.state.ids_mut(kind);
            match outcome {
                ToggleOutcome::Added => ids.remove(&internship_id),
                _ => ids.insert(internship_id),
            };
            return Err(e);
        }
        debug!("{} {:?} {} for {}", kind, outcome, internship_id, identity_id);
        Ok(outcome)
    }

    fn persist(&self, kind: SavedKind, identity_id: &str) -> Result<()> {
        let mut ids: Vec<InternshipId> = self.state.ids(kind).iter().copied().collect();
        ids.sort_unstable();
        let json = serde_json::to_string(&ids)?;
        self.storage.set_item(&storage_key(kind, identity_id), &json)
    }

    pub fn is_bookmarked(&self, internship_id: InternshipId) -> bool {
        self.state.bookmarked_ids.contains(&internship_id)
    }

    pub fn is_favorite(&self, internship_id: InternshipId) -> bool {
        self.state.favorited_ids.contains(&internship_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn create_test_store() -> (Arc<MemoryStorage>, SavedStateStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SavedStateStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_initial_state_is_unbound() {
        let (_, store) = create_test_store();
        assert_eq!(store.binding(), &Binding::Unbound);
        assert!(store.identity_id().is_none());
        assert!(!store.is_bookmarked(1));
    }

    #[test]
    fn test_toggle_is_self_inverse_with_two_writes() {
        let (storage, mut store) = create_test_store();
        store.bind(Some("u1"));
        let writes_before = storage.write_count();

        assert_eq!(store.toggle_bookmark(5).unwrap(), ToggleOutcome::Added);
        assert!(store.is_bookmarked(5));
        assert_eq!(store.toggle_bookmark(5).unwrap(), ToggleOutcome::Removed);
        assert!(!store.is_bookmarked(5));

        assert_eq!(storage.write_count() - writes_before, 2);
    }

    #[test]
    fn test_toggle_writes_full_sorted_set() {
        let (storage, mut store) = create_test_store();
        store.bind(Some("u1"));

        store.toggle_favorite(9).unwrap();
        store.toggle_favorite(3).unwrap();

        assert_eq!(
            storage.get_item("favorites:u1").unwrap().as_deref(),
            Some("[3,9]")
        );
        assert_eq!(storage.get_item("bookmarks:u1").unwrap(), None);
    }

    #[test]
    fn test_unbound_toggle_is_noop() {
        let (storage, mut store) = create_test_store();

        assert_eq!(
            store.toggle_favorite(7).unwrap(),
            ToggleOutcome::Unauthenticated
        );
        assert_eq!(
            store.toggle_bookmark(7).unwrap(),
            ToggleOutcome::Unauthenticated
        );

        assert!(!store.is_favorite(7));
        assert_eq!(store.state(), &SavedState::default());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_bookmarks_and_favorites_are_independent() {
        let (_, mut store) = create_test_store();
        store.bind(Some("u1"));

        store.toggle_bookmark(1).unwrap();
        store.toggle_favorite(2).unwrap();
        store.toggle_bookmark(3).unwrap();
        store.toggle_favorite(3).unwrap();

        assert!(store.is_bookmarked(1) && !store.is_favorite(1));
        assert!(!store.is_bookmarked(2) && store.is_favorite(2));
        assert!(store.is_bookmarked(3) && store.is_favorite(3));
    }

    #[test]
    fn test_identity_switch_isolation() {
        let (_, mut store) = create_test_store();

        store.bind(Some("alice"));
        store.toggle_bookmark(5).unwrap();
        assert!(store.is_bookmarked(5));

        store.bind(Some("bob"));
        assert!(!store.is_bookmarked(5));

        store.bind(Some("alice"));
        assert!(store.is_bookmarked(5));
    }

    #[test]
    fn test_logout_resets_memory_without_writes() {
        let (storage, mut store) = create_test_store();
        store.bind(Some("u1"));
        store.toggle_bookmark(4).unwrap();
        let writes = storage.write_count();

        store.bind(None);
        assert_eq!(store.binding(), &Binding::Unbound);
        assert!(!store.is_bookmarked(4));
        assert_eq!(storage.write_count(), writes);
        assert_eq!(storage.get_item("bookmarks:u1").unwrap().as_deref(), Some("[4]"));

        store.bind(Some("u1"));
        assert!(store.is_bookmarked(4));
    }

    #[test]
    fn test_corrupt_record_loads_empty() {
        let (storage, store) = create_test_store();
        storage.set_item("bookmarks:u1", "{not json").unwrap();
        storage.set_item("favorites:u1", "[2, 8]").unwrap();

        let state = store.load_for("u1");
        assert!(state.bookmarked_ids.is_empty());
        assert_eq!(state.favorited_ids, HashSet::from([2, 8]));
    }

    #[test]
    fn test_rebind_same_identity_keeps_state() {
        let (storage, mut store) = create_test_store();
        store.bind(Some("u1"));
        store.toggle_bookmark(1).unwrap();

        // Out-of-band change that a reload would pick up
        storage.set_item("bookmarks:u1", "[]").unwrap();
        store.bind(Some("u1"));

        assert!(store.is_bookmarked(1));
    }
}
