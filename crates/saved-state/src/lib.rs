//! # Saved-State Crate
//!
//! Per-user bookmark/favorite state and the mocked identity that scopes it.
//!
//! ## Components
//!
//! ### Storage
//! `KeyValueStorage` is the durable surface (string keys, string values).
//! `MemoryStorage` backs tests; `FileStorage` backs the CLI.
//!
//! ### Saved-State Store
//! `SavedStateStore` holds the bookmarked and favorited id sets of the bound
//! identity, writes every toggle straight through to storage under
//! `bookmarks:{id}` / `favorites:{id}`, and reloads on every identity change.
//!
//! ### Identity Provider
//! `IdentityProvider` is the stand-in for authentication: it validates the
//! mock credential rules, mints identities and keeps the `user` record.
//!
//! ## Example Usage
//!
//! ```ignore
//! use saved_state::{IdentityProvider, MemoryStorage, SavedStateStore};
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let mut auth = IdentityProvider::restore(storage.clone());
//! let mut store = SavedStateStore::new(storage.clone());
//!
//! let id = auth.login("priya@example.com", "secret1")?.id.clone();
//! store.bind(Some(&id));
//! store.toggle_bookmark(5)?;
//! assert!(store.is_bookmarked(5));
//! ```

pub mod error;
pub mod keys;
pub mod storage;
pub mod store;
pub mod identity;

// Re-export commonly used types
pub use error::{AuthError, Result, StorageError};
pub use identity::{Identity, IdentityProvider, MIN_PASSWORD_LEN, ProfileUpdate};
pub use keys::{SavedKind, USER_KEY, storage_key};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{Binding, SavedState, SavedStateStore, ToggleOutcome};
