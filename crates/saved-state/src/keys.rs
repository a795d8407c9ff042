//! Storage key layout.
//!
//! | Key                     | Value                      |
//! |-------------------------|----------------------------|
//! | `user`                  | JSON `Identity`            |
//! | `bookmarks:{identity}`  | JSON array of internship ids |
//! | `favorites:{identity}`  | JSON array of internship ids |

use std::fmt;

/// Key holding the signed-in identity.
pub const USER_KEY: &str = "user";

/// The two per-identity id sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavedKind {
    Bookmarks,
    Favorites,
}

impl SavedKind {
    pub fn prefix(self) -> &'static str {
        match self {
            SavedKind::Bookmarks => "bookmarks",
            SavedKind::Favorites => "favorites",
        }
    }
}

impl fmt::Display for SavedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Scoped storage key for one identity's set, e.g. `bookmarks:user-1700000000000`.
pub fn storage_key(kind: SavedKind, identity_id: &str) -> String {
    format!("{}:{}", kind.prefix(), identity_id)
}
