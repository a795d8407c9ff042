//! Error types for the saved-state crate.

use thiserror::Error;

/// Failures of the durable key/value surface.
///
/// Corrupt *values* are not errors: the store treats an unparsable record as
/// "nothing saved". These variants cover the storage itself misbehaving.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize storage contents: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous writer panicked while holding the storage lock
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Rejections from the mocked sign-in flow.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please enter email and password.")]
    MissingCredentials,

    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    #[error("No user is signed in")]
    NotSignedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenience type alias for storage Results
pub type Result<T> = std::result::Result<T, StorageError>;
