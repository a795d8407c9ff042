use saved_state::{AuthError, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Saved state could not be written: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, BoardError>;
