//! Error types for the catalog crate.
//!
//! Loading a catalog can fail on I/O, on malformed JSON, or on records that
//! break the catalog invariants (unique positive ids, salary text that agrees
//! with the numeric salary).

use thiserror::Error;

/// Errors that can occur while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog file is not valid JSON or does not match the record schema
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Ids must be positive
    #[error("Invalid internship id: {id}")]
    InvalidId { id: u32 },

    /// Two records share the same id
    #[error("Duplicate internship id: {id}")]
    DuplicateId { id: u32 },

    /// `salary_display` names a different amount than `salary_value`
    #[error("Inconsistent salary for internship {id}: display '{display}' but value {value}")]
    InconsistentSalary {
        id: u32,
        display: String,
        value: u32,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
