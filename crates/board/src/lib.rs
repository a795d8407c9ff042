//! Board crate for the internship listing app.
//!
//! `InternshipBoard` wires the catalog, the filter engine, the identity
//! provider and the saved-state store together and exposes what the
//! presentation layer calls. Auth-gated calls answer with a `Navigation`
//! redirect instead of touching the store when nobody is signed in.

pub mod config;
pub mod error;
pub mod views;
pub mod board;

pub use board::InternshipBoard;
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use views::{Facets, InternshipDetail, Navigation, Routed, SavedItems};
