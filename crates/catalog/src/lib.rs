//! # Catalog Crate
//!
//! This crate loads and indexes the static internship catalog.
//!
//! ## Main Components
//!
//! - **types**: `InternshipRecord`, `Catalog`, salary helpers
//! - **parser**: Parse the JSON catalog file into records
//! - **index**: Build and validate the catalog, facet values and counts
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/internships.json"))?;
//!
//! let posting = catalog.get_internship(1).unwrap();
//! println!("{} at {} ({})", posting.title, posting.company, posting.salary_display);
//! ```
//!
//! The catalog is loaded once and shared read-only (`Arc<Catalog>`); no
//! component mutates it after loading.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::{FacetCounts, category_counts, location_counts};
pub use types::{
    Catalog, InternshipId, InternshipRecord, format_hourly_salary, parse_salary_display,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.locations().is_empty());
    }

    #[test]
    fn test_salary_display_helpers() {
        assert_eq!(format_hourly_salary(25), "$25/hr");
        assert_eq!(parse_salary_display("$25/hr"), Some(25));
        assert_eq!(parse_salary_display("USD 40 per hour"), Some(40));
        assert_eq!(parse_salary_display("Unpaid"), None);
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut catalog = Catalog::new();
        let posting = InternshipRecord {
            id: 1,
            title: "Old".to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            location: "Pune".to_string(),
            category: "Design".to_string(),
            salary_display: "$20/hr".to_string(),
            salary_value: 20,
            is_remote: false,
            posted_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration: None,
            requirements: Vec::new(),
        };
        catalog.insert_internship(posting.clone());
        catalog.insert_internship(InternshipRecord {
            title: "New".to_string(),
            ..posting
        });

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_internship(1).unwrap().title, "New");
    }
}
