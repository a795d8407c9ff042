//! Filtering and faceted search over the internship catalog.
//!
//! This crate provides:
//! - `FilterSpecification` / `FilterUpdate`: the search form state and its
//!   partial updates (including query-string entry)
//! - `Filter` trait and one implementation per facet
//! - `FilterPipeline` for composing filters, and the `filter` entry point
//! - `selection`: seedable random picks for featured and similar listings
//!
//! ## Example Usage
//! ```ignore
//! use filter_engine::{filter, FilterSpecification, FilterUpdate};
//!
//! let mut spec = FilterSpecification::from_query_string("?category=Design");
//! spec.apply_update(FilterUpdate::new().with_min_salary(25));
//!
//! let matching = filter(catalog.records(), &spec);
//! println!("Found {} internships", matching.len());
//! ```

pub mod spec;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod selection;

// Re-export main types
pub use filter_pipeline::{FilterPipeline, filter};
pub use spec::{ActiveFilter, FilterSpecification, FilterUpdate, clamp_min_salary};
pub use traits::Filter;

#[cfg(test)]
pub(crate) mod test_fixtures {
    use catalog::{InternshipRecord, format_hourly_salary};
    use chrono::NaiveDate;

    pub fn posting(
        id: u32,
        salary_value: u32,
        location: &str,
        category: &str,
        is_remote: bool,
    ) -> InternshipRecord {
        InternshipRecord {
            id,
            title: format!("{} Intern", category),
            company: format!("Company {}", id),
            description: format!("A {} internship in {}", category, location),
            location: location.to_string(),
            category: category.to_string(),
            salary_display: format_hourly_salary(salary_value),
            salary_value,
            is_remote,
            posted_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            duration: None,
            requirements: Vec::new(),
        }
    }

    /// The two-record catalog used by the listing scenarios.
    pub fn scenario_catalog() -> Vec<InternshipRecord> {
        vec![
            posting(1, 20, "Pune", "Design", false),
            posting(2, 35, "Pune", "Engineering", true),
        ]
    }
}
