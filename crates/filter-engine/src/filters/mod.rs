//! Filter implementations for the search form.
//!
//! One module per facet; the standard pipeline chains all five.

pub mod search_text;
pub mod minimum_salary;
pub mod location;
pub mod category;
pub mod remote_only;

// Re-export for convenience
pub use search_text::SearchTextFilter;
pub use minimum_salary::MinimumSalaryFilter;
pub use location::LocationFilter;
pub use category::CategoryFilter;
pub use remote_only::RemoteOnlyFilter;
