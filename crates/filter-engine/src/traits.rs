//! Core trait for the filter pipeline.
//!
//! Each facet of the search form (text, salary, location, category, remote)
//! is one `Filter`, so predicates stay independently testable and the
//! pipeline can be composed with the builder pattern.

use crate::spec::FilterSpecification;
use catalog::InternshipRecord;

/// A single predicate over internship records.
///
/// ## Design Note
/// - `Send + Sync` lets a pipeline be shared behind an `Arc`
/// - Filters take ownership of the working set and return the narrowed set;
///   the records themselves are borrowed from the catalog, never cloned
/// - Filters never reorder the working set
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether this predicate restricts anything under `spec`.
    ///
    /// Inactive filters are skipped by the pipeline.
    fn is_active(&self, spec: &FilterSpecification) -> bool;

    /// Whether `record` passes this predicate under `spec`.
    fn matches(&self, record: &InternshipRecord, spec: &FilterSpecification) -> bool;

    /// Narrow the working set to the records that match.
    fn apply<'a>(
        &self,
        mut records: Vec<&'a InternshipRecord>,
        spec: &FilterSpecification,
    ) -> Vec<&'a InternshipRecord> {
        records.retain(|record| self.matches(record, spec));
        records
    }
}
