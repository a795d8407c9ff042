//! Filter for the minimum salary slider.

use crate::spec::FilterSpecification;
use crate::traits::Filter;
use catalog::InternshipRecord;

/// Removes records paying less than `spec.min_salary` per hour.
///
/// A threshold of `0` means "no threshold" and disables the filter.
pub struct MinimumSalaryFilter;

impl Filter for MinimumSalaryFilter {
    fn name(&self) -> &str {
        "MinimumSalaryFilter"
    }

    fn is_active(&self, spec: &FilterSpecification) -> bool {
        spec.min_salary > 0
    }

    fn matches(&self, record: &InternshipRecord, spec: &FilterSpecification) -> bool {
        record.salary_value >= spec.min_salary
    }
}
