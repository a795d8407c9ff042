//! Filter for the "Remote Only" checkbox.

use crate::spec::FilterSpecification;
use crate::traits::Filter;
use catalog::InternshipRecord;

/// When `spec.remote_only` is set, keeps only remote postings.
pub struct RemoteOnlyFilter;

impl Filter for RemoteOnlyFilter {
    fn name(&self) -> &str {
        "RemoteOnlyFilter"
    }

    fn is_active(&self, spec: &FilterSpecification) -> bool {
        spec.remote_only
    }

    fn matches(&self, record: &InternshipRecord, _spec: &FilterSpecification) -> bool {
        record.is_remote
    }
}
