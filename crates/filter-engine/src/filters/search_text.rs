//! Free-text search over title, company and description.

use crate::spec::FilterSpecification;
use crate::traits::Filter;
use catalog::InternshipRecord;

/// Keeps records whose title, company or description contains the search
/// text, ignoring case.
///
/// ## Algorithm
/// 1. Lower-case the query once per pass
/// 2. Lower-case each searched field and test for a substring match
/// 3. Keep the record if any of the three fields matches
pub struct SearchTextFilter;

impl SearchTextFilter {
    fn matches_lowered(record: &InternshipRecord, query: &str) -> bool {
        [&record.title, &record.company, &record.description]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }
}

impl Filter for SearchTextFilter {
    fn name(&self) -> &str {
        "SearchTextFilter"
    }

    fn is_active(&self, spec: &FilterSpecification) -> bool {
        !spec.search_text.is_empty()
    }

    fn matches(&self, record: &InternshipRecord, spec: &FilterSpecification) -> bool {
        Self::matches_lowered(record, &spec.search_text.to_lowercase())
    }

    fn apply<'a>(
        &self,
        mut records: Vec<&'a InternshipRecord>,
        spec: &FilterSpecification,
    ) -> Vec<&'a InternshipRecord> {
        let query = spec.search_text.to_lowercase();
        records.retain(|record| Self::matches_lowered(record, &query));
        records
    }
}
