//! Filter for the multi-select category facet.

use crate::spec::FilterSpecification;
use crate::traits::Filter;
use catalog::InternshipRecord;

/// Keeps records whose category is one of the selected categories.
///
/// Same empty-selection rule as `LocationFilter`.
pub struct CategoryFilter;

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn is_active(&self, spec: &FilterSpecification) -> bool {
        !spec.categories.is_empty()
    }

    fn matches(&self, record: &InternshipRecord, spec: &FilterSpecification) -> bool {
        spec.categories.contains(&record.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::scenario_catalog;

    #[test]
    fn test_category_filter() {
        let catalog = scenario_catalog();
        let spec = FilterSpecification {
            categories: ["Design".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let filtered = CategoryFilter.apply(catalog.iter().collect(), &spec);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }
}
