//! The FilterPipeline chains the facet filters.
//!
//! This module provides the FilterPipeline builder and the `filter` entry
//! point used by the listing page.

use crate::filters::{
    CategoryFilter, LocationFilter, MinimumSalaryFilter, RemoteOnlyFilter, SearchTextFilter,
};
use crate::spec::FilterSpecification;
use crate::traits::Filter;
use catalog::InternshipRecord;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(SearchTextFilter)
///     .add_filter(MinimumSalaryFilter)
///     .add_filter(RemoteOnlyFilter);
///
/// let matching = pipeline.apply(catalog.records(), &spec);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The five search-form predicates in their usual order.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(SearchTextFilter)
            .add_filter(MinimumSalaryFilter)
            .add_filter(LocationFilter)
            .add_filter(CategoryFilter)
            .add_filter(RemoteOnlyFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the records.
    ///
    /// ## Algorithm
    /// 1. Start with every record, in catalog order
    /// 2. For each filter in order:
    ///    a. Skip it if the spec leaves it inactive
    ///    b. Otherwise narrow the working set, logging input/output counts
    /// 3. Stop early once nothing is left
    ///
    /// All predicates are conjunctive, so filter order changes only the
    /// amount of work, never the result. The result is a subsequence of
    /// `records`: nothing is reordered, duplicated or inserted.
    pub fn apply<'a>(
        &self,
        records: &'a [InternshipRecord],
        spec: &FilterSpecification,
    ) -> Vec<&'a InternshipRecord> {
        let mut current: Vec<&InternshipRecord> = records.iter().collect();
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            if !filter.is_active(spec) {
                continue;
            }
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, spec);
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Records of `catalog` matching every active predicate of `spec`.
///
/// Pure and deterministic. An empty catalog gives an empty result and the
/// default spec returns the whole catalog.
pub fn filter<'a>(
    catalog: &'a [InternshipRecord],
    spec: &FilterSpecification,
) -> Vec<&'a InternshipRecord> {
    FilterPipeline::standard().apply(catalog, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{posting, scenario_catalog};

    #[test]
    fn test_empty_pipeline() {
        let catalog = scenario_catalog();
        let spec = FilterSpecification {
            remote_only: true,
            ..Default::default()
        };

        let filtered = FilterPipeline::new().apply(&catalog, &spec);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_standard_pipeline_order() {
        let pipeline = FilterPipeline::standard();
        assert_eq!(
            pipeline.filter_names(),
            vec![
                "SearchTextFilter",
                "MinimumSalaryFilter",
                "LocationFilter",
                "CategoryFilter",
                "RemoteOnlyFilter",
            ]
        );
    }

    #[test]
    fn test_single_filter() {
        let catalog = scenario_catalog();
        let pipeline = FilterPipeline::new().add_filter(RemoteOnlyFilter);
        let spec = FilterSpecification {
            remote_only: true,
            ..Default::default()
        };

        let filtered = pipeline.apply(&catalog, &spec);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_salary_and_location_scenario() {
        let catalog = scenario_catalog();
        let spec = FilterSpecification {
            min_salary: 30,
            locations: ["Pune".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let ids: Vec<_> = filter(&catalog, &spec).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_empty_catalog() {
        let spec = FilterSpecification {
            search_text: "anything".to_string(),
            ..Default::default()
        };
        assert!(filter(&[], &spec).is_empty());
        assert!(filter(&[], &FilterSpecification::default()).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = vec![
            posting(1, 20, "Pune", "Design", false),
            posting(2, 25, "Delhi", "Design", false),
        ];
        let spec = FilterSpecification {
            remote_only: true,
            min_salary: 50,
            ..Default::default()
        };
        assert!(filter(&catalog, &spec).is_empty());
    }
}
