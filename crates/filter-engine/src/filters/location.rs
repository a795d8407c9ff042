//! Filter for the multi-select location facet.

use crate::spec::FilterSpecification;
use crate::traits::Filter;
use catalog::InternshipRecord;

/// Keeps records whose location is one of the selected locations.
///
/// An empty selection places no restriction (it does not exclude everything).
pub struct LocationFilter;

impl Filter for LocationFilter {
    fn name(&self) -> &str {
        "LocationFilter"
    }

    fn is_active(&self, spec: &FilterSpecification) -> bool {
        !spec.locations.is_empty()
    }

    fn matches(&self, record: &InternshipRecord, spec: &FilterSpecification) -> bool {
        spec.locations.contains(&record.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::posting;

    #[test]
    fn test_location_filter_is_or_over_selection() {
        let pune = posting(1, 20, "Pune", "Design", false);
        let delhi = posting(2, 20, "Delhi", "Design", false);
        let mumbai = posting(3, 20, "Mumbai", "Design", false);

        let spec = FilterSpecification {
            locations: ["Pune", "Mumbai"].into_iter().map(String::from).collect(),
            ..Default::default()
        };
        let filtered = LocationFilter.apply(vec![&pune, &delhi, &mumbai], &spec);

        let ids: Vec<_> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_location_match_is_exact() {
        let pune = posting(1, 20, "Pune", "Design", false);
        let spec = FilterSpecification {
            locations: ["pune".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert!(!LocationFilter.matches(&pune, &spec));
    }
}
