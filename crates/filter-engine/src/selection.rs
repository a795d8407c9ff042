//! Random selection for the "featured" and "similar" listings.
//!
//! The random source is always passed in, so callers can use a seeded
//! `StdRng` when they need repeatable picks.

use catalog::{Catalog, InternshipRecord};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick up to `n` distinct records from `records`. Order is unspecified.
pub fn select_up_to<'a, R>(
    records: &[&'a InternshipRecord],
    n: usize,
    rng: &mut R,
) -> Vec<&'a InternshipRecord>
where
    R: Rng + ?Sized,
{
    records.choose_multiple(rng, n).copied().collect()
}

/// Featured postings for the home page: up to `n` from the whole catalog.
pub fn featured<'a, R>(catalog: &'a Catalog, n: usize, rng: &mut R) -> Vec<&'a InternshipRecord>
where
    R: Rng + ?Sized,
{
    let all: Vec<&InternshipRecord> = catalog.records().iter().collect();
    select_up_to(&all, n, rng)
}

/// Postings similar to `current`: same category, never `current` itself.
pub fn similar<'a, R>(
    catalog: &'a Catalog,
    current: &InternshipRecord,
    n: usize,
    rng: &mut R,
) -> Vec<&'a InternshipRecord>
where
    R: Rng + ?Sized,
{
    let same_category: Vec<&InternshipRecord> = catalog
        .records()
        .iter()
        .filter(|r| r.id != current.id && r.category == current.category)
        .collect();
    select_up_to(&same_category, n, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::posting;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn create_test_catalog() -> Catalog {
        Catalog::from_records(vec![
            posting(1, 20, "Pune", "Design", false),
            posting(2, 35, "Pune", "Engineering", true),
            posting(3, 22, "Delhi", "Design", false),
            posting(4, 28, "Mumbai", "Design", true),
            posting(5, 40, "Delhi", "Engineering", false),
            posting(6, 19, "Pune", "Design", false),
            posting(7, 31, "Remote", "Marketing", true),
        ])
        .unwrap()
    }

    #[test]
    fn test_select_up_to_caps_and_dedups() {
        let catalog = create_test_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = featured(&catalog, 4, &mut rng);
        assert_eq!(picked.len(), 4);
        let ids: HashSet<_> = picked.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 4);

        let everything = featured(&catalog, 100, &mut rng);
        assert_eq!(everything.len(), catalog.len());
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        let catalog = create_test_catalog();

        let first: Vec<_> = featured(&catalog, 3, &mut StdRng::seed_from_u64(42))
            .iter()
            .map(|r| r.id)
            .collect();
        let second: Vec<_> = featured(&catalog, 3, &mut StdRng::seed_from_u64(42))
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_similar_excludes_current_and_other_categories() {
        let catalog = create_test_catalog();
        let current = catalog.get_internship(1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let picked = similar(&catalog, current, 3, &mut rng);

        assert_eq!(picked.len(), 3);
        for record in &picked {
            assert_ne!(record.id, 1);
            assert_eq!(record.category, "Design");
        }
    }

    #[test]
    fn test_similar_with_no_peers() {
        let catalog = create_test_catalog();
        let current = catalog.get_internship(7).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(similar(&catalog, current, 3, &mut rng).is_empty());
    }
}
