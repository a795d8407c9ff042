//! Catalog building, validation and facet queries.
//!
//! - Build a `Catalog` from parsed records
//! - Validate the catalog invariants
//! - Answer facet questions (distinct locations/categories and their counts)

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Number of records per facet value, keyed by label in sorted order.
pub type FacetCounts = BTreeMap<String, usize>;

impl Catalog {
    /// Load a catalog from a JSON file.
    ///
    /// Steps:
    /// 1. Parse the file into records
    /// 2. Build the catalog (keeps file order)
    /// 3. Validate ids and salaries
    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading catalog from {:?}", path);
        let records = parser::parse_internships_file(path)?;
        let catalog = Self::from_records(records)?;
        info!("Loaded {} internships from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Build and validate a catalog from records already in memory.
    ///
    /// Unlike `insert_internship`, a repeated id is an error here.
    pub fn from_records(records: Vec<InternshipRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId { id: record.id });
            }
        }

        let mut catalog = Catalog::new();
        for record in records {
            catalog.insert_internship(record);
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate the per-record invariants.
    ///
    /// Check that:
    /// - Every id is positive
    /// - Every `salary_display` agrees with `salary_value`
    ///
    /// Reports the first offending record in catalog order.
    pub fn validate(&self) -> Result<()> {
        let first_error = self.records.par_iter().find_map_first(|record| {
            if record.id == 0 {
                return Some(CatalogError::InvalidId { id: record.id });
            }
            if !record.salary_is_consistent() {
                return Some(CatalogError::InconsistentSalary {
                    id: record.id,
                    display: record.salary_display.clone(),
                    value: record.salary_value,
                });
            }
            None
        });

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Distinct locations, sorted, for the location facet.
    pub fn locations(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.location.as_str()))
    }

    /// Distinct categories, sorted, for the category facet.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.category.as_str()))
    }
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    labels
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Count records per location in `records`.
pub fn location_counts(records: &[&InternshipRecord]) -> FacetCounts {
    facet_counts(records, |r| &r.location)
}

/// Count records per category in `records`.
pub fn category_counts(records: &[&InternshipRecord]) -> FacetCounts {
    facet_counts(records, |r| &r.category)
}

fn facet_counts<F>(records: &[&InternshipRecord], label: F) -> FacetCounts
where
    F: Fn(&InternshipRecord) -> &String + Sync,
{
    records
        .par_iter()
        .fold(FacetCounts::new, |mut local, record| {
            *local.entry(label(*record).clone()).or_insert(0) += 1;
            local
        })
        .reduce(FacetCounts::new, |mut acc, local| {
            for (key, count) in local {
                *acc.entry(key).or_insert(0) += count;
            }
            acc
        })
}
