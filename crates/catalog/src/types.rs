//! Core domain types for the internship catalog.
//!
//! This module defines the record type shared by every other crate and the
//! `Catalog` that owns the records:
//! - Type alias for internship ids
//! - The immutable `InternshipRecord`
//! - Salary helpers (one canonical unit: whole US dollars per hour)
//! - `Catalog`, the in-memory ordered collection with an id index

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for an internship posting (always positive)
pub type InternshipId = u32;

// =============================================================================
// Internship Record
// =============================================================================

/// A single internship posting.
///
/// Records are immutable once loaded; the catalog hands out `&InternshipRecord`
/// and nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipRecord {
    pub id: InternshipId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub category: String,
    /// Formatted salary shown to users, e.g. `"$25/hr"`
    pub salary_display: String,
    /// Hourly rate in whole US dollars, used by the salary threshold filter
    pub salary_value: u32,
    pub is_remote: bool,
    pub posted_date: NaiveDate,
    /// Free-form duration such as `"3 months"`
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

// =============================================================================
// Salary
// =============================================================================

/// Format an hourly rate the way the catalog displays it.
pub fn format_hourly_salary(value: u32) -> String {
    format!("${}/hr", value)
}

/// Extract the leading amount from a salary display string.
///
/// Skips any currency prefix and reads the first run of digits, so
/// `"$25/hr"` and `"USD 25 per hour"` both give `Some(25)`.
pub fn parse_salary_display(display: &str) -> Option<u32> {
    let digits: String = display
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

impl InternshipRecord {
    /// True when `salary_display` names the same amount as `salary_value`.
    pub fn salary_is_consistent(&self) -> bool {
        parse_salary_display(&self.salary_display) == Some(self.salary_value)
    }
}

// =============================================================================
// Catalog - The In-Memory Collection
// =============================================================================

/// The full, static collection of internship records.
///
/// Keeps records in their catalog order (filtering must never reorder them)
/// plus an id index for O(1) detail lookups.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) records: Vec<InternshipRecord>,
    pub(crate) id_index: HashMap<InternshipId, usize>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            id_index: HashMap::new(),
        }
    }

    /// All records in catalog order
    pub fn records(&self) -> &[InternshipRecord] {
        &self.records
    }

    /// Get a record by id
    ///
    /// Returns `None` for unknown ids; callers treat that as "not found".
    pub fn get_internship(&self, id: InternshipId) -> Option<&InternshipRecord> {
        self.id_index.get(&id).map(|&idx| &self.records[idx])
    }

    /// Records whose id satisfies `contains`, in catalog order.
    pub fn records_with_ids<'a, F>(&'a self, mut contains: F) -> Vec<&'a InternshipRecord>
    where
        F: FnMut(InternshipId) -> bool,
    {
        self.records.iter().filter(|r| contains(r.id)).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and index it.
    ///
    /// A record whose id is already present replaces the old one in place so
    /// the id index never points at two positions.
    pub fn insert_internship(&mut self, record: InternshipRecord) {
        match self.id_index.get(&record.id) {
            Some(&idx) => self.records[idx] = record,
            None => {
                self.id_index.insert(record.id, self.records.len());
                self.records.push(record);
            }
        }
    }
}
