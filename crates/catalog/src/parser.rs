//! Parser for catalog files.
//!
//! A catalog file is a JSON array of postings. `salary_display` may be left
//! out, in which case it is derived from `salary_value`.

use crate::error::{CatalogError, Result};
use crate::types::{InternshipId, InternshipRecord, format_hourly_salary};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk shape of a posting, before the display salary is filled in.
#[derive(Debug, Deserialize)]
struct RawInternship {
    id: InternshipId,
    title: String,
    company: String,
    description: String,
    location: String,
    category: String,
    #[serde(default)]
    salary_display: Option<String>,
    salary_value: u32,
    #[serde(default)]
    is_remote: bool,
    posted_date: NaiveDate,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    requirements: Vec<String>,
}

impl From<RawInternship> for InternshipRecord {
    fn from(raw: RawInternship) -> Self {
        let salary_display = raw
            .salary_display
            .unwrap_or_else(|| format_hourly_salary(raw.salary_value));
        Self {
            id: raw.id,
            title: raw.title,
            company: raw.company,
            description: raw.description,
            location: raw.location,
            category: raw.category,
            salary_display,
            salary_value: raw.salary_value,
            is_remote: raw.is_remote,
            posted_date: raw.posted_date,
            duration: raw.duration,
            requirements: raw.requirements,
        }
    }
}

/// Parse catalog JSON text.
///
/// # Arguments
/// * `source` - Name used in error messages (usually the file name)
/// * `json` - The JSON array of postings
pub fn parse_internships(source: &str, json: &str) -> Result<Vec<InternshipRecord>> {
    let raw: Vec<RawInternship> =
        serde_json::from_str(json).map_err(|e| CatalogError::ParseError {
            file: source.to_string(),
            reason: e.to_string(),
        })?;
    Ok(raw.into_iter().map(InternshipRecord::from).collect())
}

/// Read and parse a catalog file.
pub fn parse_internships_file(path: &Path) -> Result<Vec<InternshipRecord>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let json = fs::read_to_string(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_internships(&source, &json)
}
