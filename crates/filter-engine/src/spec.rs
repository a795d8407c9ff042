//! The filter specification and the ways it gets changed.
//!
//! `FilterSpecification` is the value the filter controls own. It changes
//! through three entry points:
//! - `apply_update` with a partial `FilterUpdate` (sidebar controls, search box)
//! - the toggle/remove helpers (facet checkboxes and applied-filter chips)
//! - `from_query_string` at page entry
//!
//! Input sanitising (negative salary) happens here, never in the filters.

use std::collections::BTreeSet;
use std::fmt;
use url::form_urlencoded;

/// Active filter predicates. `Default` is the all-empty spec that matches
/// the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpecification {
    /// Case-insensitive substring matched against title, company, description
    pub search_text: String,
    /// Minimum hourly salary; `0` means no threshold
    pub min_salary: u32,
    /// Accepted locations; empty means no restriction
    pub locations: BTreeSet<String>,
    /// Accepted categories; empty means no restriction
    pub categories: BTreeSet<String>,
    pub remote_only: bool,
}

/// One applied filter as shown in the removable chip row above results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    MinSalary(u32),
    RemoteOnly,
    Location(String),
    Category(String),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::MinSalary(value) => write!(f, "Min: ${}/hr", value),
            ActiveFilter::RemoteOnly => write!(f, "Remote Only"),
            ActiveFilter::Location(location) => write!(f, "{}", location),
            ActiveFilter::Category(category) => write!(f, "{}", category),
        }
    }
}

/// Clamp raw salary input to the valid range.
///
/// Negative values (a malformed query parameter, a bad slider value) become
/// `0`, i.e. "no threshold".
pub fn clamp_min_salary(raw: i64) -> u32 {
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

impl FilterSpecification {
    /// True when no predicate is active.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Build the entry spec from the `search` and `category` query values.
    ///
    /// Missing or empty values fall back to the defaults.
    pub fn from_query_params(search: Option<&str>, category: Option<&str>) -> Self {
        let mut spec = Self::default();
        if let Some(search) = search {
            spec.search_text = search.to_string();
        }
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            spec.categories.insert(category.to_string());
        }
        spec
    }

    /// Parse a URL query string such as `?search=design&category=Marketing`.
    ///
    /// Only the first `search` and `category` values are used; every other
    /// parameter is ignored.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut search = None;
        let mut category = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" if search.is_none() => search = Some(value.into_owned()),
                "category" if category.is_none() => category = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::from_query_params(search.as_deref(), category.as_deref())
    }

    /// Query string that restores the URL-synced part of this spec.
    ///
    /// Writes `search` when non-empty and `category` when exactly one
    /// category is selected; the other predicates are not URL-synced.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search_text.is_empty() {
            serializer.append_pair("search", &self.search_text);
        }
        if self.categories.len() == 1 {
            if let Some(category) = self.categories.iter().next() {
                serializer.append_pair("category", category);
            }
        }
        serializer.finish()
    }

    /// Apply a partial update. Fields left as `None` keep their value.
    pub fn apply_update(&mut self, update: FilterUpdate) {
        if let Some(search_text) = update.search_text {
            self.search_text = search_text;
        }
        if let Some(raw) = update.min_salary {
            self.min_salary = clamp_min_salary(raw);
        }
        if let Some(locations) = update.locations {
            self.locations = locations;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(remote_only) = update.remote_only {
            self.remote_only = remote_only;
        }
    }

    /// Flip one location checkbox.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.locations.remove(location) {
            self.locations.insert(location.to_string());
        }
    }

    /// Flip one category checkbox.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    pub fn toggle_remote_only(&mut self) {
        self.remote_only = !self.remote_only;
    }

    /// Applied-filter chips in display order: salary, remote, locations,
    /// categories. The search text is shown in the search box, not as a chip.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();
        if self.min_salary > 0 {
            chips.push(ActiveFilter::MinSalary(self.min_salary));
        }
        if self.remote_only {
            chips.push(ActiveFilter::RemoteOnly);
        }
        chips.extend(self.locations.iter().cloned().map(ActiveFilter::Location));
        chips.extend(self.categories.iter().cloned().map(ActiveFilter::Category));
        chips
    }

    /// Remove a single chip, leaving every other predicate untouched.
    pub fn remove(&mut self, chip: &ActiveFilter) {
        match chip {
            ActiveFilter::MinSalary(_) => self.min_salary = 0,
            ActiveFilter::RemoteOnly => self.remote_only = false,
            ActiveFilter::Location(location) => {
                self.locations.remove(location);
            }
            ActiveFilter::Category(category) => {
                self.categories.remove(category);
            }
        }
    }

    /// Reset to the default (all-empty) spec.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A partial filter specification.
///
/// ## Usage
/// ```ignore
/// let update = FilterUpdate::new()
///     .with_min_salary(30)
///     .with_locations(["Pune", "Delhi"]);
/// spec.apply_update(update);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search_text: Option<String>,
    /// Raw input; clamped when applied
    pub min_salary: Option<i64>,
    pub locations: Option<BTreeSet<String>>,
    pub categories: Option<BTreeSet<String>>,
    pub remote_only: Option<bool>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = Some(search_text.into());
        self
    }

    pub fn with_min_salary(mut self, raw: i64) -> Self {
        self.min_salary = Some(raw);
        self
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = Some(locations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_remote_only(mut self, remote_only: bool) -> Self {
        self.remote_only = Some(remote_only);
        self
    }

    /// True when applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let spec = FilterSpecification::default();
        assert!(spec.is_default());
        assert!(spec.active_filters().is_empty());
        assert_eq!(spec.to_query_string(), "");
    }

    #[test]
    fn test_clamp_min_salary() {
        assert_eq!(clamp_min_salary(-15), 0);
        assert_eq!(clamp_min_salary(0), 0);
        assert_eq!(clamp_min_salary(30), 30);
        assert_eq!(clamp_min_salary(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_apply_update_clamps_negative_salary() {
        let mut spec = FilterSpecification::default();
        spec.min_salary = 25;
        spec.apply_update(FilterUpdate::new().with_min_salary(-3));
        assert_eq!(spec.min_salary, 0);
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut spec = FilterSpecification::from_query_params(Some("rust"), Some("Engineering"));
        spec.apply_update(
            FilterUpdate::new()
                .with_locations(["Pune"])
                .with_remote_only(true),
        );

        assert_eq!(spec.search_text, "rust");
        assert!(spec.categories.contains("Engineering"));
        assert!(spec.locations.contains("Pune"));
        assert!(spec.remote_only);
        assert!(FilterUpdate::new().is_empty());
    }

    #[test]
    fn test_from_query_string() {
        let spec = FilterSpecification::from_query_string("?search=data%20science&category=Marketing&page=2");
        assert_eq!(spec.search_text, "data science");
        assert_eq!(spec.categories.len(), 1);
        assert!(spec.categories.contains("Marketing"));
        assert_eq!(spec.min_salary, 0);
        assert!(spec.locations.is_empty());
    }

    #[test]
    fn test_from_query_string_absent_and_empty() {
        assert!(FilterSpecification::from_query_string("").is_default());
        assert!(FilterSpecification::from_query_string("category=").is_default());
    }

    #[test]
    fn test_query_string_round_trip() {
        let spec = FilterSpecification::from_query_params(Some("ux & ui"), Some("Design"));
        let restored = FilterSpecification::from_query_string(&spec.to_query_string());
        assert_eq!(restored, spec);
    }

    #[test]
    fn test_toggles() {
        let mut spec = FilterSpecification::default();
        spec.toggle_location("Pune");
        spec.toggle_category("Design");
        spec.toggle_remote_only();
        assert!(spec.locations.contains("Pune"));
        assert!(spec.categories.contains("Design"));
        assert!(spec.remote_only);

        spec.toggle_location("Pune");
        spec.toggle_category("Design");
        spec.toggle_remote_only();
        assert!(spec.is_default());
    }

    #[test]
    fn test_active_filters_order_and_labels() {
        let mut spec = FilterSpecification::default();
        spec.apply_update(
            FilterUpdate::new()
                .with_min_salary(30)
                .with_remote_only(true)
                .with_locations(["Pune"])
                .with_categories(["Design"]),
        );

        let labels: Vec<String> = spec.active_filters().iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["Min: $30/hr", "Remote Only", "Pune", "Design"]);
    }

    #[test]
    fn test_remove_chip_and_clear() {
        let mut spec = FilterSpecification::default();
        spec.apply_update(
            FilterUpdate::new()
                .with_search("intern")
                .with_min_salary(30)
                .with_locations(["Pune", "Delhi"]),
        );

        spec.remove(&ActiveFilter::Location("Pune".to_string()));
        spec.remove(&ActiveFilter::MinSalary(30));
        assert_eq!(spec.min_salary, 0);
        assert_eq!(spec.locations.len(), 1);
        assert_eq!(spec.search_text, "intern");

        spec.clear();
        assert!(spec.is_default());
    }
}
