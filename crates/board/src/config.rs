//! Board tuning knobs.

/// Sizes used by the listing, home and detail views.
///
/// ## Usage
/// ```ignore
/// let config = BoardConfig::default().with_featured_count(6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Postings picked for the home page
    pub featured_count: usize,
    /// Same-category postings shown under a detail view
    pub similar_count: usize,
    /// Upper end of the minimum-salary slider, in dollars per hour
    pub salary_slider_max: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            featured_count: 4,
            similar_count: 3,
            salary_slider_max: 50,
        }
    }
}

impl BoardConfig {
    pub fn with_featured_count(mut self, featured_count: usize) -> Self {
        self.featured_count = featured_count;
        self
    }

    pub fn with_similar_count(mut self, similar_count: usize) -> Self {
        self.similar_count = similar_count;
        self
    }

    pub fn with_salary_slider_max(mut self, salary_slider_max: u32) -> Self {
        self.salary_slider_max = salary_slider_max;
        self
    }
}
