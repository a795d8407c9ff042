//! Values handed to the presentation layer.

use catalog::{FacetCounts, InternshipId, InternshipRecord};
use std::fmt;

/// Where the presentation layer should go instead of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Sign in first, then come back to `return_to`
    SignIn { return_to: String },
    /// Back to the full listing
    Listing,
}

impl Navigation {
    /// Sign-in redirect that returns to an internship's detail page.
    pub fn sign_in_for(id: InternshipId) -> Self {
        Navigation::SignIn {
            return_to: format!("/internships/{}", id),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::SignIn { return_to } => write!(f, "/login?returnTo={}", return_to),
            Navigation::Listing => write!(f, "/internships"),
        }
    }
}

/// Either something to render or a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed<T> {
    Show(T),
    Redirect(Navigation),
}

impl<T> Routed<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Routed::Redirect(_))
    }

    /// The rendered value, dropping a redirect.
    pub fn shown(self) -> Option<T> {
        match self {
            Routed::Show(value) => Some(value),
            Routed::Redirect(_) => None,
        }
    }
}

/// One posting's detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct InternshipDetail {
    pub record: InternshipRecord,
    /// Same-category postings, never including `record`
    pub similar: Vec<InternshipRecord>,
    pub is_bookmarked: bool,
    pub is_favorite: bool,
}

/// The signed-in user's saved postings, in catalog order.
///
/// Ids that are no longer in the catalog are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItems<'a> {
    pub bookmarked: Vec<&'a InternshipRecord>,
    pub favorited: Vec<&'a InternshipRecord>,
}

/// Sidebar facets: every catalog value with its count in the current results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    pub locations: FacetCounts,
    pub categories: FacetCounts,
}
