//! # Internship Board
//!
//! The application handle behind every page:
//! 1. Listing: filter spec, filtered results, applied-filter chips, facets
//! 2. Detail: one posting plus similar postings, or a redirect to the listing
//! 3. Home: a random featured selection
//! 4. Saved items, bookmarks and favorites (sign-in required)
//! 5. Session: login, registration, logout and profile edits
//!
//! Every identity change is forwarded to the saved-state store in the same
//! call, so the store is always scoped to whoever is signed in.

use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

use catalog::{Catalog, FacetCounts, InternshipId, InternshipRecord, category_counts, location_counts};
use filter_engine::selection;
use filter_engine::{ActiveFilter, FilterPipeline, FilterSpecification, FilterUpdate};
use saved_state::{
    Identity, IdentityProvider, KeyValueStorage, ProfileUpdate, SavedStateStore, ToggleOutcome,
};

use crate::config::BoardConfig;
use crate::error::Result;
use crate::views::{Facets, InternshipDetail, Navigation, Routed, SavedItems};

pub struct InternshipBoard {
    catalog: Arc<Catalog>,
    pipeline: FilterPipeline,
    spec: FilterSpecification,
    auth: IdentityProvider,
    store: SavedStateStore,
    rng: StdRng,
    config: BoardConfig,
}

impl InternshipBoard {
    /// Create a board over a loaded catalog and a storage handle.
    ///
    /// # Arguments
    /// * `catalog` - Shared read-only catalog
    /// * `storage` - Durable storage shared by the identity provider and the store
    /// * `rng` - Source for featured/similar picks (seed it for repeatable output)
    /// * `config` - View sizes
    ///
    /// A previously signed-in identity is restored from storage and its saved
    /// state loaded before this returns.
    pub fn new(
        catalog: Arc<Catalog>,
        storage: Arc<dyn KeyValueStorage>,
        rng: StdRng,
        config: BoardConfig,
    ) -> Self {
        let auth = IdentityProvider::restore(storage.clone());
        let mut store = SavedStateStore::new(storage);
        store.bind(auth.current().map(|identity| identity.id.as_str()));

        Self {
            catalog,
            pipeline: FilterPipeline::standard(),
            spec: FilterSpecification::default(),
            auth,
            store,
            rng,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ========================================================================
    // Listing
    // ========================================================================

    pub fn spec(&self) -> &FilterSpecification {
        &self.spec
    }

    /// Enter the listing from a URL query string (`?search=..&category=..`).
    ///
    /// Replaces the whole spec; parameters that are absent fall back to defaults.
    pub fn enter_listing(&mut self, query: &str) {
        self.spec = FilterSpecification::from_query_string(query);
        debug!("Entered listing with {:?}", self.spec);
    }

    /// Query string that reflects the current search (URL sync).
    pub fn query_string(&self) -> String {
        self.spec.to_query_string()
    }

    /// Catalog records matching the current spec, in catalog order.
    pub fn filtered_results(&self) -> Vec<&InternshipRecord> {
        self.pipeline.apply(self.catalog.records(), &self.spec)
    }

    pub fn update_filter(&mut self, update: FilterUpdate) {
        self.spec.apply_update(update);
    }

    pub fn toggle_location(&mut self, location: &str) {
        self.spec.toggle_location(location);
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.spec.toggle_category(category);
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.spec.active_filters()
    }

    pub fn remove_filter(&mut self, chip: &ActiveFilter) {
        self.spec.remove(chip);
    }

    /// Reset every predicate, e.g. from the "no results" state.
    pub fn clear_filters(&mut self) {
        self.spec.clear();
    }

    /// Sidebar facets for the current results.
    ///
    /// Every location and category in the catalog is listed, with `0` for
    /// values the current results do not contain.
    pub fn facets(&self) -> Facets {
        let results = self.filtered_results();
        Facets {
            locations: with_all_labels(self.catalog.locations(), location_counts(&results)),
            categories: with_all_labels(self.catalog.categories(), category_counts(&results)),
        }
    }

    // ========================================================================
    // Home and detail
    // ========================================================================

    /// Random postings for the home page.
    pub fn featured(&mut self) -> Vec<InternshipRecord> {
        selection::featured(&self.catalog, self.config.featured_count, &mut self.rng)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Detail page for `id`, or a redirect to the listing when it is unknown.
    pub fn internship_detail(&mut self, id: InternshipId) -> Routed<InternshipDetail> {
        let Some(record) = self.catalog.get_internship(id) else {
            debug!("Internship {} not found, redirecting to listing", id);
            return Routed::Redirect(Navigation::Listing);
        };

        let similar = selection::similar(&self.catalog, record, self.config.similar_count, &mut self.rng)
            .into_iter()
            .cloned()
            .collect();

        Routed::Show(InternshipDetail {
            record: record.clone(),
            similar,
            is_bookmarked: self.store.is_bookmarked(id),
            is_favorite: self.store.is_favorite(id),
        })
    }

    // ========================================================================
    // Saved state
    // ========================================================================

    pub fn is_bookmarked(&self, id: InternshipId) -> bool {
        self.store.is_bookmarked(id)
    }

    pub fn is_favorite(&self, id: InternshipId) -> bool {
        self.store.is_favorite(id)
    }

    /// Flip the bookmark on `id`, or ask the caller to sign in first.
    pub fn toggle_bookmark(&mut self, id: InternshipId) -> Result<Routed<ToggleOutcome>> {
        if !self.auth.is_authenticated() {
            return Ok(Routed::Redirect(Navigation::sign_in_for(id)));
        }
        Ok(Routed::Show(self.store.toggle_bookmark(id)?))
    }

    /// Flip the favorite on `id`, or ask the caller to sign in first.
    pub fn toggle_favorite(&mut self, id: InternshipId) -> Result<Routed<ToggleOutcome>> {
        if !self.auth.is_authenticated() {
            return Ok(Routed::Redirect(Navigation::sign_in_for(id)));
        }
        Ok(Routed::Show(self.store.toggle_favorite(id)?))
    }

    /// The saved-items page.
    pub fn saved_items(&self) -> Routed<SavedItems<'_>> {
        if !self.auth.is_authenticated() {
            return Routed::Redirect(Navigation::SignIn {
                return_to: "/saved".to_string(),
            });
        }
        let state = self.store.state();
        Routed::Show(SavedItems {
            bookmarked: self.catalog.records_with_ids(|id| state.bookmarked_ids.contains(&id)),
            favorited: self.catalog.records_with_ids(|id| state.favorited_ids.contains(&id)),
        })
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn current_identity(&self) -> Option<&Identity> {
        self.auth.current()
    }

    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.auth.login(email, password)?.clone();
        self.store.bind(Some(&identity.id));
        Ok(identity)
    }

    #[instrument(skip(self, password))]
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Identity> {
        let identity = self.auth.register(name, email, password)?.clone();
        self.store.bind(Some(&identity.id));
        Ok(identity)
    }

    /// Sign out. Saved sets stay in storage for the next sign-in.
    pub fn logout(&mut self) -> Result<()> {
        self.auth.logout()?;
        self.store.bind(None);
        info!("Board signed out");
        Ok(())
    }

    /// Edit the signed-in profile, or ask the caller to sign in first.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<Routed<Identity>> {
        if !self.auth.is_authenticated() {
            return Ok(Routed::Redirect(Navigation::SignIn {
                return_to: "/profile".to_string(),
            }));
        }
        Ok(Routed::Show(self.auth.update_profile(update)?.clone()))
    }
}

fn with_all_labels(labels: Vec<String>, counts: FacetCounts) -> FacetCounts {
    let mut all: FacetCounts = labels.into_iter().map(|label| (label, 0)).collect();
    all.extend(counts);
    all
}
