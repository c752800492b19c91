//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::planner::SearchConfig;
use crate::transit::{TransitResolver, TransitTable};

/// Shared application state.
///
/// Contains everything a search request needs; all of it is read-only.
#[derive(Clone)]
pub struct AppState {
    /// Activity catalog
    pub catalog: Arc<Catalog>,

    /// Cached transit lookups
    pub resolver: Arc<TransitResolver<TransitTable>>,

    /// Tour search limits
    pub config: Arc<SearchConfig>,

    /// Searches still running after this are cancelled
    pub search_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: Catalog,
        resolver: TransitResolver<TransitTable>,
        config: SearchConfig,
        search_timeout: Duration,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            resolver: Arc::new(resolver),
            config: Arc::new(config),
            search_timeout,
        }
    }
}
