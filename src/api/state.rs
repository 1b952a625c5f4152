use std::sync::Arc;

use crate::services::{
    sources::CatalogSource, CatalogStore, RecommendationEngine, SessionStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub sessions: SessionStore,
    pub catalog_source: Arc<dyn CatalogSource>,
}

impl AppState {
    /// Creates state around an engine; sessions start empty
    pub fn new(engine: RecommendationEngine, catalog_source: Arc<dyn CatalogSource>) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: SessionStore::new(),
            catalog_source,
        }
    }

    /// Replaces the default session store
    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    /// Catalog the engine reads from
    pub fn catalog(&self) -> &CatalogStore {
        self.engine.catalog()
    }
}
