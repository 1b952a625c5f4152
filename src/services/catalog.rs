use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{error::AppResult, models::VenueRecord, services::sources::CatalogSource};

/// Immutable, ordered set of venues from one load of the source
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    venues: Vec<VenueRecord>,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(venues: Vec<VenueRecord>) -> Self {
        Self {
            venues,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn venues(&self) -> &[VenueRecord] {
        &self.venues
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Holder of the current snapshot, shared by every request
///
/// Readers clone the inner `Arc` and release the lock immediately, so a reload
/// swaps the whole snapshot at once and never waits on an in-flight request.
#[derive(Clone)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<CatalogSnapshot>>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(CatalogSnapshot::empty())
    }
}

impl CatalogStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// Returns the snapshot that is current right now
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.read().await.clone()
    }

    /// Replaces the current snapshot wholesale
    pub async fn replace(&self, venues: Vec<VenueRecord>) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(CatalogSnapshot::new(venues));
        *self.current.write().await = snapshot.clone();
        snapshot
    }

    /// Pulls the source and swaps in the result; keeps the old snapshot on failure
    pub async fn reload(&self, source: &dyn CatalogSource) -> AppResult<usize> {
        match source.fetch().await {
            Ok(venues) => {
                let snapshot = self.replace(venues).await;
                tracing::info!(
                    source = source.name(),
                    venues = snapshot.len(),
                    "Catalog loaded"
                );
                Ok(snapshot.len())
            }
            Err(e) => {
                tracing::error!(source = source.name(), error = %e, "Catalog reload failed");
                Err(e)
            }
        }
    }
}
