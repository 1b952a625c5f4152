/// Catalog data sources
///
/// The engine pulls the venue list on demand; there is no push or streaming
/// contract. Each source returns records in source order.
use crate::{error::AppResult, models::VenueRecord};

pub mod sheet_csv;

pub use sheet_csv::SheetCsvSource;

#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the full, ordered venue list
    async fn fetch(&self) -> AppResult<Vec<VenueRecord>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fixed in-memory venue list
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    venues: Vec<VenueRecord>,
}

impl StaticCatalogSource {
    pub fn new(venues: Vec<VenueRecord>) -> Self {
        Self { venues }
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> AppResult<Vec<VenueRecord>> {
        Ok(self.venues.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
