pub mod catalog;
pub mod engine;
pub mod fallback;
pub mod menu_filter;
pub mod providers;
pub mod ranking;
pub mod session;
pub mod shuffler;
pub mod sources;
pub mod url_normalizer;

pub use catalog::{CatalogSnapshot, CatalogStore};
pub use engine::RecommendationEngine;
pub use fallback::FallbackScorer;
pub use ranking::RankingService;
pub use session::SessionStore;
pub use shuffler::RngSource;
