use crate::{
    models::{Recommendation, VenueRecord},
    services::{
        catalog::CatalogStore,
        fallback::FallbackScorer,
        menu_filter::filter_by_menu,
        ranking::RankingService,
        shuffler::{shuffle_candidates, RngSource},
        url_normalizer,
    },
};

/// Turns a free-text request into one venue from the current catalog
///
/// Pipeline: snapshot → shuffle → menu filter → ranking call → (fallback) →
/// photo normalization → placeholders. The ranking call gets exactly one
/// attempt; every way it can fail ends in the fallback scorer, so the only
/// outcome a caller sees besides a recommendation is `None` for an empty
/// catalog.
pub struct RecommendationEngine {
    catalog: CatalogStore,
    ranker: RankingService,
    scorer: FallbackScorer,
    rng: RngSource,
}

impl RecommendationEngine {
    pub fn new(
        catalog: CatalogStore,
        ranker: RankingService,
        scorer: FallbackScorer,
        rng: RngSource,
    ) -> Self {
        Self {
            catalog,
            ranker,
            scorer,
            rng,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[tracing::instrument(skip_all, fields(request = %request))]
    pub async fn recommend(&self, request: &str) -> Option<Recommendation> {
        let snapshot = self.catalog.snapshot().await;
        if snapshot.is_empty() {
            tracing::error!("Catalog is empty, nothing to recommend");
            return None;
        }

        let mut rng = self.rng.next_rng();

        let all: Vec<&VenueRecord> = snapshot.venues().iter().collect();
        let shuffled = shuffle_candidates(&all, &mut rng);
        let candidates = filter_by_menu(request, shuffled);

        let ranked = match self.ranker.rank(request, &candidates, &mut rng).await {
            Ok(index) => {
                let chosen = candidates.get(index - 1).copied();
                if let Some(venue) = chosen {
                    tracing::info!(
                        venue = %venue.display_name(),
                        option = index,
                        of = candidates.len(),
                        "Ranking picked venue"
                    );
                }
                chosen
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ranking unusable, using fallback scorer");
                None
            }
        };

        let chosen = match ranked {
            Some(venue) => venue,
            None => self.scorer.select(request, &candidates, &mut rng)?,
        };

        let photo = chosen.photo.as_deref().map(url_normalizer::normalize);

        Some(Recommendation::from_record(chosen, photo))
    }
}
