use rand::{seq::SliceRandom, Rng};

use crate::models::VenueRecord;

/// Points awarded per matched category
const CATEGORY_WEIGHT: f64 = 5.0;
/// Default upper bound (exclusive) of the random bonus added to every score
const DEFAULT_JITTER_SPAN: f64 = 2.0;
/// How many leading candidates compete in the final random draw
const TOP_POOL: usize = 3;

/// Occasion category: request-side cues and venue-side cues
struct Category {
    name: &'static str,
    request_keywords: &'static [&'static str],
    venue_keywords: &'static [&'static str],
}

const CATEGORIES: &[Category] = &[
    Category {
        name: "romantic",
        request_keywords: &["романт", "побачен", "двох", "інтимн", "затишн"],
        venue_keywords: &["інтимн", "романт", "для пар", "затишн"],
    },
    Category {
        name: "family",
        request_keywords: &["сім", "діт", "родин", "батьк"],
        venue_keywords: &["сімейн", "діт", "родин"],
    },
    Category {
        name: "business",
        request_keywords: &["діл", "зустріч", "перегов", "бізнес"],
        venue_keywords: &["діл", "зустріч", "бізнес"],
    },
    Category {
        name: "friends",
        request_keywords: &["друз", "компан", "гуртом", "весел"],
        venue_keywords: &["компан", "друз", "молодіжн"],
    },
    Category {
        name: "quick",
        request_keywords: &["швидк", "перекус", "фаст", "поспіша"],
        venue_keywords: &["швидк", "casual", "фаст"],
    },
    Category {
        name: "celebration",
        request_keywords: &["святкув", "день народж", "ювіле", "свято"],
        venue_keywords: &["святков", "простор", "груп"],
    },
];

impl Category {
    fn matches_request(&self, lowered: &str) -> bool {
        self.request_keywords.iter().any(|kw| lowered.contains(kw))
    }

    fn matches_venue(&self, profile: &str) -> bool {
        self.venue_keywords.iter().any(|kw| profile.contains(kw))
    }
}

/// Local heuristic used whenever the ranking call cannot pick a venue
///
/// Each candidate scores [`CATEGORY_WEIGHT`] per occasion category that both
/// the request and the venue's `vibe`/`aim`/`cuisine` text mention, plus a
/// random bonus in `[0, jitter_span)`. The winner is drawn uniformly from the
/// top three rather than always taking the first, so similar requests do not
/// keep getting the same venue.
#[derive(Debug, Clone)]
pub struct FallbackScorer {
    jitter_span: f64,
}

impl Default for FallbackScorer {
    fn default() -> Self {
        Self {
            jitter_span: DEFAULT_JITTER_SPAN,
        }
    }
}

impl FallbackScorer {
    /// Scorer with the random bonus turned off
    pub fn without_jitter() -> Self {
        Self { jitter_span: 0.0 }
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.jitter_span > 0.0 {
            rng.gen_range(0.0..self.jitter_span)
        } else {
            0.0
        }
    }

    /// Scores every candidate and sorts best first
    fn rank<'a, R: Rng + ?Sized>(
        &self,
        requested: &[&Category],
        candidates: &[&'a VenueRecord],
        rng: &mut R,
    ) -> Vec<(f64, &'a VenueRecord)> {
        let mut scored: Vec<(f64, &'a VenueRecord)> = candidates
            .iter()
            .map(|&venue| {
                let profile = venue.profile_text();
                let hits = requested
                    .iter()
                    .filter(|category| category.matches_venue(&profile))
                    .count();
                (CATEGORY_WEIGHT * hits as f64 + self.jitter(rng), venue)
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
    }

    /// Picks one candidate; `None` only for an empty slice
    pub fn select<'a, R: Rng + ?Sized>(
        &self,
        request: &str,
        candidates: &[&'a VenueRecord],
        rng: &mut R,
    ) -> Option<&'a VenueRecord> {
        let lowered = request.to_lowercase();
        let requested: Vec<&Category> = CATEGORIES
            .iter()
            .filter(|category| category.matches_request(&lowered))
            .collect();

        let scored = self.rank(&requested, candidates, rng);
        let top = scored.first()?.0;

        if top > 0.0 {
            // Any of the leading entries may win, not only the best one.
            let pool = &scored[..scored.len().min(TOP_POOL)];

            let (score, chosen) = *pool.choose(rng)?;
            tracing::info!(
                venue = %chosen.display_name(),
                score,
                pool = pool.len(),
                categories = ?requested.iter().map(|c| c.name).collect::<Vec<_>>(),
                "Fallback picked from top candidates"
            );
            Some(chosen)
        } else {
            let chosen = candidates.choose(rng).copied()?;
            tracing::info!(
                venue = %chosen.display_name(),
                "Fallback picked at random, no category matched"
            );
            Some(chosen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn venue(name: &str, vibe: &str) -> VenueRecord {
        VenueRecord {
            vibe: Some(vibe.to_string()),
            ..VenueRecord::named(name)
        }
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(FallbackScorer::default().select("будь-що", &[], &mut rng).is_none());
    }

    #[test]
    fn test_always_returns_member_of_input() {
        let venues = vec![
            venue("A", "затишна"),
            venue("B", "молодіжна"),
            venue("C", ""),
            VenueRecord::default(),
        ];
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::default();
        let mut rng = StdRng::seed_from_u64(7);

        for request in ["побачення", "з друзями", "швидкий перекус", "", "qwerty"] {
            for _ in 0..50 {
                let chosen = scorer.select(request, &refs, &mut rng).unwrap();
                assert!(refs.iter().any(|v| std::ptr::eq(*v, chosen)));
            }
        }
    }

    fn ranked<'a>(
        scorer: &FallbackScorer,
        request: &str,
        candidates: &[&'a VenueRecord],
        rng: &mut StdRng,
    ) -> Vec<(f64, &'a VenueRecord)> {
        let lowered = request.to_lowercase();
        let requested: Vec<&Category> = CATEGORIES
            .iter()
            .filter(|category| category.matches_request(&lowered))
            .collect();
        scorer.rank(&requested, candidates, rng)
    }

    fn one_romantic_venue() -> Vec<VenueRecord> {
        vec![
            venue("Loud Pub", "гучний бар"),
            venue("Candle", "інтимна атмосфера"),
            venue("Canteen", "їдальня"),
            venue("Hall", "великий зал"),
        ]
    }

    #[test]
    fn test_category_winner_leads_but_shares_the_draw() {
        let venues = one_romantic_venue();
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let scored = ranked(&scorer, "романтична вечеря", &refs, &mut rng);
            assert_eq!(scored[0].1.display_name(), "Candle");
        }

        let trials = 3000;
        let candle = (0..trials)
            .filter(|_| {
                scorer
                    .select("романтична вечеря", &refs, &mut rng)
                    .unwrap()
                    .display_name()
                    == "Candle"
            })
            .count();

        // uniform over the top three: about one pick in three
        assert!((850..=1150).contains(&candle), "Candle picked {candle}/{trials}");
    }

    #[test]
    fn test_top_three_pool_without_jitter() {
        let venues = one_romantic_venue();
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::without_jitter();
        let mut rng = StdRng::seed_from_u64(8);

        let scored = ranked(&scorer, "романтична вечеря", &refs, &mut rng);
        let order: Vec<&str> = scored.iter().map(|(_, v)| v.display_name()).collect();
        assert_eq!(order, vec!["Candle", "Loud Pub", "Canteen", "Hall"]);
        assert_eq!(scored[0].0, CATEGORY_WEIGHT);

        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(scorer.select("романтична вечеря", &refs, &mut rng).unwrap().display_name().to_string());
        }
        let expected: HashSet<String> = ["Candle", "Loud Pub", "Canteen"].iter().map(|s| s.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let venues = vec![venue("Kids", "сімейний ресторан")];
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::default();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let chosen = scorer.select("обід з дітьми", &refs, &mut rng).unwrap();
            assert_eq!(chosen.display_name(), "Kids");
        }
    }

    #[test]
    fn test_aim_and_cuisine_count_toward_profile() {
        let venues = vec![
            venue("Plain", "тихо"),
            VenueRecord {
                aim: Some("Ділові зустрічі".to_string()),
                ..VenueRecord::named("Office")
            },
        ];
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        let scored = ranked(&FallbackScorer::without_jitter(), "бізнес ланч", &refs, &mut rng);
        assert_eq!(scored[0].1.display_name(), "Office");
        assert_eq!(scored[0].0, CATEGORY_WEIGHT);
        assert_eq!(scored[1].0, 0.0);
    }

    #[test]
    fn test_no_match_draws_from_everything() {
        let venues: Vec<VenueRecord> = (0..6).map(|i| venue(&format!("V{i}"), "звичайний")).collect();
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::without_jitter();
        let mut rng = StdRng::seed_from_u64(5);

        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(scorer.select("щось", &refs, &mut rng).unwrap().display_name().to_string());
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_tied_winners_limited_to_top_three() {
        let venues: Vec<VenueRecord> = (0..5).map(|i| venue(&format!("V{i}"), "компанія друзів")).collect();
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::without_jitter();
        let mut rng = StdRng::seed_from_u64(9);

        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(scorer.select("з друзями", &refs, &mut rng).unwrap().display_name().to_string());
        }
        let expected: HashSet<String> = ["V0", "V1", "V2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_tied_winners_rotate_with_jitter() {
        let venues: Vec<VenueRecord> = (0..5).map(|i| venue(&format!("V{i}"), "компанія друзів")).collect();
        let refs: Vec<&VenueRecord> = venues.iter().collect();
        let scorer = FallbackScorer::default();
        let mut rng = StdRng::seed_from_u64(10);

        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(scorer.select("з друзями", &refs, &mut rng).unwrap().display_name().to_string());
        }
        assert_eq!(seen.len(), 5);
    }
}
