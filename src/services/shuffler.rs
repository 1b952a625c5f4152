use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::VenueRecord;

/// Hands out one independent RNG per recommendation call
///
/// Production draws from OS entropy. A seeded source derives each call's RNG
/// from the seed plus a call counter, so a sequence of calls is reproducible
/// while consecutive calls still differ.
#[derive(Debug, Default)]
pub enum RngSource {
    #[default]
    Entropy,
    Seeded { seed: u64, calls: AtomicU64 },
}

impl RngSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded {
                seed,
                calls: AtomicU64::new(0),
            },
            None => Self::Entropy,
        }
    }

    pub fn next_rng(&self) -> StdRng {
        match self {
            Self::Entropy => StdRng::from_entropy(),
            Self::Seeded { seed, calls } => {
                let n = calls.fetch_add(1, Ordering::Relaxed);
                StdRng::seed_from_u64(seed.wrapping_add(n))
            }
        }
    }
}

/// Returns a uniformly random permutation of the candidates
pub fn shuffle_candidates<'a, R: Rng + ?Sized>(
    candidates: &[&'a VenueRecord],
    rng: &mut R,
) -> Vec<&'a VenueRecord> {
    let mut shuffled = candidates.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
