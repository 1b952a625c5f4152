use rand::{seq::SliceRandom, Rng};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::{
    error::AppError,
    models::VenueRecord,
    services::providers::{CompletionProvider, CompletionRequest},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const TEMPERATURE: f32 = 0.4;
const TOP_P: f32 = 0.9;
const MAX_TOKENS: u32 = 200;
const HINTS_PER_PROMPT: usize = 2;

const SYSTEM_INSTRUCTION: &str = "You are an expert restaurateur. Vary your choices \
     across requests and do not fixate on a single venue.";

/// Steering rules; two are sampled into every prompt
const HINTS: [&str; 5] = [
    "A romantic request should favor an intimate atmosphere",
    "If children or family are mentioned, favor family-friendly venues",
    "A quick bite should favor a casual format",
    "A request for a specific cuisine should weigh the cuisine type",
    "A celebration should favor spacious venues",
];

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid number regex"));

/// Why a ranking attempt produced no usable choice
#[derive(thiserror::Error, Debug)]
pub enum RankingError {
    #[error("ranking call timed out after {0:?}")]
    Timeout(Duration),

    #[error("ranking call failed: {0}")]
    Provider(#[from] AppError),

    #[error("no option number in answer {0:?}")]
    NoIndex(String),

    #[error("option {index} outside 1..={len}")]
    OutOfRange { index: String, len: usize },
}

/// Asks an external model to pick the best candidate for a request
///
/// One attempt per call, bounded by `timeout`. Any failure is reported as a
/// [`RankingError`]; the caller decides how to degrade.
#[derive(Clone)]
pub struct RankingService {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl RankingService {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Returns the 1-based position of the chosen candidate
    pub async fn rank<R: Rng + ?Sized>(
        &self,
        request: &str,
        candidates: &[&VenueRecord],
        rng: &mut R,
    ) -> Result<usize, RankingError> {
        let completion = CompletionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(request, candidates, rng),
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
        };

        tracing::info!(
            provider = self.provider.name(),
            candidates = candidates.len(),
            first = ?candidates.iter().take(3).map(|v| v.display_name()).collect::<Vec<_>>(),
            "Requesting ranking"
        );

        let answer = tokio::time::timeout(self.timeout, self.provider.complete(&completion))
            .await
            .map_err(|_| RankingError::Timeout(self.timeout))??;

        tracing::info!(answer = %answer, "Ranking answer received");

        parse_choice(&answer, candidates.len())
    }
}

/// Renders the numbered candidate list with two sampled hints
pub fn build_prompt<R: Rng + ?Sized>(
    request: &str,
    candidates: &[&VenueRecord],
    rng: &mut R,
) -> String {
    let options = candidates
        .iter()
        .enumerate()
        .map(|(i, venue)| {
            format!(
                "Option {}:\n- Name: {}\n- Cuisine: {}\n- Atmosphere: {}\n- Suitable for: {}",
                i + 1,
                venue.name.as_deref().unwrap_or("Unnamed"),
                venue.cuisine.as_deref().unwrap_or("Not specified"),
                venue.vibe.as_deref().unwrap_or("Not described"),
                venue.aim.as_deref().unwrap_or("Not specified"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let hints: String = HINTS
        .choose_multiple(rng, HINTS_PER_PROMPT)
        .map(|hint| format!("- {hint}\n"))
        .collect();

    format!(
        "REQUEST: \"{request}\"\n\n\
         VENUE OPTIONS:\n{options}\n\n\
         SELECTION RULES:\n\
         - Read the request carefully for keywords\n\
         {hints}\
         - Do NOT always pick the first option\n\
         - Consider ALL options before choosing\n\n\
         Return the number of the best option (1-{})",
        candidates.len()
    )
}

/// Reads the first decimal number anywhere in the answer as a 1-based choice
pub fn parse_choice(answer: &str, len: usize) -> Result<usize, RankingError> {
    let digits = FIRST_NUMBER
        .find(answer)
        .ok_or_else(|| RankingError::NoIndex(answer.to_string()))?
        .as_str();

    match digits.parse::<usize>() {
        Ok(index) if (1..=len).contains(&index) => Ok(index),
        _ => Err(RankingError::OutOfRange {
            index: digits.to_string(),
            len,
        }),
    }
}
