use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// API key for the chat-completions endpoint used to rank venues
    pub openai_api_key: String,

    /// Base URL of the chat-completions API
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Model name sent with every ranking call
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// CSV export URL of the venue sheet
    pub catalog_url: String,

    /// Hard limit for a single ranking call, in seconds
    #[serde(default = "default_ranking_timeout_secs")]
    pub ranking_timeout_secs: u64,

    /// Age after which an unanswered session is dropped, in seconds
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Fixed seed for shuffling and scoring; entropy when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Emit logs as JSON lines instead of the compact format
    #[serde(default)]
    pub log_json: bool,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_ranking_timeout_secs() -> u64 {
    20
}

fn default_session_ttl_secs() -> u64 {
    3600
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("CATALOG_URL", "https://example.com/sheet.csv"),
        ]))
        .unwrap();

        assert_eq!(config.openai_api_url, "https://api.openai.com/v1");
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.ranking_timeout_secs, 20);
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.port, 8080);
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::from_iter(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("CATALOG_URL", "https://example.com/sheet.csv"),
            ("RANKING_TIMEOUT_SECS", "5"),
            ("RNG_SEED", "7"),
            ("SESSION_TTL_SECS", "600"),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.ranking_timeout_secs, 5);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.session_ttl_secs, 600);
        assert!(config.log_json);
    }

    #[test]
    fn test_missing_catalog_url_fails() {
        let result = envy::from_iter::<_, Config>(vars(&[("OPENAI_API_KEY", "sk-test")]));
        assert!(result.is_err());
    }
}
