use crate::error::ScenescribeError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};

/// Default chat-completions endpoint (Groq, OpenAI-compatible)
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";

/// Prefix for environment variable overrides (e.g. `SCENESCRIBE_API_KEY`)
pub const ENV_PREFIX: &str = "SCENESCRIBE";

/// SceneScribe run configuration
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// API secret sent as bearer token
    #[serde(alias = "grooq_api_key")]
    pub api_key: String,

    /// Chat-completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Total attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed wait between attempts, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Maximum characters per chunk
    #[serde(default = "default_max_chunk_length")]
    pub max_chunk_length: usize,

    /// Per-request timeout in seconds; unbounded when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_max_chunk_length() -> usize {
    4000
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("max_chunk_length", &self.max_chunk_length)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Create configuration with defaults and the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: default_api_url(),
            model: default_model(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            max_chunk_length: default_max_chunk_length(),
            request_timeout_secs: None,
        }
    }

    /// Load configuration from a JSON file, with `.env` and environment overrides
    ///
    /// Any failure is reported as [`ScenescribeError::ConfigUnavailable`] and
    /// logged; callers treat it as fatal.
    pub fn load(path: &Path) -> Result<Self, ScenescribeError> {
        Self::load_inner(path).map_err(|e| {
            error!("Error loading config from {}: {}", path.display(), e);
            e
        })
    }

    fn load_inner(path: &Path) -> Result<Self, ScenescribeError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Json))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| ScenescribeError::config_unavailable(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ScenescribeError::config_unavailable(e.to_string()))?;

        config.validate()?;
        debug!("Configuration loaded: {:?}", config);

        Ok(config)
    }

    /// Wait between retry attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Per-request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ScenescribeError> {
        if self.api_key.trim().is_empty() {
            return Err(ScenescribeError::config_unavailable("API key cannot be empty"));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ScenescribeError::config_unavailable(
                "API URL must start with http:// or https://",
            ));
        }

        if self.max_retries == 0 {
            return Err(ScenescribeError::config_unavailable(
                "Max retries must be at least 1",
            ));
        }

        if self.max_chunk_length == 0 {
            return Err(ScenescribeError::config_unavailable(
                "Max chunk length must be greater than 0",
            ));
        }

        Ok(())
    }
}
