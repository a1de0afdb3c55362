use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use ossagent_models::ReasoningLevel;

use crate::error::ConfigError;

pub mod factory;
pub use factory::ClientFactory;

/// Local model runner's llama.cpp engine, OpenAI-compatible
pub const DEFAULT_MODEL_URL: &str = "http://localhost:12434/engines/llama.cpp/v1";

/// Default model for the single chat agent
pub const DEFAULT_MODEL_NAME: &str = "ai/gpt-oss";

/// Default model for crews
pub const CREW_MODEL_NAME: &str = "ai/gpt-oss-20b";

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const CREW_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CREW_TIMEOUT_SECS: u64 = 60;

// Environment variable names
pub const ENV_MODEL_URL: &str = "MODEL_URL";
pub const ENV_MODEL_NAME: &str = "MODEL_NAME";
pub const ENV_REASONING_LEVEL: &str = "REASONING_LEVEL";
pub const ENV_MAX_TOKENS: &str = "MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "MODEL_TIMEOUT_SECS";
pub const ENV_API_KEY: &str = "MODEL_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MAX_RETRIES: &str = "MODEL_MAX_RETRIES";

/// Connection and sampling settings for one model endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub model_url: String,
    pub model_name: String,
    pub reasoning_level: ReasoningLevel,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub api_key: Option<String>,
    /// Retries on HTTP 429, with exponential back-off
    pub max_retries: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            reasoning_level: ReasoningLevel::Medium,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
            max_retries: 0,
        }
    }
}

impl EndpointConfig {
    /// Defaults for multi-agent crews: larger model, longer answers, longer timeout
    pub fn crew_defaults() -> Self {
        Self {
            model_name: CREW_MODEL_NAME.to_string(),
            max_tokens: CREW_MAX_TOKENS,
            timeout: Duration::from_secs(CREW_TIMEOUT_SECS),
            ..Self::default()
        }
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay(|key| env::var(key).ok())
    }

    /// Overlay values from `lookup` (usually the environment) onto `self`.
    /// Blank values count as unset.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_MODEL_URL) {
            self.model_url = url;
        }
        if let Some(name) = get(ENV_MODEL_NAME) {
            self.model_name = name;
        }
        if let Some(level) = parse_var::<ReasoningLevel>(ENV_REASONING_LEVEL, get(ENV_REASONING_LEVEL))? {
            self.reasoning_level = level;
        }
        if let Some(max_tokens) = parse_var::<u32>(ENV_MAX_TOKENS, get(ENV_MAX_TOKENS))? {
            self.max_tokens = max_tokens;
        }
        if let Some(temperature) = parse_var::<f32>(ENV_TEMPERATURE, get(ENV_TEMPERATURE))? {
            self.temperature = temperature;
        }
        if let Some(secs) = parse_var::<u64>(ENV_TIMEOUT_SECS, get(ENV_TIMEOUT_SECS))? {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var::<u32>(ENV_MAX_RETRIES, get(ENV_MAX_RETRIES))? {
            self.max_retries = retries;
        }
        if let Some(key) = get(ENV_API_KEY).or_else(|| get(ENV_OPENAI_API_KEY)) {
            self.api_key = Some(key);
        }

        Ok(self)
    }

    /// Reject configurations that could never produce a working request
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.model_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.model_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.model_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.model_name.trim().is_empty() {
            return Err(ConfigError::EmptyModelName);
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }

    pub fn chat_completions_url(&self) -> String {
        normalize_api_url(&self.model_url)
    }

    pub fn models_url(&self) -> String {
        models_api_url(&self.model_url)
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Normalize API URL so it names the chat-completions endpoint.
///
/// A URL already ending in `/chat/completions` is kept; a base ending in
/// `/v1` gets `/chat/completions`; anything else gets `/v1/chat/completions`.
pub fn normalize_api_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else if trimmed.ends_with("/v1") {
        format!("{}/chat/completions", trimmed)
    } else {
        format!("{}/v1/chat/completions", trimmed)
    }
}

/// URL of the model listing endpoint for the same base
pub fn models_api_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let base = trimmed.strip_suffix("/chat/completions").unwrap_or(trimmed);
    if base.ends_with("/v1") {
        format!("{}/models", base)
    } else {
        format!("{}/v1/models", base)
    }
}
