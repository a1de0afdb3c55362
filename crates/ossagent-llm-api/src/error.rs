use thiserror::Error;

/// Configuration rejected before any request is made
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid model URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("model name must not be empty")]
    EmptyModelName,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("temperature {0} is outside 0.0..=2.0")]
    InvalidTemperature(f32),
}

/// Failures talking to the model endpoint
#[derive(Debug, Error)]
pub enum LlmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("model endpoint unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("rate limited by model endpoint after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("malformed response from model endpoint: {0}")]
    Malformed(String),

    #[error("model endpoint returned no choices")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl LlmError {
    /// Classify a transport-level reqwest failure
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout { url: url.to_string() }
        } else if err.is_connect() {
            LlmError::Unreachable { url: url.to_string(), source: err }
        } else {
            LlmError::Http(err)
        }
    }
}
