//! # ossagent-llm-api
//!
//! Client for a locally hosted model served behind an OpenAI-compatible
//! chat-completions endpoint (llama.cpp, a local model runner, vLLM, ...).
//!
//! ## Features
//!
//! - **Unified Interface**: Single `LlmClient` trait, so agents can be driven by a fake in tests
//! - **Environment Configuration**: `MODEL_URL`, `MODEL_NAME`, `REASONING_LEVEL` and friends
//! - **Endpoint Probe**: Check that the endpoint answers and the model is pulled
//! - **Request Logging**: Console dumps and per-request log files for debugging
//!
//! ## Example
//!
//! ```rust,no_run
//! use ossagent_llm_api::{ClientFactory, EndpointConfig, RequestLogging};
//! use ossagent_models::Message;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EndpointConfig::from_env()?;
//!     let client = ClientFactory::create(config, RequestLogging::default())?;
//!
//!     let answer = client
//!         .chat_completion(&[Message::user("Hello!")])
//!         .await?;
//!     println!("Response: {}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod probe;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use client::{
    LlmClient,
    LlmResponse,
    RequestLogging,
    openai_compat::OpenAiCompatClient,
};

pub use config::{
    ClientFactory,
    EndpointConfig,
    normalize_api_url,
    models_api_url,
    DEFAULT_MODEL_URL,
    DEFAULT_MODEL_NAME,
    CREW_MODEL_NAME,
};

pub use error::{ConfigError, LlmError};
pub use probe::{probe_endpoint, EndpointStatus};
