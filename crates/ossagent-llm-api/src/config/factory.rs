use std::sync::Arc;

use crate::client::{openai_compat::OpenAiCompatClient, LlmClient, RequestLogging};
use crate::config::EndpointConfig;
use crate::error::LlmError;

/// Client factory for creating LLM clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create an LLM client for the configured endpoint
    ///
    /// # Arguments
    /// * `config` - Endpoint, model and sampling settings; validated first
    /// * `logging` - Console and file logging of HTTP traffic
    ///
    /// # Returns
    /// Arc-wrapped LLM client implementing the LlmClient trait
    pub fn create(config: EndpointConfig, logging: RequestLogging) -> Result<Arc<dyn LlmClient>, LlmError> {
        config.validate()?;
        Ok(Arc::new(OpenAiCompatClient::with_logging(config, logging)?))
    }
}
