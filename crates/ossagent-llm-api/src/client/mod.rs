use async_trait::async_trait;
use std::path::PathBuf;

use ossagent_models::{Message, ModelInfo, Tool, Usage};

use crate::error::LlmError;

pub mod openai_compat;

/// LLM client trait - the seam between agents and the model endpoint
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Chat with optional tool definitions (non-streaming)
    async fn chat(&self, messages: Vec<Message>, tools: Vec<Tool>) -> Result<LlmResponse, LlmError>;

    /// Simple chat completion without tools, returning only the text
    async fn chat_completion(&self, messages: &[Message]) -> Result<String, LlmError> {
        let response = self.chat(messages.to_vec(), Vec::new()).await?;
        Ok(response.message.content)
    }

    /// Models currently served by the endpoint
    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError>;

    /// Name of the model requests are sent to
    fn model_name(&self) -> &str;
}

/// LLM response structure
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub message: Message,
    pub usage: Option<Usage>,
}

/// Where HTTP traffic gets logged
#[derive(Debug, Clone, Default)]
pub struct RequestLogging {
    /// Dump requests and responses to the console
    pub verbose: bool,
    /// Write `req-*.txt` / `resp-*.txt` files into this directory
    pub logs_dir: Option<PathBuf>,
}
