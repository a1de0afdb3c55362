use std::sync::Arc;

use ossagent_llm_api::{LlmClient, LlmError};
use ossagent_models::{Message, ReasoningLevel};

/// Messages kept between turns (user and assistant alike)
pub const HISTORY_LIMIT: usize = 10;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

pub const THINK_SYSTEM_PROMPT: &str = "You are an expert problem solver. Break down complex tasks into steps, \
analyze each component carefully, and provide detailed reasoning for your approach.";

/// Conversational agent with a rolling history window
pub struct ChatAgent {
    client: Arc<dyn LlmClient>,
    reasoning_level: ReasoningLevel,
    history: Vec<Message>,
}

impl ChatAgent {
    pub fn new(client: Arc<dyn LlmClient>, reasoning_level: ReasoningLevel) -> Self {
        Self {
            client,
            reasoning_level,
            history: Vec::new(),
        }
    }

    pub fn reasoning_level(&self) -> ReasoningLevel {
        self.reasoning_level
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Send `input` with the conversation so far and remember the exchange
    pub async fn chat(&mut self, input: &str, system_prompt: Option<&str>) -> Result<String, LlmError> {
        self.chat_at(input, system_prompt, self.reasoning_level).await
    }

    /// Answer `task` with the problem-solver prompt at `level`.
    ///
    /// The agent's own reasoning level is left as it was.
    pub async fn think(&mut self, task: &str, level: ReasoningLevel) -> Result<String, LlmError> {
        self.chat_at(task, Some(THINK_SYSTEM_PROMPT), level).await
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    async fn chat_at(
        &mut self,
        input: &str,
        system_prompt: Option<&str>,
        level: ReasoningLevel,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(system_message(system_prompt, level));
        messages.extend(self.history.iter().cloned());
        messages.push(Message::user(input));

        let answer = self.client.chat_completion(&messages).await?;

        self.history.push(Message::user(input));
        self.history.push(Message::assistant(answer.clone()));
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }

        Ok(answer)
    }
}

fn system_message(system_prompt: Option<&str>, level: ReasoningLevel) -> Message {
    match system_prompt {
        Some(prompt) => Message::system(format!("{}\nReasoning: {}", prompt, level)),
        None => Message::system(format!("{} Reasoning: {}", DEFAULT_SYSTEM_PROMPT, level)),
    }
}
