use async_trait::async_trait;
use colored::Colorize;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;

use ossagent_logging::{log_request, log_request_to_file, log_response, log_response_to_file};
use ossagent_models::{ChatRequest, ChatResponse, Message, ModelInfo, ModelList, Tool};

use crate::client::{LlmClient, LlmResponse, RequestLogging};
use crate::config::EndpointConfig;
use crate::error::LlmError;

/// Client for any server exposing the OpenAI-compatible chat-completions API
pub struct OpenAiCompatClient {
    config: EndpointConfig,
    client: reqwest::Client,
    logging: RequestLogging,
}

impl OpenAiCompatClient {
    pub fn new(config: EndpointConfig) -> Result<Self, LlmError> {
        Self::with_logging(config, RequestLogging::default())
    }

    pub fn with_logging(config: EndpointConfig, logging: RequestLogging) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client, logging })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    fn build_chat_request(&self, messages: Vec<Message>, tools: Vec<Tool>) -> ChatRequest {
        let mut request = ChatRequest::new(self.config.model_name.clone(), messages).with_tools(tools);
        request.max_tokens = Some(self.config.max_tokens);
        request.temperature = Some(self.config.temperature);
        request
    }

    /// POST the request, retrying on 429 up to `max_retries` times
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = self.config.chat_completions_url();
        let api_key = self.config.api_key.as_deref();
        let mut retry_count = 0;

        loop {
            let timestamp = chrono::Utc::now().timestamp_millis();
            log_request(&url, request, api_key, self.logging.verbose);
            if let Some(dir) = &self.logging.logs_dir {
                match log_request_to_file(dir, &url, request, api_key, timestamp) {
                    Ok(path) => eprintln!("{}", format!("📝 Request logged to: {}", path.display()).bright_blue()),
                    Err(e) => eprintln!("{} {}", "⚠️".yellow(), e),
                }
            }

            let mut builder = self.client
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .json(request);
            if let Some(key) = api_key {
                builder = builder.bearer_auth(key);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| LlmError::from_transport(&url, e))?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .text()
                .await
                .map_err(|e| LlmError::from_transport(&url, e))?;

            log_response(&status, &headers, &body, self.logging.verbose);
            if let Some(dir) = &self.logging.logs_dir {
                match log_response_to_file(dir, &status, &headers, &body, timestamp, &request.model) {
                    Ok(path) => eprintln!("{}", format!("📄 Response logged to: {}", path.display()).bright_blue()),
                    Err(e) => eprintln!("{} {}", "⚠️".yellow(), e),
                }
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if retry_count >= self.config.max_retries {
                    return Err(LlmError::RateLimited { retries: retry_count });
                }

                let wait_time = Duration::from_secs(2u64.pow(retry_count));
                eprintln!(
                    "{} Rate limited. Waiting {} seconds before retry {}/{}...",
                    "⏳".yellow(),
                    wait_time.as_secs(),
                    retry_count + 1,
                    self.config.max_retries
                );
                sleep(wait_time).await;
                retry_count += 1;
                continue;
            }

            if !status.is_success() {
                return Err(LlmError::Status { status: status.as_u16(), body });
            }

            return serde_json::from_str::<ChatResponse>(&body)
                .map_err(|e| LlmError::Malformed(e.to_string()));
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    async fn chat(&self, messages: Vec<Message>, tools: Vec<Tool>) -> Result<LlmResponse, LlmError> {
        let request = self.build_chat_request(messages, tools);
        let chat_response = self.send(&request).await?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        if choice.message.content.trim().is_empty() && !choice.message.has_tool_calls() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(LlmResponse {
            message: choice.message,
            usage: chat_response.usage,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = self.config.models_url();

        let mut builder = self.client.get(&url);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::from_transport(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::from_transport(&url, e))?;

        if !status.is_success() {
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let list: ModelList = serde_json::from_str(&body)
            .map_err(|e| LlmError::Malformed(e.to_string()))?;
        Ok(list.data)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}
