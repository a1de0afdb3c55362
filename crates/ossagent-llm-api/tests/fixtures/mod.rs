use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ossagent_llm_api::EndpointConfig;

pub const CHAT_PATH: &str = "/engines/llama.cpp/v1/chat/completions";
pub const MODELS_PATH: &str = "/engines/llama.cpp/v1/models";

/// Mock server standing in for a local model runner
pub struct ModelRunnerMock {
    pub server: MockServer,
}

impl ModelRunnerMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Endpoint config pointing at the mock, with a short timeout
    pub fn config(&self) -> EndpointConfig {
        EndpointConfig {
            model_url: format!("{}/engines/llama.cpp/v1", self.server.uri()),
            timeout: Duration::from_secs(5),
            ..EndpointConfig::default()
        }
    }

    pub async fn mock_chat_success(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(content)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_chat_status(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_models(&self, ids: &[&str]) {
        let data: Vec<Value> = ids
            .iter()
            .map(|id| json!({"id": id, "object": "model", "owned_by": "docker"}))
            .collect();
        Mock::given(method("GET"))
            .and(path(MODELS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "list", "data": data})))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every chat request the mock received
    pub async fn chat_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path() == CHAT_PATH)
            .map(|req| serde_json::from_slice(&req.body).unwrap())
            .collect()
    }
}

pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl_test123",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "ai/gpt-oss",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    })
}
