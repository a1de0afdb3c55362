#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use ossagent_gateway::{GatewayError, ToolCatalog, ToolGateway};
use ossagent_llm_api::{LlmClient, LlmError, LlmResponse};
use ossagent_models::{FunctionCall, Message, ModelInfo, Tool, ToolCall};

/// One request as seen by the scripted client
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<Tool>,
}

/// Client that answers from a queue of canned replies and records every request
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<Message, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, content: &str) -> Arc<Self> {
        self.push(Ok(Message::assistant(content)));
        Arc::clone(self)
    }

    pub fn reply_with_tool_call(self: &Arc<Self>, id: &str, name: &str, arguments: &str) -> Arc<Self> {
        let mut message = Message::assistant("");
        message.tool_calls = Some(vec![ToolCall {
            id: id.to_string(),
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }]);
        self.push(Ok(message));
        Arc::clone(self)
    }

    pub fn fail(self: &Arc<Self>, error: LlmError) -> Arc<Self> {
        self.push(Err(error));
        Arc::clone(self)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was made")
    }

    fn push(&self, reply: Result<Message, LlmError>) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat(&self, messages: Vec<Message>, tools: Vec<Tool>) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest { messages, tools });
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))?;
        Ok(LlmResponse { message: reply, usage: None })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        Ok(Vec::new())
    }

    fn model_name(&self) -> &str {
        "ai/gpt-oss-20b"
    }
}

/// Gateway that answers every call with a fixed result and records the calls
pub struct FakeGateway {
    catalog: ToolCatalog,
    discovery_status: Option<u16>,
    result: Result<Value, u16>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeGateway {
    pub fn returning(catalog: Value, result: Value) -> Arc<Self> {
        Arc::new(Self {
            catalog: ToolCatalog::from_json(&catalog).unwrap(),
            discovery_status: None,
            result: Ok(result),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Every call fails with the given HTTP status
    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            catalog: ToolCatalog::new(),
            discovery_status: None,
            result: Err(status),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Listing tools fails with `status`, calls still succeed with `result`
    pub fn undiscoverable(status: u16, result: Value) -> Arc<Self> {
        Arc::new(Self {
            catalog: ToolCatalog::new(),
            discovery_status: Some(status),
            result: Ok(result),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolGateway for FakeGateway {
    async fn discover(&self) -> Result<ToolCatalog, GatewayError> {
        match self.discovery_status {
            Some(status) => Err(GatewayError::Status {
                status,
                body: "tools unavailable".to_string(),
            }),
            None => Ok(self.catalog.clone()),
        }
    }

    async fn call_tool(&self, name: &str, parameters: Value) -> Result<Value, GatewayError> {
        self.calls.lock().unwrap().push((name.to_string(), parameters));
        match &self.result {
            Ok(value) => Ok(value.clone()),
            Err(status) => Err(GatewayError::Status {
                status: *status,
                body: "gateway down".to_string(),
            }),
        }
    }
}
