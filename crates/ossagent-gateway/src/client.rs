use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::{GatewayError, ToolCatalog, ToolGateway};

/// Where a locally composed MCP gateway listens by default
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";

const GATEWAY_TIMEOUT_SECS: u64 = 60;

#[derive(Serialize)]
struct CallRequest<'a> {
    tool: &'a str,
    parameters: Value,
}

/// HTTP client for the tool gateway
pub struct GatewayClient {
    base_url: String,
    http_client: HttpClient,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| GatewayError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(GATEWAY_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Unreachable { url: base_url.to_string(), source: e })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    async fn read_json(&self, url: &str, response: reqwest::Response) -> Result<Value, GatewayError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| GatewayError::Unreachable {
            url: url.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ToolGateway for GatewayClient {
    async fn discover(&self) -> Result<ToolCatalog, GatewayError> {
        let url = format!("{}/tools", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable { url: url.clone(), source: e })?;

        let body = self.read_json(&url, response).await?;
        ToolCatalog::from_json(&body)
    }

    async fn call_tool(&self, name: &str, parameters: Value) -> Result<Value, GatewayError> {
        let url = format!("{}/call", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&CallRequest { tool: name, parameters })
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable { url: url.clone(), source: e })?;

        self.read_json(&url, response).await
    }
}
