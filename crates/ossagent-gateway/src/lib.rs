//! Client side of an external tool gateway (for example an MCP gateway
//! exposing its tools over plain HTTP).
//!
//! The gateway owns the tool protocol and its security policy; this crate
//! only discovers what is available (`GET /tools`) and forwards invocations
//! (`POST /call`).

pub mod catalog;
pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use catalog::{ToolCatalog, ToolInfo, NO_DESCRIPTION};
pub use client::{GatewayClient, DEFAULT_GATEWAY_URL};

/// Errors talking to the tool gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid gateway URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("tool gateway unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("tool gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response from tool gateway: {0}")]
    Malformed(String),
}

/// Anything that can list and run tools on an agent's behalf
#[async_trait]
pub trait ToolGateway: Send + Sync {
    /// Tools the gateway currently offers
    async fn discover(&self) -> Result<ToolCatalog, GatewayError>;

    /// Run one tool and return its JSON result
    async fn call_tool(&self, name: &str, parameters: serde_json::Value) -> Result<serde_json::Value, GatewayError>;
}
