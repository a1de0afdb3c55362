//! ossagent application library
//!
//! Command-line front end over the agents crate: an interactive chat
//! session, one-shot prompts, an endpoint health check and the research
//! crew workflow.

pub use ossagent_agents as agents;
pub use ossagent_gateway as gateway;
pub use ossagent_llm_api as llm_api;
pub use ossagent_logging as logging;
pub use ossagent_models as models;

pub mod app;
pub mod cli;

pub use cli::{Cli, Commands};
