//! Agents for ossagent
//!
//! A single conversational agent with bounded history, and a crew of
//! role-specialised agents that run a sequential workflow and may call
//! tools through an external gateway.

pub mod chat_agent;
pub mod crew;
pub mod crew_agent;
pub mod directive;

// Re-export commonly used types
pub use chat_agent::{ChatAgent, DEFAULT_SYSTEM_PROMPT, HISTORY_LIMIT, THINK_SYSTEM_PROMPT};
pub use crew::{
    research_crew, research_workflow, Crew, CrewError, CrewSettings, StepResult, WorkflowReport, WorkflowStep,
    DEFAULT_RESEARCH_TOPIC, RESULT_PREVIEW_CHARS,
};
pub use crew_agent::CrewAgent;
pub use directive::ToolDirective;
