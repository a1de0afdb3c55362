// Models module - data structures for the chat-completions API
pub mod types;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use types::{
    Message, ToolCall, FunctionCall, ReasoningLevel, ParseReasoningLevelError,
    ROLE_SYSTEM, ROLE_USER, ROLE_ASSISTANT, ROLE_TOOL,
};
pub use requests::{ChatRequest, Tool, FunctionDef};
pub use responses::{ChatResponse, Choice, Usage, ModelList, ModelInfo};
