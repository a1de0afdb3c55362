use clap::{Parser, Subcommand};
use clap_complete::Shell;

use ossagent_gateway::DEFAULT_GATEWAY_URL;
use ossagent_models::ReasoningLevel;


/// CLI arguments for ossagent
#[derive(Parser, Debug)]
#[command(name = "ossagent")]
#[command(about = "Agent client for a local OpenAI-compatible model endpoint, with optional tool gateway")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model endpoint base URL (default: $MODEL_URL, then the local model runner)
    #[arg(long, value_name = "URL")]
    pub model_url: Option<String>,

    /// Model to request (default: $MODEL_NAME)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Reasoning level hint: low, medium or high (default: $REASONING_LEVEL)
    #[arg(long, value_name = "LEVEL")]
    pub reasoning: Option<ReasoningLevel>,

    /// Maximum tokens per reply (default: $MAX_TOKENS)
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature, 0.0 to 2.0 (default: $TEMPERATURE)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Request timeout in seconds (default: $MODEL_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// API key sent as a bearer token (default: $MODEL_API_KEY or $OPENAI_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Tool gateway base URL
    #[arg(long, value_name = "URL", env = "MCP_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    pub gateway_url: String,

    /// Enable verbose debug output (shows HTTP requests, responses, headers, etc.)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write every request and response to ~/.ossagent/logs
    #[arg(long)]
    pub log_requests: bool,

    /// Record the conversation as JSONL under ./logs
    #[arg(long)]
    pub transcript: bool,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Send one prompt and print the answer
    Ask {
        /// Prompt text
        prompt: String,
        /// System prompt to use instead of the default
        #[arg(long, value_name = "PROMPT")]
        system: Option<String>,
    },
    /// Work through a task with the problem-solver prompt
    Think {
        /// Task to reason about
        task: String,
        /// Reasoning level for this request
        #[arg(long, default_value = "high")]
        level: ReasoningLevel,
    },
    /// Check that the endpoint answers and serves the model
    Check,
    /// Run the research crew (researcher, analyst, writer)
    Crew {
        /// Research topic (prompted for when omitted on a terminal)
        #[arg(long)]
        topic: Option<String>,
        /// Print the workflow report as JSON
        #[arg(long)]
        json: bool,
        /// Pretty-print the JSON report (only useful with --json)
        #[arg(long)]
        pretty: bool,
        /// Offer gateway tools as native function definitions
        #[arg(long)]
        native_tools: bool,
        /// Tool round-trips allowed per task
        #[arg(long, value_name = "N", default_value_t = 1)]
        max_tool_rounds: usize,
        /// Run without the tool gateway
        #[arg(long)]
        no_gateway: bool,
    },
}

impl Cli {
    pub fn is_crew(&self) -> bool {
        matches!(self.command, Some(Commands::Crew { .. }))
    }
}
