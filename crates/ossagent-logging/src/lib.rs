// Logging module - conversation and request logging
pub mod conversation_logger;
pub mod request_logger;

use std::path::PathBuf;
use anyhow::{Result, Context};

pub use conversation_logger::ConversationLogger;

pub use request_logger::{
    log_request,
    log_request_to_file,
    log_response,
    log_response_to_file,
    mask_api_key,
};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// First `max_chars` characters followed by "..." when anything was cut
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}

/// Get or create the base ossagent directory (~/.ossagent)
pub fn get_ossagent_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let ossagent_dir = PathBuf::from(home_dir).join(".ossagent");

    if !ossagent_dir.exists() {
        std::fs::create_dir_all(&ossagent_dir)
            .context("Failed to create ossagent directory")?;
    }

    Ok(ossagent_dir)
}

/// Get or create the logs directory (~/.ossagent/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_ossagent_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir)
            .context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}
