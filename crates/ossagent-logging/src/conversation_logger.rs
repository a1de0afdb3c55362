use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use ossagent_models::Message;

#[derive(Serialize)]
struct ToolCallInfo {
    id: String,
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 Local time
    role: &'a str,
    content: &'a str,
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCallInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_name: Option<&'a str>,
}

/// Appends one JSON object per message to `<workspace>/logs/ossagent-<time>.jsonl`
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current local time.
    pub async fn new(workspace: &Path) -> Result<Self> {
        Self::with_suffix(workspace, "").await
    }

    /// Logger for one-shot subcommands; file name carries a "-task" suffix.
    pub async fn new_task_mode(workspace: &Path) -> Result<Self> {
        Self::with_suffix(workspace, "-task").await
    }

    async fn with_suffix(workspace: &Path, suffix: &str) -> Result<Self> {
        let logs_dir = workspace.join("logs");
        fs::create_dir_all(&logs_dir).await?;

        let filename = format!(
            "ossagent-{}{}.jsonl",
            Local::now().format("%Y-%m-%d-%H%M%S"),
            suffix
        );
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self { file_path, file: Some(file) })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a plain entry.
    pub async fn log(&mut self, role: &str, content: &str, model: Option<&str>, agent_name: Option<&str>) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role,
            content,
            model,
            tool_calls: None,
            tool_call_id: None,
            name: None,
            agent_name,
        };
        self.write_entry(&entry).await;
    }

    /// Append a chat message, keeping its tool call fields.
    pub async fn log_message(&mut self, message: &Message, model: Option<&str>, agent_name: Option<&str>) {
        let tool_calls = message.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|call| ToolCallInfo {
                    id: call.id.clone(),
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                })
                .collect()
        });

        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role: &message.role,
            content: &message.content,
            model,
            tool_calls,
            tool_call_id: message.tool_call_id.as_deref(),
            name: message.name.as_deref(),
            agent_name,
        };
        self.write_entry(&entry).await;
    }

    async fn write_entry(&mut self, entry: &LogEntry<'_>) {
        let Some(file) = &mut self.file else {
            return;
        };
        match serde_json::to_string(entry) {
            Ok(json) => {
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                } else if let Err(e) = file.write_all(b"\n").await {
                    eprintln!("[Logging error] {}", e);
                } else {
                    let _ = file.flush().await;
                }
            }
            Err(e) => eprintln!("[Logging error] {}", e),
        }
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ossagent_models::{FunctionCall, ToolCall};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_entries_are_json_lines() {
        let dir = TempDir::new().unwrap();
        let mut logger = ConversationLogger::new(dir.path()).await.unwrap();

        logger.log("user", "hello", None, None).await;
        let mut reply = Message::assistant("");
        reply.tool_calls = Some(vec![ToolCall {
            id: "call_1".into(),
            tool_type: "function".into(),
            function: FunctionCall { name: "web_search".into(), arguments: "{}".into() },
        }]);
        logger.log_message(&reply, Some("ai/gpt-oss"), Some("researcher")).await;
        logger.shutdown().await;

        let content = std::fs::read_to_string(logger.file_path()).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["role"], "user");
        assert!(lines[0].get("tool_calls").is_none());
        assert_eq!(lines[1]["agent_name"], "researcher");
        assert_eq!(lines[1]["model"], "ai/gpt-oss");
        assert_eq!(lines[1]["tool_calls"][0]["name"], "web_search");
    }

    #[tokio::test]
    async fn test_task_mode_file_name() {
        let dir = TempDir::new().unwrap();
        let logger = ConversationLogger::new_task_mode(dir.path()).await.unwrap();
        let name = logger.file_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("ossagent-"));
        assert!(name.ends_with("-task.jsonl"));
    }
}
