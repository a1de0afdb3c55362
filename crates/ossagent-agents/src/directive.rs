use regex::Regex;
use serde_json::Value;

/// A model's request to run a tool, written as a JSON reply:
/// `{"action": "use_tool", "tool": "...", "parameters": {...}}`
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDirective {
    pub tool: String,
    pub parameters: Value,
}

const CODE_FENCE: &str = r"(?s)^```[A-Za-z]*\s*\n?(.*?)\n?\s*```$";

impl ToolDirective {
    /// Recognise a tool directive in a model reply.
    ///
    /// Anything that is not a JSON object with `"action": "use_tool"` and a
    /// tool name is an ordinary answer and yields `None`. A reply wrapped in
    /// a single markdown code fence is unwrapped first.
    pub fn parse(reply: &str) -> Option<Self> {
        let trimmed = reply.trim();
        let fence = Regex::new(CODE_FENCE).ok()?;
        let body = match fence.captures(trimmed) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()).trim(),
            None => trimmed,
        };

        if !body.starts_with('{') || !body.contains("action") {
            return None;
        }

        let value: Value = serde_json::from_str(body).ok()?;
        let fields = value.as_object()?;
        if fields.get("action").and_then(Value::as_str) != Some("use_tool") {
            return None;
        }

        let tool = fields.get("tool").and_then(Value::as_str)?.trim();
        if tool.is_empty() {
            return None;
        }

        let parameters = match fields.get("parameters") {
            Some(Value::Null) | None => Value::Object(Default::default()),
            Some(other) => other.clone(),
        };

        Some(Self {
            tool: tool.to_string(),
            parameters,
        })
    }
}
