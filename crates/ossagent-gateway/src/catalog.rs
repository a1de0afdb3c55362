use std::collections::BTreeMap;

use serde_json::{json, Value};

use ossagent_models::Tool;

use crate::GatewayError;

pub const NO_DESCRIPTION: &str = "No description available";

/// One tool as advertised by the gateway
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInfo {
    pub name: String,
    pub description: Option<String>,
    /// JSON schema of the tool's parameters, when advertised
    pub parameters: Option<Value>,
}

impl ToolInfo {
    fn from_entry(name: String, entry: &Value) -> Self {
        match entry {
            Value::String(description) => Self {
                name,
                description: Some(description.clone()),
                parameters: None,
            },
            Value::Object(fields) => Self {
                name,
                description: fields
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                parameters: ["parameters", "input_schema", "inputSchema"]
                    .iter()
                    .find_map(|key| fields.get(*key))
                    .filter(|schema| schema.is_object())
                    .cloned(),
            },
            _ => Self { name, description: None, parameters: None },
        }
    }
}

/// Tools discovered on the gateway, keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCatalog {
    tools: BTreeMap<String, ToolInfo>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the body of `GET /tools`.
    ///
    /// Accepts an object keyed by tool name, an array of `{name, ...}`
    /// objects, or an object wrapping such an array under `tools`.
    pub fn from_json(body: &Value) -> Result<Self, GatewayError> {
        let mut catalog = Self::new();

        let list = match body {
            Value::Array(items) => Some(items),
            Value::Object(fields) => fields.get("tools").and_then(Value::as_array),
            _ => None,
        };

        match (list, body) {
            (Some(items), _) => {
                for item in items {
                    let name = item
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or_else(|| GatewayError::Malformed("tool entry without a name".to_string()))?;
                    catalog.insert(ToolInfo::from_entry(name.to_string(), item));
                }
            }
            (None, Value::Object(fields)) => {
                for (name, entry) in fields {
                    catalog.insert(ToolInfo::from_entry(name.clone(), entry));
                }
            }
            (None, other) => {
                return Err(GatewayError::Malformed(format!("unexpected tool listing: {}", other)));
            }
        }

        Ok(catalog)
    }

    pub fn insert(&mut self, tool: ToolInfo) {
        self.tools.insert(tool.name.clone(), tool);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ToolInfo> {
        self.tools.get(name)
    }

    /// Tool names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn description(&self, name: &str) -> &str {
        self.tools
            .get(name)
            .and_then(|tool| tool.description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Chat-completion tool definitions for the named tools that exist here
    pub fn definitions(&self, names: &[String]) -> Vec<Tool> {
        names
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                Tool::function(
                    tool.name.clone(),
                    self.description(&tool.name).to_string(),
                    tool.parameters
                        .clone()
                        .unwrap_or_else(|| json!({"type": "object", "properties": {}})),
                )
            })
            .collect()
    }
}
