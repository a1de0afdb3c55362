use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use ossagent_gateway::{GatewayError, ToolCatalog, ToolGateway};
use ossagent_llm_api::{LlmClient, LlmError};
use ossagent_logging::preview;
use ossagent_models::{Message, Tool};

use crate::crew_agent::CrewAgent;
use crate::directive::ToolDirective;

/// Characters of each step result echoed while a workflow runs
pub const RESULT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("agent '{0}' not found")]
    UnknownAgent(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Knobs for how a crew talks to the model
#[derive(Debug, Clone, PartialEq)]
pub struct CrewSettings {
    /// How many tool round-trips one task may take before its answer is final
    pub max_tool_rounds: usize,
    /// Agent history messages replayed with each task
    pub history_window: usize,
    /// Offer each agent's tools as native function definitions
    pub native_tools: bool,
    /// Print progress lines on stdout
    pub progress: bool,
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self {
            max_tool_rounds: 1,
            history_window: 6,
            native_tools: false,
            progress: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStep {
    pub agent: String,
    pub task: String,
}

impl WorkflowStep {
    pub fn new(agent: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            task: task.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// `step_{n}_{agent}`, numbered from 1
    pub key: String,
    pub agent: String,
    pub task: String,
    pub result: String,
    pub succeeded: bool,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub steps: Vec<WorkflowStep>,
    pub results: Vec<StepResult>,
    pub timestamp: DateTime<Local>,
}

impl WorkflowReport {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }
}

/// A named set of agents sharing one model client and, optionally, a tool gateway
pub struct Crew {
    client: Arc<dyn LlmClient>,
    gateway: Option<Arc<dyn ToolGateway>>,
    catalog: ToolCatalog,
    agents: HashMap<String, CrewAgent>,
    settings: CrewSettings,
    runs: Vec<WorkflowReport>,
}

impl Crew {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            gateway: None,
            catalog: ToolCatalog::new(),
            agents: HashMap::new(),
            settings: CrewSettings::default(),
            runs: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: CrewSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Attach a tool gateway and discover its tools.
    ///
    /// Discovery failures leave the crew with an empty catalog; tool calls
    /// are still forwarded.
    pub async fn with_gateway(mut self, gateway: Arc<dyn ToolGateway>) -> Self {
        match gateway.discover().await {
            Ok(catalog) if catalog.is_empty() => {
                eprintln!("{}", "⚠️  No gateway tools available".yellow());
            }
            Ok(catalog) => {
                if self.settings.progress {
                    println!("{} Discovered {} gateway tools", "✅".green(), catalog.len());
                }
                self.catalog = catalog;
            }
            Err(GatewayError::Status { status, .. }) => {
                eprintln!("{} (HTTP {})", "⚠️  No gateway tools available".yellow(), status);
            }
            Err(e) => {
                eprintln!("{} Failed to connect to tool gateway: {}", "❌".red(), e);
            }
        }
        self.gateway = Some(gateway);
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Register `agent` under `name`, replacing any agent of that name
    pub fn add_agent(&mut self, name: impl Into<String>, agent: CrewAgent) {
        let name = name.into();
        if self.settings.progress {
            println!("{} Added agent: {} ({})", "➕".green(), name.bold(), agent.role);
        }
        self.agents.insert(name, agent);
    }

    pub fn agent(&self, name: &str) -> Option<&CrewAgent> {
        self.agents.get(name)
    }

    /// Reports of every workflow run so far, oldest first
    pub fn runs(&self) -> &[WorkflowReport] {
        &self.runs
    }

    /// Have one agent carry out `task`, resolving tool requests along the way
    pub async fn execute_agent_task(&mut self, name: &str, task: &str, context: &str) -> Result<String, CrewError> {
        let agent = self
            .agents
            .get(name)
            .ok_or_else(|| CrewError::UnknownAgent(name.to_string()))?;

        let task_prompt = if context.is_empty() {
            format!("Task: {}", task)
        } else {
            format!("Task: {}\n\nContext from previous agents: {}", task, context)
        };

        let mut messages = vec![Message::system(agent.system_prompt())];
        messages.extend(agent.recent_history(self.settings.history_window).iter().cloned());
        messages.push(Message::user(task_prompt.clone()));

        let tools: Vec<Tool> = if self.settings.native_tools {
            self.catalog.definitions(&agent.tools)
        } else {
            Vec::new()
        };

        let mut reply = self.client.chat(messages.clone(), tools.clone()).await?.message;

        for _ in 0..self.settings.max_tool_rounds {
            if reply.has_tool_calls() {
                let calls = reply.tool_calls.clone().unwrap_or_default();
                messages.push(reply.clone());
                for call in calls {
                    let result = match call.function.parsed_arguments() {
                        Ok(arguments) => self.invoke_tool(&call.function.name, arguments).await,
                        Err(e) => json!({"error": format!("Invalid tool arguments: {}", e)}),
                    };
                    messages.push(Message::tool_result(call.id, call.function.name, result.to_string()));
                }
            } else if let Some(directive) = ToolDirective::parse(&reply.content) {
                let result = self.invoke_tool(&directive.tool, directive.parameters).await;
                messages.push(Message::assistant(reply.content.clone()));
                messages.push(Message::user(format!(
                    "Tool result: Tool {} returned: {}. Please provide your final response.",
                    directive.tool, result
                )));
            } else {
                break;
            }

            reply = self.client.chat(messages.clone(), tools.clone()).await?.message;
        }

        let answer = reply.content;
        if let Some(agent) = self.agents.get_mut(name) {
            agent.record(task_prompt, answer.clone());
        }
        Ok(answer)
    }

    /// Run `steps` in order, feeding each result to the following steps as context
    pub async fn execute_workflow(&mut self, steps: &[WorkflowStep]) -> WorkflowReport {
        let progress = self.settings.progress;
        if progress {
            println!("\n{} Starting crew workflow with {} tasks", "🚀".bold(), steps.len());
            println!("{}", "=".repeat(60));
        }

        let mut results = Vec::with_capacity(steps.len());
        let mut context = String::new();

        for (i, step) in steps.iter().enumerate() {
            let index = i + 1;
            if progress {
                println!("\n📋 Step {}: {}", index, step.agent.bold());
                println!("Task: {}", step.task);
                println!("{}", "-".repeat(40));
            }

            let (result, succeeded) = match self.execute_agent_task(&step.agent, &step.task, &context).await {
                Ok(answer) => (answer, true),
                Err(e) => (format!("Error: {}", e), false),
            };

            if !succeeded {
                eprintln!("{} Result: {}", "❌".red(), preview(&result, RESULT_PREVIEW_CHARS).red());
            } else if progress {
                println!("{} Result: {}", "✅".green(), preview(&result, RESULT_PREVIEW_CHARS));
            }

            context.push_str(&format!("\n{} completed: {}\n", step.agent, result));

            results.push(StepResult {
                key: format!("step_{}_{}", index, step.agent),
                agent: step.agent.clone(),
                task: step.task.clone(),
                result,
                succeeded,
                timestamp: Local::now(),
            });
        }

        let report = WorkflowReport {
            steps: steps.to_vec(),
            results,
            timestamp: Local::now(),
        };
        self.runs.push(report.clone());
        report
    }

    async fn invoke_tool(&self, tool: &str, parameters: Value) -> Value {
        let Some(gateway) = &self.gateway else {
            return json!({"error": "No tool gateway configured"});
        };

        if self.settings.progress {
            println!("{} Calling tool {}", "🔧".cyan(), tool.bold());
        }
        match gateway.call_tool(tool, parameters).await {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{} Tool {} failed: {}", "⚠️".yellow(), tool, e);
                json!({"error": format!("Tool call failed: {}", e)})
            }
        }
    }
}

/// Default subject of the research workflow
pub const DEFAULT_RESEARCH_TOPIC: &str = "AI agent development trends";

/// Staff `crew` with a researcher, an analyst and a writer
pub fn research_crew(mut crew: Crew) -> Crew {
    crew.add_agent(
        "researcher",
        CrewAgent::new(
            "Senior Research Analyst",
            "Conduct thorough research on given topics using available tools",
            "You are an experienced researcher with access to web search and data analysis tools.",
        )
        .with_tools(["web_search", "duckduckgo", "wikipedia"]),
    );
    crew.add_agent(
        "analyst",
        CrewAgent::new(
            "Data Analyst",
            "Analyze and synthesize research findings into insights",
            "You specialize in analyzing complex information and extracting key insights.",
        )
        .with_tools(["data_analysis", "statistics"]),
    );
    crew.add_agent(
        "writer",
        CrewAgent::new(
            "Technical Writer",
            "Create clear, comprehensive reports from research and analysis",
            "You excel at translating complex research into accessible, well-structured content.",
        )
        .with_tools(["document_generation"]),
    );
    crew
}

pub fn research_workflow(topic: &str) -> Vec<WorkflowStep> {
    let topic = match topic.trim() {
        "" => DEFAULT_RESEARCH_TOPIC,
        t => t,
    };

    vec![
        WorkflowStep::new(
            "researcher",
            format!(
                "Research the latest developments in {}. Find key trends, technologies, and industry insights.",
                topic
            ),
        ),
        WorkflowStep::new(
            "analyst",
            format!(
                "Analyze the research findings about {}. Identify patterns, opportunities, and potential challenges.",
                topic
            ),
        ),
        WorkflowStep::new(
            "writer",
            format!(
                "Create a comprehensive report on {} based on the research and analysis. \
                 Include executive summary, key findings, and recommendations.",
                topic
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_workflow_steps() {
        let steps = research_workflow("vector databases");

        let agents: Vec<&str> = steps.iter().map(|s| s.agent.as_str()).collect();
        assert_eq!(agents, vec!["researcher", "analyst", "writer"]);
        assert!(steps.iter().all(|s| s.task.contains("vector databases")));
    }

    #[test]
    fn test_blank_topic_uses_default() {
        let steps = research_workflow("   ");
        assert!(steps[0].task.contains(DEFAULT_RESEARCH_TOPIC));
    }

    #[test]
    fn test_default_settings() {
        let settings = CrewSettings::default();
        assert_eq!(settings.max_tool_rounds, 1);
        assert_eq!(settings.history_window, 6);
        assert!(!settings.native_tools);
        assert!(settings.progress);
    }
}
