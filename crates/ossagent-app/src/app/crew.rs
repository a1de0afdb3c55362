use anyhow::{bail, Context, Result};
use colored::Colorize;
use rustyline::DefaultEditor;
use std::io::IsTerminal;
use std::sync::Arc;

use ossagent_agents::{research_crew, research_workflow, Crew, CrewSettings, WorkflowReport, DEFAULT_RESEARCH_TOPIC};
use ossagent_gateway::GatewayClient;
use ossagent_llm_api::ClientFactory;
use ossagent_logging::ConversationLogger;

use super::setup::AppConfig;

/// How the `crew` subcommand should run
#[derive(Debug, Clone)]
pub struct CrewOptions {
    pub topic: Option<String>,
    pub json: bool,
    pub pretty: bool,
    pub native_tools: bool,
    pub max_tool_rounds: usize,
    pub use_gateway: bool,
    pub transcript: bool,
}

/// Run the research workflow and print its report
pub async fn run_crew(app: AppConfig, options: CrewOptions) -> Result<()> {
    // With --json, stdout carries only the report
    if !options.json {
        println!("{}", "🤖 Multi-Agent Research Crew".bright_cyan().bold());
        println!("{}", format!("Model: {} at {}", app.endpoint.model_name, app.endpoint.model_url).bright_black());
        println!("{}", "=".repeat(50));
    }

    let topic = match options.topic.clone() {
        Some(topic) => topic,
        None => prompt_for_topic()?,
    };

    let client = ClientFactory::create(app.endpoint.clone(), app.logging.clone())?;
    let settings = CrewSettings {
        max_tool_rounds: options.max_tool_rounds,
        native_tools: options.native_tools,
        progress: !options.json,
        ..CrewSettings::default()
    };

    let mut crew = Crew::new(client).with_settings(settings);
    if options.use_gateway {
        let gateway = GatewayClient::new(&app.gateway_url).context("Invalid tool gateway URL")?;
        crew = crew.with_gateway(Arc::new(gateway)).await;
    }
    let mut crew = research_crew(crew);

    let report = crew.execute_workflow(&research_workflow(&topic)).await;

    if options.json {
        let output = if options.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", output);
    } else {
        print_report(&report);
    }

    if options.transcript {
        record_transcript(&app, &report).await;
    }

    if !report.all_succeeded() {
        let failed = report.results.iter().filter(|r| !r.succeeded).count();
        bail!("{} of {} crew steps failed", failed, report.results.len());
    }
    Ok(())
}

fn prompt_for_topic() -> Result<String> {
    if !std::io::stdin().is_terminal() {
        return Ok(DEFAULT_RESEARCH_TOPIC.to_string());
    }

    let mut rl = DefaultEditor::new()?;
    let topic = rl.readline("\n📝 Enter research topic: ").unwrap_or_default();
    let topic = topic.trim();
    Ok(if topic.is_empty() {
        DEFAULT_RESEARCH_TOPIC.to_string()
    } else {
        topic.to_string()
    })
}

async fn record_transcript(app: &AppConfig, report: &WorkflowReport) {
    let mut logger = match ConversationLogger::new_task_mode(&app.work_dir).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Task logging disabled: {}", e);
            return;
        }
    };

    for step in &report.results {
        logger.log("user", &step.task, None, Some(&step.agent)).await;
        let role = if step.succeeded { "assistant" } else { "error" };
        logger
            .log(role, &step.result, Some(&app.endpoint.model_name), Some(&step.agent))
            .await;
    }
    logger.shutdown().await;
}

fn print_report(report: &WorkflowReport) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "📊 FINAL CREW RESULTS".bright_cyan().bold());
    println!("{}", "=".repeat(60));

    for step in &report.results {
        let marker = if step.succeeded { "🔍".normal() } else { "❌".red() };
        println!("\n{} {}", marker, step.key.to_uppercase().bold());
        println!("Task: {}", step.task);
        println!("Result: {}", step.result);
        println!("{}", format!("Completed: {}", step.timestamp.format("%Y-%m-%d %H:%M:%S")).bright_black());
        println!("{}", "-".repeat(40));
    }
}
