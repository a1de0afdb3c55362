use anyhow::{Context, Result};
use colored::Colorize;

use ossagent_agents::ChatAgent;
use ossagent_llm_api::ClientFactory;
use ossagent_logging::ConversationLogger;
use ossagent_models::{ReasoningLevel, ROLE_ASSISTANT};

use super::setup::AppConfig;
use crate::cli::Cli;

/// One prompt, one answer on stdout
pub async fn run_ask(cli: &Cli, app: AppConfig, prompt: &str, system: Option<&str>) -> Result<()> {
    let mut agent = new_agent(&app)?;
    let answer = agent
        .chat(prompt, system)
        .await
        .context("Model request failed")?;

    println!("{}", answer);
    record_transcript(cli, &app, &agent).await;
    Ok(())
}

/// One task answered with the problem-solver prompt at `level`
pub async fn run_think(cli: &Cli, app: AppConfig, task: &str, level: ReasoningLevel) -> Result<()> {
    if cli.verbose {
        eprintln!("{}", format!("🧠 Thinking at reasoning level {}", level).bright_black());
    }

    let mut agent = new_agent(&app)?;
    let answer = agent
        .think(task, level)
        .await
        .context("Model request failed")?;

    println!("{}", answer);
    record_transcript(cli, &app, &agent).await;
    Ok(())
}

fn new_agent(app: &AppConfig) -> Result<ChatAgent> {
    let client = ClientFactory::create(app.endpoint.clone(), app.logging.clone())?;
    Ok(ChatAgent::new(client, app.endpoint.reasoning_level))
}

async fn record_transcript(cli: &Cli, app: &AppConfig, agent: &ChatAgent) {
    if !cli.transcript {
        return;
    }

    let mut logger = match ConversationLogger::new_task_mode(&app.work_dir).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Task logging disabled: {}", e);
            return;
        }
    };

    for message in agent.history() {
        let model = (message.role == ROLE_ASSISTANT).then(|| agent.model_name());
        logger.log_message(message, model, None).await;
    }
    logger.shutdown().await;
}
