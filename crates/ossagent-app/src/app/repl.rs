use anyhow::{bail, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use ossagent_agents::ChatAgent;
use ossagent_llm_api::{probe_endpoint, ClientFactory, LlmError};
use ossagent_logging::ConversationLogger;
use ossagent_models::ReasoningLevel;

use super::check::{print_setup_instructions, print_status};
use super::setup::AppConfig;
use crate::cli::Cli;

enum Turn<'a> {
    Chat(&'a str),
    Think(&'a str),
}

/// Run interactive REPL mode
pub async fn run_repl_mode(cli: &Cli, app: AppConfig) -> Result<()> {
    println!("{}", "🤖 ossagent - local model chat".bright_cyan().bold());
    println!("{}", "=".repeat(40));

    let client = ClientFactory::create(app.endpoint.clone(), app.logging.clone())?;

    let status = probe_endpoint(client.as_ref(), &app.endpoint.model_name).await;
    print_status(&status, &app.endpoint);
    if !status.is_ready() {
        print_setup_instructions(&app.endpoint);
        bail!("Model endpoint at {} is not ready", app.endpoint.model_url);
    }

    let mut agent = ChatAgent::new(client, app.endpoint.reasoning_level);

    let mut logger = if cli.transcript {
        match ConversationLogger::new(&app.work_dir).await {
            Ok(l) => {
                println!("{}", format!("📝 Transcript: {}", l.file_path().display()).bright_black());
                Some(l)
            }
            Err(e) => {
                eprintln!("Logging disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    println!("\n{}", "🚀 Agent initialized successfully!".green().bold());
    println!(
        "{}",
        format!(
            "Model: {} • Reasoning: {}",
            agent.model_name(),
            agent.reasoning_level()
        )
        .bright_black()
    );
    println!(
        "{}",
        "Type 'quit' to exit, 'reset' to clear conversation, or 'think <task>' for complex reasoning".bright_black()
    );
    println!("{}", "-".repeat(60));

    let mut rl = DefaultEditor::new()?;

    // Token of the request in flight, if any; cancelled by Ctrl-C
    let current_token: Arc<Mutex<Option<CancellationToken>>> = Arc::new(Mutex::new(None));
    let current_token_for_handler = current_token.clone();

    tokio::spawn(async move {
        loop {
            if tokio::signal::ctrl_c().await.is_ok() {
                if let Ok(guard) = current_token_for_handler.lock() {
                    if let Some(ref token) = *guard {
                        println!("\n{}", "^C - Interrupting...".bright_yellow());
                        token.cancel();
                    }
                }
            }
        }
    });

    loop {
        let readline = rl.readline(&format!("\n{} ", "👤 You:".bright_green().bold()));

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n{}", "👋 Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let command = line.to_lowercase();
        if command == "quit" || command == "exit" {
            println!("{}", "👋 Goodbye!".bright_cyan());
            break;
        }
        if command == "reset" {
            agent.reset();
            println!("{}", "🔄 Conversation reset!".bright_cyan());
            continue;
        }

        let turn = match line.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("think ") => Turn::Think(line[6..].trim()),
            _ => Turn::Chat(line),
        };

        if let Some(logger) = &mut logger {
            logger.log("user", line, None, None).await;
        }

        let cancel_token = CancellationToken::new();
        if let Ok(mut guard) = current_token.lock() {
            *guard = Some(cancel_token.clone());
        }

        let label = match turn {
            Turn::Think(_) => "🧠 Agent (thinking deeply):".bright_blue().bold(),
            Turn::Chat(_) => "🤖 Agent:".bright_blue().bold(),
        };
        let result = run_turn(&mut agent, turn, &cancel_token).await;

        if let Ok(mut guard) = current_token.lock() {
            *guard = None;
        }

        match result {
            Some(Ok(response)) => {
                if let Some(logger) = &mut logger {
                    logger.log("assistant", &response, Some(agent.model_name()), None).await;
                }
                println!("\n{} {}", label, response);
            }
            Some(Err(e)) => {
                eprintln!("\n{} {}", "❌ Error:".bright_red().bold(), e);
            }
            None => {
                println!("{}", "Operation interrupted by user".bright_yellow());
            }
        }
    }

    if let Some(logger) = &mut logger {
        logger.shutdown().await;
    }

    Ok(())
}

/// Run one turn; `None` when the user interrupted it
async fn run_turn(
    agent: &mut ChatAgent,
    turn: Turn<'_>,
    cancel_token: &CancellationToken,
) -> Option<Result<String, LlmError>> {
    let request = async {
        match turn {
            Turn::Chat(input) => agent.chat(input, None).await,
            Turn::Think(task) => agent.think(task, ReasoningLevel::High).await,
        }
    };

    tokio::select! {
        result = request => Some(result),
        _ = cancel_token.cancelled() => None,
    }
}
