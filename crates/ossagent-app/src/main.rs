use anyhow::Result;
use clap::{CommandFactory, Parser};

use ossagent::app::{run_ask, run_check, run_crew, run_repl_mode, run_think, setup_from_cli};
use ossagent::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let app_config = setup_from_cli(&cli)?;

    match &cli.command {
        None | Some(Commands::Chat) => run_repl_mode(&cli, app_config).await,
        Some(Commands::Ask { prompt, system }) => run_ask(&cli, app_config, prompt, system.as_deref()).await,
        Some(Commands::Think { task, level }) => run_think(&cli, app_config, task, *level).await,
        Some(Commands::Check) => run_check(app_config).await,
        Some(Commands::Crew {
            topic,
            json,
            pretty,
            native_tools,
            max_tool_rounds,
            no_gateway,
        }) => {
            let options = ossagent::app::CrewOptions {
                topic: topic.clone(),
                json: *json,
                pretty: *pretty,
                native_tools: *native_tools,
                max_tool_rounds: *max_tool_rounds,
                use_gateway: !*no_gateway,
                transcript: cli.transcript,
            };
            run_crew(app_config, options).await
        }
    }
}
