use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use ossagent_llm_api::{EndpointConfig, RequestLogging};
use ossagent_logging::get_logs_dir;

use crate::cli::Cli;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub logging: RequestLogging,
    pub gateway_url: String,
    pub work_dir: PathBuf,
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let base = if cli.is_crew() {
        EndpointConfig::crew_defaults()
    } else {
        EndpointConfig::default()
    };
    let endpoint = endpoint_config(cli, base, |key| env::var(key).ok())?;

    let logs_dir = if cli.log_requests {
        Some(get_logs_dir().context("Failed to create request log directory")?)
    } else {
        None
    };

    Ok(AppConfig {
        endpoint,
        logging: RequestLogging {
            verbose: cli.verbose,
            logs_dir,
        },
        gateway_url: cli.gateway_url.clone(),
        work_dir: env::current_dir().context("Failed to determine working directory")?,
    })
}

/// Precedence: CLI flags > environment (via `lookup`) > `base` defaults
pub fn endpoint_config<F>(cli: &Cli, base: EndpointConfig, lookup: F) -> Result<EndpointConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = base
        .overlay(lookup)
        .context("Invalid model endpoint configuration in environment")?;

    if let Some(url) = &cli.model_url {
        config.model_url = url.clone();
    }
    if let Some(model) = &cli.model {
        config.model_name = model.clone();
    }
    if let Some(level) = cli.reasoning {
        config.reasoning_level = level;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = std::time::Duration::from_secs(secs);
    }
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }

    config
        .validate()
        .context("Invalid model endpoint configuration")?;
    Ok(config)
}
