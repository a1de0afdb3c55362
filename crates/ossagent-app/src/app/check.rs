use anyhow::{bail, Result};
use colored::Colorize;

use ossagent_llm_api::{probe_endpoint, ClientFactory, EndpointConfig, EndpointStatus};

use super::setup::AppConfig;

/// Probe the endpoint and print the outcome; fails unless the model is ready
pub async fn run_check(app: AppConfig) -> Result<()> {
    let client = ClientFactory::create(app.endpoint.clone(), app.logging)?;
    let status = probe_endpoint(client.as_ref(), &app.endpoint.model_name).await;
    print_status(&status, &app.endpoint);

    if !status.is_ready() {
        print_setup_instructions(&app.endpoint);
        bail!("Model endpoint at {} is not ready", app.endpoint.model_url);
    }
    Ok(())
}

pub fn print_status(status: &EndpointStatus, endpoint: &EndpointConfig) {
    match status {
        EndpointStatus::Ready => {
            println!("{} Model endpoint is running at {}", "✅".green(), endpoint.model_url.bright_black());
            println!("{} Model {} is available", "✅".green(), endpoint.model_name.bold());
        }
        EndpointStatus::ModelMissing { available } => {
            println!("{} Model endpoint is running at {}", "✅".green(), endpoint.model_url.bright_black());
            println!(
                "{} Model {} not found. Run: docker model pull {}",
                "❌".red(),
                endpoint.model_name.bold(),
                endpoint.model_name
            );
            if !available.is_empty() {
                println!("{}", format!("   Available: {}", available.join(", ")).bright_black());
            }
        }
        EndpointStatus::Unreachable { reason } => {
            println!("{} Model endpoint not responding: {}", "❌".red(), reason);
        }
    }
}

pub fn print_setup_instructions(endpoint: &EndpointConfig) {
    println!("\n{}", "📋 Setup Instructions:".bright_cyan().bold());
    println!("1. Enable Docker Model Runner in Docker Desktop");
    println!("2. Run: docker model pull {}", endpoint.model_name);
    println!("3. Wait for the model to download (may take a while)");
    println!(
        "{}",
        "Set MODEL_URL or --model-url if the endpoint listens elsewhere".bright_black()
    );
}
