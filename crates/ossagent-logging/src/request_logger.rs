use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use ossagent_models::ChatRequest;
use crate::safe_truncate;

const CONSOLE_BODY_LIMIT: usize = 5000;

/// Show only the first few characters of a credential
pub fn mask_api_key(api_key: Option<&str>) -> String {
    match api_key {
        Some(key) if !key.is_empty() => format!("{}***", key.chars().take(6).collect::<String>()),
        _ => "(none)".to_string(),
    }
}

fn describe_url(url: &str) -> Vec<(&'static str, String)> {
    let mut lines = vec![("URL", url.to_string())];
    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        lines.push(("Host", parsed_url.host_str().unwrap_or("unknown").to_string()));
        lines.push((
            "Port",
            parsed_url
                .port()
                .map(|p| p.to_string())
                .unwrap_or_else(|| if parsed_url.scheme() == "https" { "443 (default)".to_string() } else { "80 (default)".to_string() }),
        ));
        lines.push(("Scheme", parsed_url.scheme().to_string()));
    }
    lines
}

fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json_val| serde_json::to_string_pretty(&json_val).ok())
        .unwrap_or_else(|| body.to_string())
}

fn print_truncated(text: &str) {
    if text.chars().count() > CONSOLE_BODY_LIMIT {
        eprintln!("{}", safe_truncate(text, CONSOLE_BODY_LIMIT));
        eprintln!("\n{}", format!("... (truncated, total {} bytes)", text.len()).bright_black());
    } else {
        eprintln!("{}", text);
    }
}

/// Log HTTP request details for debugging (console output)
pub fn log_request(url: &str, request: &ChatRequest, api_key: Option<&str>, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_cyan());
    eprintln!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    eprintln!("{}", "═".repeat(80).bright_cyan());

    for (label, value) in describe_url(url) {
        eprintln!("{}: {}", label.bright_yellow(), value);
    }

    eprintln!("\n{}", "Headers:".bright_yellow());
    eprintln!("  Content-Type: application/json");
    if api_key.is_some() {
        eprintln!("  Authorization: Bearer {}", mask_api_key(api_key));
    }

    eprintln!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(&request) {
        Ok(json) => print_truncated(&json),
        Err(e) => eprintln!("{}", format!("Error serializing request: {}", e).red()),
    }

    eprintln!("{}", "═".repeat(80).bright_cyan());
    eprintln!();
}

/// Log HTTP response details for debugging (console output)
pub fn log_response(status: &reqwest::StatusCode, headers: &reqwest::header::HeaderMap, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_green());
    eprintln!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    eprintln!("{}", "═".repeat(80).bright_green());

    eprintln!("{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    eprintln!("\n{}", "Headers:".bright_yellow());
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            eprintln!("  {}: {}", name.as_str().bright_white(), val_str);
        }
    }

    eprintln!("\n{}", "Response Body:".bright_yellow());
    print_truncated(&pretty_body(body));

    eprintln!("{}", "═".repeat(80).bright_green());
    eprintln!();
}

/// Log HTTP request to file for persistent debugging. Returns the written path.
pub fn log_request_to_file(
    logs_dir: &Path,
    url: &str,
    request: &ChatRequest,
    api_key: Option<&str>,
    request_timestamp: i64,
) -> Result<PathBuf> {
    let model_name = request.model.replace('/', "-");
    let file_path = logs_dir.join(format!("req-{}-{}.txt", request_timestamp, model_name));

    let mut log_content = String::new();
    log_content.push_str("HTTP REQUEST LOG\n");
    log_content.push_str("================\n\n");
    log_content.push_str(&format!("Timestamp: {}\n", request_timestamp));
    log_content.push_str(&format!("Model: {}\n\n", request.model));

    for (label, value) in describe_url(url) {
        log_content.push_str(&format!("{}: {}\n", label, value));
    }

    log_content.push_str("\nHeaders:\n");
    log_content.push_str("  Content-Type: application/json\n");
    if api_key.is_some() {
        log_content.push_str(&format!("  Authorization: Bearer {}\n", mask_api_key(api_key)));
    }

    log_content.push_str("\nRequest Body:\n");
    match serde_json::to_string_pretty(&request) {
        Ok(json) => {
            log_content.push_str(&json);
            log_content.push('\n');
        }
        Err(e) => log_content.push_str(&format!("Error serializing request: {}\n", e)),
    }

    fs::write(&file_path, log_content)
        .with_context(|| format!("Failed to write request log to {}", file_path.display()))?;

    Ok(file_path)
}

/// Log HTTP response to file, paired with the request by timestamp and model
pub fn log_response_to_file(
    logs_dir: &Path,
    status: &reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    body: &str,
    request_timestamp: i64,
    model: &str,
) -> Result<PathBuf> {
    let model_name = model.replace('/', "-");
    let file_path = logs_dir.join(format!("resp-{}-{}.txt", request_timestamp, model_name));

    let mut log_content = String::new();
    log_content.push_str("HTTP RESPONSE LOG\n");
    log_content.push_str("=================\n\n");
    log_content.push_str(&format!("Timestamp: {}\n", request_timestamp));
    log_content.push_str(&format!("Model: {}\n\n", model));

    log_content.push_str(&format!("Status: {} {}\n\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    ));

    log_content.push_str("Headers:\n");
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            log_content.push_str(&format!("  {}: {}\n", name.as_str(), val_str));
        }
    }

    log_content.push_str("\nResponse Body:\n");
    log_content.push_str(&pretty_body(body));
    log_content.push('\n');

    log_content.push_str("\n---\n");
    log_content.push_str(&format!("Response Size: {} bytes\n", body.len()));
    log_content.push_str(&format!("Content-Type: {}\n",
        headers.get("content-type")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
    ));

    fs::write(&file_path, log_content)
        .with_context(|| format!("Failed to write response log to {}", file_path.display()))?;

    Ok(file_path)
}
