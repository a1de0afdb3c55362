use std::collections::HashMap;
use std::time::Duration;

use ossagent_models::ReasoningLevel;
use pretty_assertions::assert_eq;
use serial_test::serial;

use crate::config::{models_api_url, normalize_api_url, EndpointConfig, CREW_MODEL_NAME, DEFAULT_MODEL_URL};
use crate::error::ConfigError;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_match_local_model_runner() {
    let config = EndpointConfig::default();

    assert_eq!(config.model_url, DEFAULT_MODEL_URL);
    assert_eq!(config.model_name, "ai/gpt-oss");
    assert_eq!(config.reasoning_level, ReasoningLevel::Medium);
    assert_eq!(config.max_tokens, 1000);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.api_key, None);
    assert_eq!(config.max_retries, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_crew_defaults() {
    let config = EndpointConfig::crew_defaults();

    assert_eq!(config.model_name, CREW_MODEL_NAME);
    assert_eq!(config.max_tokens, 2000);
    assert_eq!(config.timeout, Duration::from_secs(60));
}

#[test]
fn test_overlay_reads_all_variables() {
    let config = EndpointConfig::default()
        .overlay(lookup(&[
            ("MODEL_URL", "http://gpu-box:8080"),
            ("MODEL_NAME", "ai/qwen3"),
            ("REASONING_LEVEL", "High"),
            ("MAX_TOKENS", "512"),
            ("TEMPERATURE", "0.2"),
            ("MODEL_TIMEOUT_SECS", "5"),
            ("MODEL_MAX_RETRIES", "2"),
            ("OPENAI_API_KEY", "sk-fallback"),
        ]))
        .unwrap();

    assert_eq!(config.model_url, "http://gpu-box:8080");
    assert_eq!(config.model_name, "ai/qwen3");
    assert_eq!(config.reasoning_level, ReasoningLevel::High);
    assert_eq!(config.max_tokens, 512);
    assert_eq!(config.temperature, 0.2);
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.api_key.as_deref(), Some("sk-fallback"));
}

#[test]
fn test_model_api_key_wins_over_openai_key() {
    let config = EndpointConfig::default()
        .overlay(lookup(&[("MODEL_API_KEY", "local"), ("OPENAI_API_KEY", "remote")]))
        .unwrap();
    assert_eq!(config.api_key.as_deref(), Some("local"));
}

#[test]
fn test_blank_variables_are_ignored() {
    let config = EndpointConfig::default()
        .overlay(lookup(&[("MODEL_NAME", "   "), ("MAX_TOKENS", "")]))
        .unwrap();
    assert_eq!(config, EndpointConfig::default());
}

#[test]
fn test_unparsable_variable_names_the_key() {
    let err = EndpointConfig::default()
        .overlay(lookup(&[("MAX_TOKENS", "lots")]))
        .unwrap_err();

    match err {
        ConfigError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "MAX_TOKENS");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = EndpointConfig::default()
        .overlay(lookup(&[("REASONING_LEVEL", "extreme")]))
        .unwrap_err();
    assert!(err.to_string().contains("REASONING_LEVEL"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    std::env::set_var("MODEL_NAME", "ai/from-env");
    let config = EndpointConfig::from_env();
    std::env::remove_var("MODEL_NAME");

    assert_eq!(config.unwrap().model_name, "ai/from-env");
}

#[test]
fn test_validate_rejects_bad_urls() {
    let mut config = EndpointConfig::default();
    config.model_url = "not a url".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));

    config.model_url = "ftp://models.local/v1".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));
}

#[test]
fn test_validate_rejects_bad_sampling_settings() {
    let mut config = EndpointConfig::default();
    config.model_name = String::new();
    assert_eq!(config.validate(), Err(ConfigError::EmptyModelName));

    let mut config = EndpointConfig::default();
    config.max_tokens = 0;
    assert_eq!(config.validate(), Err(ConfigError::InvalidMaxTokens));

    let mut config = EndpointConfig::default();
    config.temperature = 3.5;
    assert_eq!(config.validate(), Err(ConfigError::InvalidTemperature(3.5)));
}

#[test]
fn test_normalize_api_url() {
    let cases = vec![
        (
            "http://localhost:12434/engines/llama.cpp/v1",
            "http://localhost:12434/engines/llama.cpp/v1/chat/completions",
        ),
        (
            "http://localhost:12434/engines/llama.cpp/v1/",
            "http://localhost:12434/engines/llama.cpp/v1/chat/completions",
        ),
        ("http://localhost:8080", "http://localhost:8080/v1/chat/completions"),
        ("http://localhost:8080/", "http://localhost:8080/v1/chat/completions"),
        (
            "https://api.example.com/v1/chat/completions",
            "https://api.example.com/v1/chat/completions",
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(normalize_api_url(input), expected, "input: {input}");
    }
}

#[test]
fn test_models_api_url() {
    assert_eq!(
        models_api_url("http://localhost:12434/engines/llama.cpp/v1"),
        "http://localhost:12434/engines/llama.cpp/v1/models"
    );
    assert_eq!(models_api_url("http://localhost:8080"), "http://localhost:8080/v1/models");
    assert_eq!(
        models_api_url("https://api.example.com/v1/chat/completions"),
        "https://api.example.com/v1/models"
    );
}
