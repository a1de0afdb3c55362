use serde_json::{json, Value};
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> Value {
    json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_crew_json_stdout_is_only_the_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Findings so far.")))
        .mount(&server)
        .await;

    let output = Command::new(env!("CARGO_BIN_EXE_ossagent"))
        .args([
            "--model-url",
            &format!("{}/v1", server.uri()),
            "-v",
            "crew",
            "--json",
            "--no-gateway",
            "--topic",
            "edge inference",
        ])
        .current_dir(std::env::temp_dir())
        .env("MODEL_MAX_RETRIES", "1")
        .env_remove("MODEL_URL")
        .env_remove("MODEL_NAME")
        .env_remove("REASONING_LEVEL")
        .env_remove("MAX_TOKENS")
        .env_remove("TEMPERATURE")
        .env_remove("MODEL_TIMEOUT_SECS")
        .env_remove("MODEL_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .output()
        .await
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("stdout is not JSON ({e}): {}", String::from_utf8_lossy(&output.stdout))
    });
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r["succeeded"] == json!(true)));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Rate limited"));
}
