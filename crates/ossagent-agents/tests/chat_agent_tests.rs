mod fixtures;

use pretty_assertions::assert_eq;

use fixtures::ScriptedClient;
use ossagent_agents::{ChatAgent, HISTORY_LIMIT, THINK_SYSTEM_PROMPT};
use ossagent_llm_api::LlmError;
use ossagent_models::ReasoningLevel;

#[tokio::test]
async fn test_chat_sends_system_history_and_input() {
    let client = ScriptedClient::new().reply("Hi there").reply("Paris");
    let mut agent = ChatAgent::new(client.clone(), ReasoningLevel::Medium);

    assert_eq!(agent.chat("Hello", None).await.unwrap(), "Hi there");
    assert_eq!(agent.chat("Capital of France?", Some("Be brief.")).await.unwrap(), "Paris");

    let request = client.last_request();
    let roles: Vec<&str> = request.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    assert_eq!(request.messages[0].content, "Be brief.\nReasoning: medium");
    assert_eq!(request.messages[3].content, "Capital of France?");
    assert!(request.tools.is_empty());
}

#[tokio::test]
async fn test_history_is_trimmed_to_limit() {
    let client = ScriptedClient::new();
    for i in 0..8 {
        client.reply(&format!("answer {i}"));
    }
    let mut agent = ChatAgent::new(client.clone(), ReasoningLevel::Low);

    for i in 0..8 {
        agent.chat(&format!("question {i}"), None).await.unwrap();
    }

    let history = agent.history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].content, "question 3");
    assert_eq!(history[HISTORY_LIMIT - 1].content, "answer 7");

    // system + trimmed history + new input
    assert_eq!(client.last_request().messages.len(), 1 + HISTORY_LIMIT + 1);
}

#[tokio::test]
async fn test_failed_chat_leaves_history_untouched() {
    let client = ScriptedClient::new()
        .reply("first")
        .fail(LlmError::Status { status: 500, body: "boom".to_string() });
    let mut agent = ChatAgent::new(client, ReasoningLevel::Medium);

    agent.chat("one", None).await.unwrap();
    let err = agent.chat("two", None).await.unwrap_err();

    assert!(matches!(err, LlmError::Status { status: 500, .. }));
    assert_eq!(agent.history().len(), 2);
}

#[tokio::test]
async fn test_think_uses_requested_level_and_keeps_agent_level() {
    let client = ScriptedClient::new()
        .reply("step by step")
        .fail(LlmError::EmptyResponse);
    let mut agent = ChatAgent::new(client.clone(), ReasoningLevel::Low);

    agent.think("Plan a migration", ReasoningLevel::High).await.unwrap();
    let request = client.last_request();
    assert_eq!(request.messages[0].content, format!("{}\nReasoning: high", THINK_SYSTEM_PROMPT));
    assert_eq!(agent.reasoning_level(), ReasoningLevel::Low);

    assert!(agent.think("Again", ReasoningLevel::High).await.is_err());
    assert_eq!(agent.reasoning_level(), ReasoningLevel::Low);
}

#[tokio::test]
async fn test_reset_clears_history() {
    let client = ScriptedClient::new().reply("a").reply("b");
    let mut agent = ChatAgent::new(client.clone(), ReasoningLevel::Medium);

    agent.chat("x", None).await.unwrap();
    agent.reset();
    assert!(agent.history().is_empty());

    agent.chat("y", None).await.unwrap();
    assert_eq!(client.last_request().messages.len(), 2);
}
