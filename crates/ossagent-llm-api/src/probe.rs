use crate::client::LlmClient;

/// Outcome of checking the model endpoint before a session starts
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointStatus {
    /// Endpoint answers and serves the model
    Ready,
    /// Endpoint answers but the model has not been pulled
    ModelMissing { available: Vec<String> },
    /// Endpoint did not answer successfully
    Unreachable { reason: String },
}

impl EndpointStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, EndpointStatus::Ready)
    }
}

/// A listed id matches when it equals the name, or the name plus a `:tag`
fn model_matches(listed: &str, wanted: &str) -> bool {
    listed == wanted
        || listed
            .strip_prefix(wanted)
            .is_some_and(|rest| rest.starts_with(':'))
}

/// Ask the endpoint for its models and look for `model_name`
pub async fn probe_endpoint(client: &dyn LlmClient, model_name: &str) -> EndpointStatus {
    match client.list_models().await {
        Ok(models) => {
            if models.iter().any(|m| model_matches(&m.id, model_name)) {
                EndpointStatus::Ready
            } else {
                EndpointStatus::ModelMissing {
                    available: models.into_iter().map(|m| m.id).collect(),
                }
            }
        }
        Err(e) => EndpointStatus::Unreachable { reason: e.to_string() },
    }
}
