use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const COMPLETION_MODEL: &str = "gpt-4o-mini";

// A hung completion request would hold the webhook open; OpenAI answers
// short prompts well inside this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat completion returned status {0}")]
    Api(reqwest::StatusCode),
    #[error("chat completion response contained no usable content")]
    EmptyCompletion,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Thin client for the OpenAI chat-completions endpoint. The base URL is
/// injected so tests can point it at a local mock server.
pub struct PromptClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PromptClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// One blocking completion call with a (system, user) exchange. This is
    /// the only fallible external call on the provisioning path; callers are
    /// expected to recover from any error locally.
    pub async fn generate_prompt(&self, system: &str, user: &str) -> Result<String, PromptError> {
        let payload = json!({
            "model": COMPLETION_MODEL,
            "messages": [
                {
                    "role": "system",
                    "content": system,
                },
                {
                    "role": "user",
                    "content": user,
                },
            ]
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PromptError::Api(response.status()));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(PromptError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_the_system_and_user_turns_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "be a prompt engineer" },
                    { "role": "user", "content": "a pirate" },
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "You are a pirate." } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PromptClient::new(&server.uri(), "test-key");
        let prompt = client
            .generate_prompt("be a prompt engineer", "a pirate")
            .await
            .unwrap();

        assert_eq!(prompt, "You are a pirate.");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PromptClient::new(&server.uri(), "test-key");
        let err = client.generate_prompt("sys", "user").await.unwrap_err();

        assert!(matches!(err, PromptError::Api(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn empty_choices_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = PromptClient::new(&server.uri(), "test-key");
        let err = client.generate_prompt("sys", "user").await.unwrap_err();

        assert!(matches!(err, PromptError::EmptyCompletion));
    }

    #[tokio::test]
    async fn null_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [ { "message": { "role": "assistant", "content": null } } ]
            })))
            .mount(&server)
            .await;

        let client = PromptClient::new(&server.uri(), "test-key");
        let err = client.generate_prompt("sys", "user").await.unwrap_err();

        assert!(matches!(err, PromptError::EmptyCompletion));
    }
}
