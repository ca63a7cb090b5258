//! OpenAI-compatible adapter for the generation collaborator.
//!
//! Talks to any `/chat/completions` endpoint: OpenRouter (default), OpenAI,
//! Azure OpenAI or a local Ollama instance.

use crate::domain::{ChatTurn, DomainError};
use crate::ports::GenerationPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible chat completions client.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `base_url` - API base (e.g. "https://openrouter.ai/api/v1"); gets `/chat/completions`
    /// * `api_key` - Bearer credential; must not be empty
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    /// `MissingCredential` for an empty key, `Config` if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::MissingCredential(
                "BMI_STYLIST_API_KEY".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: Self::endpoint(base_url),
            api_key,
        })
    }

    fn endpoint(base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{}/chat/completions", base)
        }
    }

    /// Pull the completion text out of a raw response body.
    fn extract_content(body: &str) -> Result<String, DomainError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::Generation(format!("Failed to parse API response: {}", e)))?;
        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Generation("No response choices returned".to_string()))?
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| DomainError::Generation("Completion has no content".to_string()))
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl GenerationPort for OpenAiAdapter {
    async fn complete(&self, model: &str, messages: &[ChatTurn]) -> Result<String, DomainError> {
        info!(
            model,
            messages = messages.len(),
            "sending completion request"
        );

        let request = ChatRequest { model, messages };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Generation(format!("request timed out: {}", e))
                } else {
                    DomainError::Generation(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Generation(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, body = %body, "generation API returned error");
            return Err(DomainError::Generation(format!(
                "API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let content = Self::extract_content(&body)?;
        debug!(model, reply_len = content.len(), "received completion");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_path_once() {
        assert_eq!(
            OpenAiAdapter::endpoint("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            OpenAiAdapter::endpoint("https://api.openai.com/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_empty_key_is_missing_credential() {
        let res = OpenAiAdapter::new(
            "https://example.com",
            "  ".to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(res, Err(DomainError::MissingCredential(_))));
    }

    #[test]
    fn test_extract_content() {
        let body =
            r#"{"choices":[{"message":{"role":"assistant","content":"bmi_calculator 70 1.75"}}]}"#;
        assert_eq!(
            OpenAiAdapter::extract_content(body).unwrap(),
            "bmi_calculator 70 1.75"
        );
    }

    #[test]
    fn test_extract_content_failures() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
            "<html>bad gateway</html>",
        ] {
            assert!(matches!(
                OpenAiAdapter::extract_content(body),
                Err(DomainError::Generation(_))
            ));
        }
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatTurn::system("s"), ChatTurn::user("u")];
        let json = serde_json::to_value(ChatRequest {
            model: "openai/gpt-4o",
            messages: &messages,
        })
        .unwrap();
        assert_eq!(json["model"], "openai/gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
    }
}
