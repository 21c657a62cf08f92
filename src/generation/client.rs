//! Thin HTTP client for an OpenAI-compatible chat-completions endpoint.
//!
//! - `submit` posts one system + one user message to `/chat/completions`
//!   and returns the first choice's content.
//! - Transport and HTTP failures are turned into `ProviderError::Call` text
//!   that the pipeline classifies; response bodies that do not match the
//!   expected shape become `ProviderError::Malformed`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationService, ProviderError};

/// Per-call model settings.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    settings: CompletionSettings,
}

impl OpenAiClient {
    /// `client` is shared so the document and suggestion clients reuse one
    /// connection pool.
    pub fn new(client: Client, base_url: &str, api_key: &str, settings: CompletionSettings) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        OpenAiClient {
            client,
            base_url: base,
            api_key: api_key.to_string(),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

/// Prefix transport errors with the words the pipeline's classifier keys on.
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timeout: {}", err)
    } else if err.is_connect() || err.is_request() {
        format!("network error: {}", err)
    } else {
        err.to_string()
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn submit(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::info!(model = %self.settings.model, "Sending completion request to {}", url);

        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_text },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Call(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = match status.as_u16() {
                401 | 403 => format!("Invalid API key or permissions. Status: {}, Body: {}", status, error_body),
                429 => format!("Rate limit or quota exceeded. Status: {}, Body: {}", status, error_body),
                408 | 504 => format!("Upstream timeout. Status: {}, Body: {}", status, error_body),
                _ => format!("Completion request failed. Status: {}, Body: {}", status, error_body),
            };
            return Err(ProviderError::Call(message));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ProviderError::Malformed(e.to_string())
            } else {
                ProviderError::Call(describe_transport_error(&e))
            }
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        tracing::debug!(chars = content.len(), "Completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_chat_completions_shape() {
        let body = ChatRequest {
            model: "gpt-4o",
            messages: [
                ChatMessage { role: "system", content: "sys" },
                ChatMessage { role: "user", content: "Nurse" },
            ],
            max_tokens: 2500,
            temperature: 0.5,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["model"], "gpt-4o");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "Nurse");
        assert_eq!(v["max_tokens"], 2500);
    }

    #[test]
    fn response_with_null_content_parses() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let settings = CompletionSettings {
            model: "gpt-4".into(),
            max_tokens: 10,
            temperature: 0.7,
        };
        let client = OpenAiClient::new(Client::new(), "http://localhost:8080/v1/", "key", settings);
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.model(), "gpt-4");
    }
}
