//! LLM Client — the single point of entry for all hosted-model calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! Callers depend on `CompletionPort` (one method, raw text out) so the kit
//! builder and parser never see the provider. Parsing lives in `extract`.
//!
//! One request per call. No retry, no batching, no caching: a retry is a
//! manual user action.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod extract;
pub mod prompts;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all completion calls.
pub const MODEL: &str = "claude-opus-4-5-20251101";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Anthropic API key is not configured.")]
    MissingCredential,

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("Rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// An API key held in memory only. `Debug` is redacted so the key never
/// reaches logs through `{:?}`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A hosted text-completion service: system instruction + prompt in, raw text out.
///
/// The returned text is NOT guaranteed to be JSON even when the prompt asks for it.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

/// Builds a `CompletionPort` bound to one credential.
///
/// Carried in `AppState` as `Arc<dyn CompletionProvider>`; tests swap in a stub.
pub trait CompletionProvider: Send + Sync {
    fn port(&self, credential: Option<Credential>) -> Box<dyn CompletionPort>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Builds the shared HTTP client. The transport timeout is the only timeout.
pub fn build_http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Anthropic Messages API adapter for one credential.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    credential: Option<Credential>,
}

impl LlmClient {
    pub fn new(client: Client, api_url: impl Into<String>, credential: Option<Credential>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            credential,
        }
    }

    /// Makes exactly one call to the Messages API and returns the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<LlmResponse, LlmError> {
        let credential = self
            .credential
            .as_ref()
            .filter(|c| !c.is_blank())
            .ok_or(LlmError::MissingCredential)?;

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", credential.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), body));
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl CompletionPort for LlmClient {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, max_tokens).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Provider that hands out `LlmClient`s sharing one connection pool.
pub struct AnthropicProvider {
    client: Client,
    api_url: String,
}

impl AnthropicProvider {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

impl CompletionProvider for AnthropicProvider {
    fn port(&self, credential: Option<Credential>) -> Box<dyn CompletionPort> {
        Box::new(LlmClient::new(
            self.client.clone(),
            self.api_url.clone(),
            credential,
        ))
    }
}

/// Maps a non-success HTTP status to the error taxonomy.
/// The Anthropic error message is used when the body carries one.
fn classify_failure(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        401 | 403 => LlmError::Unauthorized(message),
        429 => LlmError::RateLimited(message),
        _ => LlmError::Api { status, message },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let key = Credential::new("sk-ant-abc123".to_string());
        assert_eq!(format!("{key:?}"), "Credential(***)");
        assert_eq!(key.expose(), "sk-ant-abc123");
    }

    #[test]
    fn test_blank_credential_detected() {
        assert!(Credential::new("   ".to_string()).is_blank());
        assert!(!Credential::new("k".to_string()).is_blank());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        // Unroutable URL: if the client tried to connect this would be an Http error.
        let client = LlmClient::new(Client::new(), "http://127.0.0.1:1/v1/messages", None);
        let err = client.complete("system", "prompt", 16).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }

    #[tokio::test]
    async fn test_blank_credential_treated_as_missing() {
        let client = LlmClient::new(
            Client::new(),
            "http://127.0.0.1:1/v1/messages",
            Some(Credential::new(String::new())),
        );
        let err = client.complete("system", "prompt", 16).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }

    #[test]
    fn test_classify_401_is_unauthorized_with_api_message() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        match classify_failure(401, body.to_string()) {
            LlmError::Unauthorized(msg) => assert_eq!(msg, "invalid x-api-key"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_403_is_unauthorized() {
        let body = r#"{"type":"error","error":{"type":"permission_error","message":"forbidden key"}}"#;
        assert!(matches!(
            classify_failure(403, body.to_string()),
            LlmError::Unauthorized(msg) if msg == "forbidden key"
        ));
    }

    #[test]
    fn test_classify_429_is_rate_limited() {
        assert!(matches!(
            classify_failure(429, "slow down".to_string()),
            LlmError::RateLimited(msg) if msg == "slow down"
        ));
    }

    #[test]
    fn test_classify_other_status_keeps_raw_body() {
        match classify_failure(529, "overloaded".to_string()) {
            LlmError::Api { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "overloaded");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_response_text_uses_first_text_block() {
        let json = r#"{
            "content": [
                {"type": "thinking", "text": null},
                {"type": "text", "text": "{\"a\": 1}"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_request_serializes_max_tokens_and_system() {
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: 512,
            system: "sys",
            messages: vec![AnthropicMessage {
                role: "user",
                content: "hi",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["system"], "sys");
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
