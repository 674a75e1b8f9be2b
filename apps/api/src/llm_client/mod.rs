/// LLM Client — the single point of entry for all Azure OpenAI calls.
///
/// ARCHITECTURAL RULE: No other module may call the upstream endpoint
/// directly. All completion requests MUST go through this module.
///
/// One request in, one request out: no retries. A failed call surfaces as an
/// `LlmError` and the caller decides what the client sees.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// `max_tokens` sent with every completion request.
const MAX_TOKENS: u32 = 800;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure: connect error, timeout, broken stream.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Upstream answered 2xx but `choices[0].message.content` is missing.
    #[error("upstream response did not contain a completion")]
    Malformed,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first completion, if the payload carries one.
    /// Later choices are never consumed.
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorEnvelope {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Extracts the upstream error message from an Azure OpenAI error body,
/// falling back to the raw body when it is not the documented envelope.
fn error_message(body: String) -> String {
    serde_json::from_str::<UpstreamErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body)
}

/// The single upstream client shared by all request handlers.
/// Wraps a pooled `reqwest::Client` with the deployment URL and credential.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LlmClient {
    /// The timeout bounds the whole upstream call; expiry surfaces as
    /// `LlmError::Http`.
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }

    /// Issues exactly one chat-completion POST and returns the first
    /// completion's text.
    ///
    /// The credential travels only in the `api-key` header; it never appears
    /// in errors or log output. A missing credential sends the request
    /// without the header and lets the upstream reject it.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            if err.is_decode() {
                LlmError::Malformed
            } else {
                LlmError::Http(err)
            }
        })?;

        debug!("chat completion succeeded");

        payload.first_content().ok_or(LlmError::Malformed)
    }
}
