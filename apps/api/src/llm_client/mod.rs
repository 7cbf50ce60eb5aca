/// LLM Client: the single point of entry for completion calls in the humanizer.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// All LLM interactions MUST go through a `CompletionClient`.
///
/// Model: gpt-4o-mini (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The model used for all completion calls.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Credentials rejected (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// Server-side failure (`status` set) or unreachable host (`status` unset).
    #[error("Upstream unavailable: {message}")]
    Unavailable {
        status: Option<u16>,
        message: String,
    },

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling and deadline settings for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

/// A text-completion backend.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>` so tests can swap in
/// a scripted backend without touching handlers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the trimmed text of the first candidate.
    /// Empty text is reported as `LlmError::EmptyContent`, never as `Ok("")`.
    async fn complete(&self, prompt: &str, params: CompletionParams) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed text of the first candidate, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Completion client for any OpenAI-compatible `/chat/completions` endpoint.
/// Makes exactly one attempt per call; retry policy belongs to the caller.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    chat_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            chat_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str, params: CompletionParams) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_output_tokens,
        };

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .timeout(params.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, params.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, params.timeout))?;

        if !status.is_success() {
            warn!("Completion API returned {}", status);
            return Err(classify_status(status, body));
        }

        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

fn classify_transport_error(err: reqwest::Error, timeout: Duration) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(timeout)
    } else if err.is_connect() {
        LlmError::Unavailable {
            status: None,
            message: err.to_string(),
        }
    } else {
        LlmError::Http(err)
    }
}

/// Maps a non-success status onto the failure classes callers distinguish.
fn classify_status(status: StatusCode, body: String) -> LlmError {
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { message },
        s if s.is_server_error() => LlmError::Unavailable {
            status: Some(s.as_u16()),
            message,
        },
        s => LlmError::Api {
            status: s.as_u16(),
            message,
        },
    }
}
