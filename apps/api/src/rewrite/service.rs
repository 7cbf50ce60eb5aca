//! Rewrite orchestration.
//!
//! Flow: sanitize → validate → prompt → one completion call (bounded) →
//!       humanize → assemble.
//!
//! Nothing here is retried and nothing outlives the request. A failed call
//! is classified and returned; the caller owns any retry policy.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{CompletionClient, CompletionParams};
use crate::models::rewrite::{RewriteRequest, RewriteResponse};
use crate::rewrite::assembler::assemble_response;
use crate::rewrite::humanize::humanize;
use crate::rewrite::prompts::{build_rewrite_prompt, PromptFields};
use crate::rewrite::sanitize::sanitize;

pub const DEFAULT_TONE_HINT: &str = "friendly, conversational";
pub const SAMPLING_TEMPERATURE: f32 = 1.0;
pub const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Request fields after sanitization and defaulting.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedRequest {
    pub text: String,
    pub anecdote1: String,
    pub anecdote2: String,
    pub tone_hint: String,
    pub extra_detail: String,
}

impl SanitizedRequest {
    pub fn from_request(request: &RewriteRequest) -> Self {
        let tone_hint = sanitize(request.tone_hint.as_ref());
        Self {
            text: sanitize(request.text.as_ref()),
            anecdote1: sanitize(request.anecdote1.as_ref()),
            anecdote2: sanitize(request.anecdote2.as_ref()),
            tone_hint: if tone_hint.is_empty() {
                DEFAULT_TONE_HINT.to_string()
            } else {
                tone_hint
            },
            extra_detail: sanitize(request.extra_detail.as_ref()),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.text.is_empty() || self.anecdote1.is_empty() || self.anecdote2.is_empty() {
            return Err(AppError::Validation(
                "Text and two personal details are required".to_string(),
            ));
        }
        Ok(())
    }

    fn prompt_fields(&self) -> PromptFields<'_> {
        PromptFields {
            text: &self.text,
            anecdote1: &self.anecdote1,
            anecdote2: &self.anecdote2,
            tone_hint: &self.tone_hint,
            extra_detail: &self.extra_detail,
        }
    }
}

/// Rewrites one request end to end.
///
/// Validation and configuration are checked before any upstream call. The
/// completion is bounded by `timeout`; expiry is reported as upstream
/// unavailability and produces no partial response.
pub async fn rewrite<R: Rng + Send + ?Sized>(
    request: &RewriteRequest,
    completion: Option<&dyn CompletionClient>,
    timeout: Duration,
    rng: &mut R,
) -> Result<RewriteResponse, AppError> {
    let request_id = Uuid::new_v4();

    let fields = SanitizedRequest::from_request(request);
    fields.validate()?;

    let client = completion.ok_or_else(|| {
        AppError::Configuration("OPENAI_API_KEY is not set; completion client unavailable".into())
    })?;

    info!(
        "Rewrite {request_id}: text_chars={}, extra_detail={}",
        fields.text.chars().count(),
        !fields.extra_detail.is_empty()
    );

    let prompt = build_rewrite_prompt(&fields.prompt_fields());
    let params = CompletionParams {
        temperature: SAMPLING_TEMPERATURE,
        max_output_tokens: MAX_OUTPUT_TOKENS,
        timeout,
    };

    let started = Instant::now();
    let raw = match tokio::time::timeout(timeout, client.complete(&prompt, params)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            let err = AppError::from(e);
            warn!("Rewrite {request_id}: completion failed ({})", err.code());
            return Err(err);
        }
        Err(_) => {
            warn!("Rewrite {request_id}: completion timed out after {timeout:?}");
            return Err(AppError::UpstreamUnavailable(format!(
                "no completion within {timeout:?}"
            )));
        }
    };
    info!(
        "Rewrite {request_id}: completion received in {}ms",
        started.elapsed().as_millis()
    );

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::EmptyCompletion);
    }

    Ok(assemble_response(humanize(raw, rng)))
}
