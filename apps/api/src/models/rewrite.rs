use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound rewrite request as posted by the front end.
///
/// Fields are held as raw JSON values: clients send numbers, nulls or nothing
/// at all, and the sanitizer decides what each of those means.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteRequest {
    pub text: Option<Value>,
    pub anecdote1: Option<Value>,
    pub anecdote2: Option<Value>,
    pub tone_hint: Option<Value>,
    pub extra_detail: Option<Value>,
}

/// Outbound payload for a successful rewrite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub rewritten: String,
    pub suggestions: Vec<String>,
    pub disclosure: String,
    pub word_count: usize,
}
