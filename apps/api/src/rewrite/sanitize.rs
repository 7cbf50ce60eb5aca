//! Input sanitizer for free-text request fields.

use serde_json::Value;

/// Longest field, in characters, that is forwarded to the prompt.
pub const MAX_FIELD_CHARS: usize = 6000;

/// Trims, caps at `MAX_FIELD_CHARS` and strips `<` / `>`.
///
/// Scalars are stringified; `null`, absent fields, arrays and objects all
/// sanitize to `""`. Brackets are removed after trimming and capping, so the
/// result is trimmed once more: stripping `"< x"` must not leave `" x"`.
pub fn sanitize(value: Option<&Value>) -> String {
    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => {
            return String::new()
        }
    };
    sanitize_str(&raw)
}

pub fn sanitize_str(raw: &str) -> String {
    let capped: String = raw.trim().chars().take(MAX_FIELD_CHARS).collect();
    capped
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}
