//! Response assembly: wraps rewritten text with the fixed editorial extras.

use crate::models::rewrite::RewriteResponse;

/// Follow-up edits suggested with every rewrite, in display order.
pub const SUGGESTIONS: [&str; 5] = [
    "Add a personal opinion on one key point.",
    "Insert a real-life example from your experience.",
    "Vary sentence starters for better flow.",
    "Include a question or rhetorical aside.",
    "Check and adjust any awkward phrasing manually.",
];

pub const DISCLOSURE: &str = "This text was refined with an automated assistant. \
    Review and add your own edits for authenticity.";

pub fn assemble_response(rewritten: String) -> RewriteResponse {
    let word_count = word_count(&rewritten);
    RewriteResponse {
        rewritten,
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        disclosure: DISCLOSURE.to_string(),
        word_count,
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
