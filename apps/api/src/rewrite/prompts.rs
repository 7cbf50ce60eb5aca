// Prompt construction for the rewrite call.
// Fields arrive already sanitized; the template does no escaping of its own,
// so bracket stripping in the sanitizer is the only structural defense.

use crate::llm_client::prompts::{OUTPUT_ONLY_INSTRUCTION, PRESERVE_FACTS_INSTRUCTION};

/// Opening line that frames the model as an editor rather than an assistant.
pub const REWRITE_ROLE: &str = "You are a creative human editor. Rewrite the text to:";

/// Delimiter fencing the source text off from the instructions.
pub const TEXT_FENCE: &str = "-----";

/// Sanitized inputs for one rewrite prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptFields<'a> {
    pub text: &'a str,
    pub anecdote1: &'a str,
    pub anecdote2: &'a str,
    pub tone_hint: &'a str,
    pub extra_detail: &'a str,
}

/// Builds the rewrite instruction.
///
/// Built with `format!` rather than placeholder replacement so that a field
/// containing something like `{tone_hint}` is embedded literally.
pub fn build_rewrite_prompt(fields: &PromptFields<'_>) -> String {
    let mut instructions = vec![
        "- Sound natural and human.".to_string(),
        format!(
            "- Include these personal details subtly: \"{}\", \"{}\".",
            fields.anecdote1, fields.anecdote2
        ),
        format!("- Match the tone: {}.", fields.tone_hint),
    ];
    if !fields.extra_detail.is_empty() {
        instructions.push(format!(
            "- Include this additional context: \"{}\".",
            fields.extra_detail
        ));
    }
    instructions.push(format!("- {PRESERVE_FACTS_INSTRUCTION}"));
    instructions.push(format!("- {OUTPUT_ONLY_INSTRUCTION}"));

    format!(
        "{REWRITE_ROLE}\n{}\n\nText:\n{TEXT_FENCE}\n{}\n{TEXT_FENCE}\n",
        instructions.join("\n"),
        fields.text
    )
}
