// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting instructions.

/// Instruction appended to rewrite prompts so the model keeps the source facts.
pub const PRESERVE_FACTS_INSTRUCTION: &str = "Preserve all facts.";

/// Instruction that suppresses preambles like "Here is the rewritten text:".
pub const OUTPUT_ONLY_INSTRUCTION: &str = "Output only the rewritten text.";
