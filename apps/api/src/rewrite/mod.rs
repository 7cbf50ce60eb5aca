// Rewrite endpoint: sanitize → prompt → completion → humanize → assemble.
// All completion calls go through llm_client; no direct HTTP calls here.

pub mod assembler;
pub mod handlers;
pub mod humanize;
pub mod prompts;
pub mod sanitize;
pub mod service;
