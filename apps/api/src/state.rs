use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable completion backend. `None` when no API key is configured;
    /// rewrites then fail with a configuration error instead of calling out.
    pub completion: Option<Arc<dyn CompletionClient>>,
}
