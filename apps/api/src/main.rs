mod config;
mod errors;
mod llm_client;
mod models;
mod rewrite;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionClient, OpenAiClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Humanizer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let completion: Option<Arc<dyn CompletionClient>> = match &config.openai_api_key {
        Some(key) => {
            let client = OpenAiClient::new(key.clone(), &config.openai_base_url)?;
            info!(
                "Completion client initialized (model: {}, timeout: {:?})",
                llm_client::MODEL,
                config.completion_timeout
            );
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; rewrites will fail with a configuration error");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        completion,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
