//! Axum route handlers for the Rewrite API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::AppError;
use crate::models::rewrite::{RewriteRequest, RewriteResponse};
use crate::rewrite::service::rewrite;
use crate::state::AppState;

/// POST /api/rewrite
///
/// Rewrites the posted text through the completion service and the
/// humanization pipeline. Each request draws from a freshly seeded RNG.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    payload: Result<Json<RewriteRequest>, JsonRejection>,
) -> Result<Json<RewriteResponse>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;

    let mut rng = StdRng::from_entropy();
    let response = rewrite(
        &request,
        state.completion.as_deref(),
        state.config.completion_timeout,
        &mut rng,
    )
    .await?;

    Ok(Json(response))
}
