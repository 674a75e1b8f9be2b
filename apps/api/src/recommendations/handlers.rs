//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::recommendations::prompts::{render_prompt, SYSTEM_PROMPT};
use crate::recommendations::validation::validate;
use crate::state::AppState;

/// Client-facing detail used in production, where upstream diagnostics are
/// withheld.
const GENERIC_UPSTREAM_DETAIL: &str = "Failed to generate recommendations";

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: String,
}

/// POST /api/recommendations
///
/// Validate → render prompt → one upstream completion call → map the result.
/// Steps run strictly in that order; nothing is sent upstream until the input
/// has passed validation.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;

    let request = validate(&body).map_err(|details| {
        warn!("Validation error: {details:?}");
        AppError::Validation(details)
    })?;

    info!(
        "Processing recommendations request (industry: {}, region: {})",
        request.industry, request.region
    );

    let prompt = render_prompt(&request.industry, &request.region, &request.file_content);

    let recommendations = state
        .llm
        .complete(SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|err| {
            error!("Azure OpenAI error: {err}");
            AppError::Upstream(client_detail(&err, state.config.production))
        })?;

    info!("Successfully generated recommendations");

    Ok(Json(RecommendationsResponse { recommendations }))
}

/// Maps an upstream failure to the detail string the client sees.
/// Production gets a fixed generic string; other modes get the diagnostic.
fn client_detail(err: &LlmError, production: bool) -> String {
    if production {
        GENERIC_UPSTREAM_DETAIL.to_string()
    } else {
        err.to_string()
    }
}
