use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input failed validation. One message per violated field; the
    /// full list is always safe to return.
    #[error("Invalid input: {0:?}")]
    Validation(Vec<String>),

    /// Upstream completion call failed. Carries the client-facing detail,
    /// already sanitized for the deployment mode by the caller.
    #[error("Azure OpenAI error: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid input",
                    "details": details,
                })),
            )
                .into_response(),
            AppError::Upstream(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Azure OpenAI error",
                    "details": detail,
                })),
            )
                .into_response(),
        }
    }
}

/// Converts a panic anywhere in the request path into a generic 500.
/// Wired into `CatchPanicLayer` in `main`; internals never reach the client.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("Unhandled panic in request path: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
