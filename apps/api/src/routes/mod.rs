pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::rate_limit::rate_limit_middleware;
use crate::recommendations::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/recommendations",
            post(handlers::handle_recommendations),
        )
        // Applies to every route above, health included.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}
