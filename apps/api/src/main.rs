mod config;
mod errors;
mod llm_client;
mod rate_limit;
mod recommendations;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Result;
use axum::http::header::{X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::HeaderValue;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rate_limit::RateLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Compliance Coach API v{}",
        env!("CARGO_PKG_VERSION")
    );

    if config.azure_openai_key.is_none() {
        error!("AZURE_OPENAI_KEY is not configured");
    }
    // Production refuses to serve without a credential; exits before binding.
    config.check_startup()?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.azure_openai_endpoint.clone(),
        config.azure_openai_key.clone(),
        config.upstream_timeout,
    );

    // IP-keyed request counter shared by all /api/* routes
    let limiter = RateLimiter::new(config.rate_limit, config.rate_window);

    // Build app state
    let state = AppState {
        llm,
        limiter,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(errors::handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(build_cors(&config));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Server running on port {} (production: {}, api key configured: {})",
        config.port,
        config.production,
        config.azure_openai_key.is_some()
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// CORS from the configured allow-list; permissive when none is set.
fn build_cors(config: &Config) -> CorsLayer {
    match &config.allowed_origins {
        Some(allowed) => {
            let origins: Vec<HeaderValue> = allowed
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
