use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum
/// extractors. Built once at startup; the rate limiter is the only piece
/// holding cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub limiter: RateLimiter,
    pub config: Config,
}
