//! IP-keyed request throttling for the `/api/*` surface.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::state::AppState;

/// Body returned on every throttled request.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client IP.
///
/// Counting a request holds the map lock, so concurrent requests from one IP
/// never double-spend the budget. A window resets the first time a request
/// arrives after it has elapsed.
///
/// The key is the peer IP only; clients behind a shared NAT or proxy share a
/// budget.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    counters: Arc<Mutex<HashMap<IpAddr, Window>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counters: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Records one request from `ip` at `now`. Returns `false` once the
    /// window budget is spent.
    pub fn try_acquire(&self, ip: IpAddr, now: Instant) -> bool {
        let mut counters = self.counters.lock().expect("rate limiter lock poisoned");
        let window = counters.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

/// Axum middleware applying the shared limiter to every routed request.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.limiter.try_acquire(addr.ip(), Instant::now()) {
        warn!("rate limit exceeded for {}", addr.ip());
        return (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
    }
    next.run(request).await
}
