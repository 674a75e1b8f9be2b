use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/health
/// Liveness plus a startup-time check of the upstream credential. There is no
/// database; that check always reports "not applicable".
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let azure_openai = if state.config.azure_openai_key.is_some() {
        "configured"
    } else {
        "missing key"
    };

    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "AI Delivery Compliance Coach",
        "checks": {
            "database": "not applicable",
            "azure_openai": azure_openai,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::SocketAddr;
    use std::time::Duration;

    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::rate_limit::RateLimiter;
    use crate::routes::build_router;

    fn state_with_key(azure_openai_key: Option<String>) -> AppState {
        let config = Config {
            azure_openai_key,
            azure_openai_endpoint: "http://127.0.0.1:9/".to_string(),
            port: 0,
            allowed_origins: None,
            rate_limit: 100,
            rate_window: Duration::from_secs(900),
            upstream_timeout: Duration::from_secs(1),
            production: false,
            log_level: "info".to_string(),
        };
        AppState {
            llm: LlmClient::new(
                config.azure_openai_endpoint.clone(),
                config.azure_openai_key.clone(),
                config.upstream_timeout,
            ),
            limiter: RateLimiter::new(config.rate_limit, config.rate_window),
            config,
        }
    }

    async fn get_health(state: AppState) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40001))));

        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_configured_key() {
        let (status, body) = get_health(state_with_key(Some("test-key".to_string()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "AI Delivery Compliance Coach");
        assert_eq!(body["checks"]["database"], "not applicable");
        assert_eq!(body["checks"]["azure_openai"], "configured");
        assert!(body["timestamp"].as_str().is_some());
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_reports_missing_key() {
        let (status, body) = get_health(state_with_key(None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["azure_openai"], "missing key");
    }
}
