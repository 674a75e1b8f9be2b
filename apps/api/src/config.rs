use std::time::Duration;

use anyhow::{Context, Result};

/// Chat-completions deployment used when `AZURE_OPENAI_ENDPOINT` is not set.
const DEFAULT_ENDPOINT: &str = "https://ameya-3557-resource.cognitiveservices.azure.com/openai/deployments/gpt-4o-mini/chat/completions?api-version=2023-03-15-preview";

/// Rate-limit window. Fixed at 15 minutes; only the request budget within the
/// window is configurable.
const RATE_WINDOW_SECS: u64 = 15 * 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credential. Absent outside production means the service starts
    /// degraded and every completion call fails with an upstream auth error.
    pub azure_openai_key: Option<String>,
    pub azure_openai_endpoint: String,
    pub port: u16,
    /// CORS allow-list. `None` means permissive.
    pub allowed_origins: Option<Vec<String>>,
    /// Max requests per IP per window across all `/api/*` routes.
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub upstream_timeout: Duration,
    /// Production tightens startup checks and sanitizes upstream error bodies.
    pub production: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            azure_openai_key: std::env::var("AZURE_OPENAI_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            azure_openai_endpoint: std::env::var("AZURE_OPENAI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|origins| !origins.is_empty()),
            rate_limit: std::env::var("RATE_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<u32>()
                .context("RATE_LIMIT must be a positive integer")?,
            rate_window: Duration::from_secs(RATE_WINDOW_SECS),
            upstream_timeout: Duration::from_secs(
                std::env::var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be a number of seconds")?,
            ),
            production: std::env::var("APP_ENV")
                .map(|env| env == "production")
                .unwrap_or(false),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Production deployments refuse to serve traffic without a credential.
    /// Called before the listener binds.
    pub fn check_startup(&self) -> Result<()> {
        if self.production && self.azure_openai_key.is_none() {
            anyhow::bail!("AZURE_OPENAI_KEY must be set when APP_ENV=production");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            azure_openai_key: Some("test-key".to_string()),
            azure_openai_endpoint: DEFAULT_ENDPOINT.to_string(),
            port: 5000,
            allowed_origins: None,
            rate_limit: 100,
            rate_window: Duration::from_secs(RATE_WINDOW_SECS),
            upstream_timeout: Duration::from_secs(30),
            production: false,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_startup_ok_with_key_in_production() {
        let config = Config {
            production: true,
            ..base_config()
        };
        assert!(config.check_startup().is_ok());
    }

    #[test]
    fn test_startup_rejected_without_key_in_production() {
        let config = Config {
            production: true,
            azure_openai_key: None,
            ..base_config()
        };
        assert!(config.check_startup().is_err());
    }

    #[test]
    fn test_startup_ok_without_key_outside_production() {
        let config = Config {
            azure_openai_key: None,
            ..base_config()
        };
        assert!(config.check_startup().is_ok());
    }
}
