//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the payment processor handle and configuration.

use pay_core::{SharedPaymentProcessor, UnconfiguredProcessor};
use pay_stripe::StripeProcessor;
use std::net::SocketAddr;
use std::sync::Arc;

/// Port the server listens on unless `PORT` says otherwise
pub const DEFAULT_PORT: u16 = 5000;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Log line format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_format: std::env::var("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// External payment processor
    pub processor: SharedPaymentProcessor,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state around an explicit processor
    pub fn new(processor: SharedPaymentProcessor, config: AppConfig) -> Self {
        Self { processor, config }
    }

    /// Create state backed by Stripe, with credentials from the environment.
    ///
    /// Missing or invalid Stripe credentials do not stop the server: the
    /// processor is replaced by one that fails every call, and only the
    /// mock and health endpoints keep working.
    pub fn with_stripe(config: AppConfig) -> Self {
        let processor: SharedPaymentProcessor = match StripeProcessor::from_env() {
            Ok(stripe) => Arc::new(stripe),
            Err(e) => {
                tracing::warn!("Stripe unavailable, processor calls will fail: {}", e);
                Arc::new(UnconfiguredProcessor::new(e.message()))
            }
        };

        Self::new(processor, config)
    }

    /// Name of the active processor
    pub fn provider_name(&self) -> &'static str {
        self.processor.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(!config.is_production());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }

    #[test]
    fn test_state_uses_given_processor() {
        let state = AppState::new(
            Arc::new(UnconfiguredProcessor::new("no key")),
            AppConfig::default(),
        );
        assert_eq!(state.provider_name(), "unconfigured");
    }
}
