//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! The secret key is loaded from the environment.

use pay_core::PaymentError;
use std::env;

/// Default Stripe API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Pinned Stripe API version
pub const API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_..., sk_live_... or a restricted rk_ key)
    pub secret_key: String,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE` (defaults to `https://api.stripe.com`)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PaymentError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        if !Self::is_valid_secret_key(&secret_key) {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_ or rk_".to_string(),
            ));
        }

        let mut config = Self::new(secret_key);
        if let Ok(base) = env::var("STRIPE_API_BASE") {
            config = config.with_api_base_url(base);
        }

        Ok(config)
    }

    /// Create config with an explicit key
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }

    fn is_valid_secret_key(key: &str) -> bool {
        key.starts_with("sk_") || key.starts_with("rk_")
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.contains("_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

// The secret key never reaches logs.
impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_mode_detection() {
        assert!(StripeConfig::new("sk_test_abc123").is_test_mode());
        assert!(StripeConfig::new("rk_test_abc123").is_test_mode());
        assert!(!StripeConfig::new("sk_live_abc123").is_test_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = StripeConfig::new("sk_test_abc123");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("api.stripe.com"));
    }

    #[test]
    fn test_from_env() {
        env::remove_var("STRIPE_SECRET_KEY");
        env::remove_var("STRIPE_API_BASE");
        assert!(StripeConfig::from_env().is_err());

        env::set_var("STRIPE_SECRET_KEY", "pk_test_wrong_kind");
        assert!(StripeConfig::from_env().is_err());

        env::set_var("STRIPE_SECRET_KEY", "sk_test_abc123");
        env::set_var("STRIPE_API_BASE", "http://127.0.0.1:9999");
        let config = StripeConfig::from_env().unwrap();
        assert_eq!(config.secret_key, "sk_test_abc123");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.api_version, API_VERSION);

        env::remove_var("STRIPE_SECRET_KEY");
        env::remove_var("STRIPE_API_BASE");
    }
}
