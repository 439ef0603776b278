//! # Stripe Processor
//!
//! `PaymentProcessor` implementation over Stripe's REST API:
//! Payment Intents and Checkout Sessions.

use crate::config::StripeConfig;
use crate::form::FormParams;
use async_trait::async_trait;
use pay_core::{
    CheckoutSession, CheckoutSessionParams, CreateIntentParams, PaymentError, PaymentIntent,
    PaymentProcessor, PaymentResult,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe-backed payment processor
///
/// One pooled HTTP client; no request timeout is configured, so a slow
/// Stripe call holds its handler until Stripe answers.
pub struct StripeProcessor {
    config: StripeConfig,
    client: Client,
    base_url: Url,
}

impl StripeProcessor {
    /// Create a new Stripe processor
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            PaymentError::Configuration(format!(
                "Invalid Stripe API base URL {}: {}",
                config.api_base_url, e
            ))
        })?;

        let client = Client::builder()
            .user_agent(concat!("payment-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PaymentError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Stripe processor ready: base_url={}, test_mode={}",
            base_url,
            config.is_test_mode()
        );

        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    /// Build an endpoint URL, percent-encoding each path segment
    fn endpoint(&self, segments: &[&str]) -> PaymentResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::Configuration(format!(
                    "Stripe API base URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
    }

    /// Send a request and decode the response body
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> PaymentResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                if let Some(message) = error_response.error.message {
                    return Err(PaymentError::ProviderError {
                        provider: PROVIDER.to_string(),
                        message,
                    });
                }
            }

            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }

    fn intent_form(params: &CreateIntentParams) -> FormParams {
        let mut form = FormParams::new();
        form.push("amount", params.amount.to_string())
            .push("currency", params.currency.clone())
            .push("automatic_payment_methods[enabled]", "true")
            .push_object("metadata", &params.metadata);
        form
    }

    fn checkout_form(params: &CheckoutSessionParams) -> FormParams {
        let mut form = FormParams::new();
        form.push("payment_method_types[0]", "card")
            .push_list("line_items", &params.line_items)
            .push("mode", "payment")
            .push("success_url", params.success_url.clone())
            .push("cancel_url", params.cancel_url.clone())
            .push_object("metadata", &params.metadata);
        form
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        let form = Self::intent_form(params);
        debug!("Creating Stripe payment intent: {} fields", form.len());

        let url = self.endpoint(&["v1", "payment_intents"])?;
        let intent: PaymentIntent = self
            .execute(self.request(Method::POST, url).form(form.as_slice()))
            .await?;

        info!("Created payment intent: id={}, status={}", intent.id, intent.status);
        Ok(intent)
    }

    #[instrument(skip(self))]
    async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        payment_method_id: &str,
    ) -> PaymentResult<PaymentIntent> {
        let mut form = FormParams::new();
        form.push("payment_method", payment_method_id);

        let url = self.endpoint(&["v1", "payment_intents", intent_id, "confirm"])?;
        let intent: PaymentIntent = self
            .execute(self.request(Method::POST, url).form(form.as_slice()))
            .await?;

        info!("Confirmed payment intent: id={}, status={}", intent.id, intent.status);
        Ok(intent)
    }

    #[instrument(skip(self))]
    async fn retrieve_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent> {
        let url = self.endpoint(&["v1", "payment_intents", intent_id])?;
        let intent: PaymentIntent = self.execute(self.request(Method::GET, url)).await?;

        debug!("Retrieved payment intent: id={}, status={}", intent.id, intent.status);
        Ok(intent)
    }

    #[instrument(skip(self, params), fields(items = params.line_items.len()))]
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<CheckoutSession> {
        let form = Self::checkout_form(params);
        debug!("Creating Stripe checkout session: {} fields", form.len());

        let url = self.endpoint(&["v1", "checkout", "sessions"])?;
        let session: CheckoutSession = self
            .execute(self.request(Method::POST, url).form(form.as_slice()))
            .await?;

        info!(
            "Created Stripe checkout session: id={}, url={:?}",
            session.id, session.url
        );
        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
}
