//! # Payment Processor Trait
//!
//! The seam between the HTTP facade and the external processor.
//! Implementations: Stripe (`pay-stripe`), `UnconfiguredProcessor`, and
//! in-memory fakes in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentProcessor (trait)                   │
//! │  ├── create_payment_intent()                                │
//! │  ├── confirm_payment_intent()                               │
//! │  ├── retrieve_payment_intent()                              │
//! │  ├── create_checkout_session()                              │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │                   │
//!          ┌───────┴───────┐   ┌───────┴───────┐
//!          │StripeProcessor│   │ Unconfigured  │
//!          └───────────────┘   └───────────────┘
//! ```

use crate::error::{PaymentError, PaymentResult};
use crate::intent::{CheckoutSession, CheckoutSessionParams, CreateIntentParams, PaymentIntent};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the facade delegates to the external processor.
///
/// Each method is a single round trip: no retries, no idempotency keys.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment intent with automatic payment-method selection.
    async fn create_payment_intent(&self, params: &CreateIntentParams)
        -> PaymentResult<PaymentIntent>;

    /// Confirm an intent using the given payment method.
    async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        payment_method_id: &str,
    ) -> PaymentResult<PaymentIntent>;

    /// Fetch the current state of an intent.
    async fn retrieve_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent>;

    /// Create a hosted, card-only checkout session.
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared processor handle (dynamic dispatch)
pub type SharedPaymentProcessor = Arc<dyn PaymentProcessor>;

/// Stand-in used when no processor credentials are configured.
///
/// Every call fails with a configuration error, which keeps the server
/// usable for the mock endpoint.
#[derive(Debug, Clone)]
pub struct UnconfiguredProcessor {
    reason: String,
}

impl UnconfiguredProcessor {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> PaymentError {
        PaymentError::Configuration(self.reason.clone())
    }
}

#[async_trait]
impl PaymentProcessor for UnconfiguredProcessor {
    async fn create_payment_intent(&self, _: &CreateIntentParams) -> PaymentResult<PaymentIntent> {
        Err(self.error())
    }

    async fn confirm_payment_intent(&self, _: &str, _: &str) -> PaymentResult<PaymentIntent> {
        Err(self.error())
    }

    async fn retrieve_payment_intent(&self, _: &str) -> PaymentResult<PaymentIntent> {
        Err(self.error())
    }

    async fn create_checkout_session(
        &self,
        _: &CheckoutSessionParams,
    ) -> PaymentResult<CheckoutSession> {
        Err(self.error())
    }

    fn provider_name(&self) -> &'static str {
        "unconfigured"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_processor_fails_every_call() {
        let processor: SharedPaymentProcessor =
            Arc::new(UnconfiguredProcessor::new("STRIPE_SECRET_KEY not set"));

        let params = CreateIntentParams {
            amount: 100,
            currency: "usd".into(),
            metadata: Default::default(),
        };
        let err = processor.create_payment_intent(&params).await.unwrap_err();
        assert!(matches!(err, PaymentError::Configuration(_)));
        assert!(err.message().contains("STRIPE_SECRET_KEY"));

        assert!(processor.retrieve_payment_intent("pi_1").await.is_err());
        assert!(processor.confirm_payment_intent("pi_1", "pm_1").await.is_err());
        assert_eq!(processor.provider_name(), "unconfigured");
    }
}
