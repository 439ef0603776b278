//! In-memory processor for handler tests.

use async_trait::async_trait;
use pay_core::{
    CheckoutSession, CheckoutSessionParams, CreateIntentParams, PaymentError, PaymentIntent,
    PaymentIntentStatus, PaymentProcessor, PaymentResult,
};
use std::sync::Mutex;

/// A processor call as seen by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateIntent(CreateIntentParams),
    Confirm {
        intent_id: String,
        payment_method_id: String,
    },
    Retrieve(String),
    Checkout(CheckoutSessionParams),
}

/// Records every call; answers with canned objects or a fixed failure
pub struct FakeProcessor {
    failure: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProcessor {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> PaymentResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(PaymentError::ProviderError {
                provider: "fake".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn intent(id: &str, status: PaymentIntentStatus, amount: i64, currency: &str) -> PaymentIntent {
        let mut extra = serde_json::Map::new();
        extra.insert("object".to_string(), "payment_intent".into());
        extra.insert("livemode".to_string(), false.into());

        PaymentIntent {
            id: id.to_string(),
            status,
            amount,
            currency: currency.to_string(),
            client_secret: Some(format!("{}_secret_test", id)),
            extra,
        }
    }
}

#[async_trait]
impl PaymentProcessor for FakeProcessor {
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        self.record(Call::CreateIntent(params.clone()))?;
        Ok(Self::intent(
            "pi_fake",
            PaymentIntentStatus::RequiresPaymentMethod,
            params.amount,
            &params.currency,
        ))
    }

    async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        payment_method_id: &str,
    ) -> PaymentResult<PaymentIntent> {
        self.record(Call::Confirm {
            intent_id: intent_id.to_string(),
            payment_method_id: payment_method_id.to_string(),
        })?;
        Ok(Self::intent(intent_id, PaymentIntentStatus::Succeeded, 1999, "usd"))
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent> {
        self.record(Call::Retrieve(intent_id.to_string()))?;
        Ok(Self::intent(intent_id, PaymentIntentStatus::Processing, 1999, "usd"))
    }

    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<CheckoutSession> {
        self.record(Call::Checkout(params.clone()))?;
        Ok(CheckoutSession {
            id: "cs_fake".to_string(),
            url: Some("https://checkout.test/cs_fake".to_string()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
