//! # Payment Intent Types
//!
//! Shapes exchanged with the payment processor. The processor owns the
//! intent lifecycle; these types only carry what it reports.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment intent, as reported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Succeeded,
    Canceled,
}

impl PaymentIntentStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentIntentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentIntentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentIntentStatus::RequiresAction => "requires_action",
            PaymentIntentStatus::Processing => "processing",
            PaymentIntentStatus::RequiresCapture => "requires_capture",
            PaymentIntentStatus::Succeeded => "succeeded",
            PaymentIntentStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment intent as returned by the processor.
///
/// Only the fields the facade reads are typed; everything else the
/// processor sent is kept in `extra` so the full object can be relayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor's intent ID (`pi_...`)
    pub id: String,

    /// Lifecycle status
    pub status: PaymentIntentStatus,

    /// Amount in minor units
    pub amount: i64,

    /// Lowercase ISO currency code
    pub currency: String,

    /// Secret handed to the client to complete payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Remaining processor fields, untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaymentIntent {
    /// Reduced view used by the status endpoint
    pub fn view(&self) -> PaymentIntentView {
        PaymentIntentView {
            id: self.id.clone(),
            status: self.status,
            amount: self.amount,
            currency: self.currency.clone(),
        }
    }
}

/// Exactly the four fields exposed by status retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentView {
    pub id: String,
    pub status: PaymentIntentStatus,
    pub amount: i64,
    pub currency: String,
}

/// Free-form metadata; the processor stringifies scalar values
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Parameters for creating a payment intent
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntentParams {
    /// Amount in minor units
    pub amount: i64,
    pub currency: String,
    pub metadata: Metadata,
}

/// Parameters for creating a hosted checkout session
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
    /// Line items, forwarded to the processor verbatim
    pub line_items: Vec<serde_json::Value>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Metadata,
}

/// A hosted checkout session created by the processor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Processor's session ID (`cs_...`)
    pub id: String,

    /// Redirect URL; the processor may omit it
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        let status: PaymentIntentStatus =
            serde_json::from_value(json!("requires_payment_method")).unwrap();
        assert_eq!(status, PaymentIntentStatus::RequiresPaymentMethod);
        assert_eq!(
            serde_json::to_value(PaymentIntentStatus::Canceled).unwrap(),
            json!("canceled")
        );
        assert_eq!(PaymentIntentStatus::Succeeded.to_string(), "succeeded");
    }

    #[test]
    fn test_intent_keeps_unknown_fields() {
        let raw = json!({
            "id": "pi_123",
            "object": "payment_intent",
            "status": "succeeded",
            "amount": 1999,
            "currency": "usd",
            "client_secret": "pi_123_secret_abc",
            "payment_method": "pm_card_visa",
            "metadata": {"order": "42"}
        });

        let intent: PaymentIntent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(intent.amount, 1999);
        assert_eq!(intent.client_secret.as_deref(), Some("pi_123_secret_abc"));
        assert_eq!(intent.extra["payment_method"], json!("pm_card_visa"));

        assert_eq!(serde_json::to_value(&intent).unwrap(), raw);
    }

    #[test]
    fn test_view_has_exactly_four_fields() {
        let intent: PaymentIntent = serde_json::from_value(json!({
            "id": "pi_1",
            "status": "processing",
            "amount": 500,
            "currency": "eur",
            "client_secret": "secret",
            "livemode": false
        }))
        .unwrap();

        let value = serde_json::to_value(intent.view()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(value, json!({"id": "pi_1", "status": "processing", "amount": 500, "currency": "eur"}));
    }

    #[test]
    fn test_checkout_session_without_url() {
        let session: CheckoutSession = serde_json::from_value(json!({
            "id": "cs_test_1",
            "url": null,
            "mode": "payment"
        }))
        .unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert!(session.url.is_none());
    }
}
