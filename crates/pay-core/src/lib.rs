//! # pay-core
//!
//! Core types and traits for the payment gateway facade.
//!
//! This crate provides:
//! - `PaymentProcessor` trait for the external processor collaborator
//! - `PaymentIntent`, `PaymentIntentView` and `CheckoutSession` shapes
//! - Major to minor unit conversion
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{to_minor_units, CreateIntentParams, PaymentProcessor};
//!
//! let params = CreateIntentParams {
//!     amount: to_minor_units(19.99),
//!     currency: "usd".into(),
//!     metadata: Default::default(),
//! };
//!
//! let intent = processor.create_payment_intent(&params).await?;
//! // Hand intent.client_secret to the browser
//! ```

pub mod error;
pub mod intent;
pub mod money;
pub mod processor;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use intent::{
    CheckoutSession, CheckoutSessionParams, CreateIntentParams, Metadata, PaymentIntent,
    PaymentIntentStatus, PaymentIntentView,
};
pub use money::{
    amount_from_json, currency_from_json, minor_units_from_json, to_minor_units, DEFAULT_CURRENCY,
};
pub use processor::{PaymentProcessor, SharedPaymentProcessor, UnconfiguredProcessor};
