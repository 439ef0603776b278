//! # pay-stripe
//!
//! Stripe payment processor for the payment gateway facade.
//!
//! `StripeProcessor` implements `pay_core::PaymentProcessor` over four
//! Stripe endpoints:
//!
//! | Operation | Stripe call |
//! |-----------|-------------|
//! | create intent | `POST /v1/payment_intents` |
//! | confirm intent | `POST /v1/payment_intents/{id}/confirm` |
//! | retrieve intent | `GET /v1/payment_intents/{id}` |
//! | checkout session | `POST /v1/checkout/sessions` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeProcessor;
//! use pay_core::PaymentProcessor;
//!
//! // Create processor from environment
//! let processor = StripeProcessor::from_env()?;
//!
//! let intent = processor.retrieve_payment_intent("pi_123").await?;
//! println!("{} is {}", intent.id, intent.status);
//! ```

pub mod config;
pub mod form;
pub mod processor;

// Re-exports
pub use config::StripeConfig;
pub use form::FormParams;
pub use processor::StripeProcessor;
