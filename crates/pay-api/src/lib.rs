//! # pay-api
//!
//! HTTP API layer for the payment gateway facade.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints relaying payment operations to the processor
//! - A mock payment endpoint for environments without credentials
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/payments/create-intent` | Create payment intent |
//! | POST | `/api/payments/confirm-intent` | Confirm payment intent |
//! | GET | `/api/payments/status/{paymentIntentId}` | Payment intent status |
//! | POST | `/api/payments/process` | Mock payment |
//! | POST | `/api/payments/create-checkout-session` | Hosted checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
