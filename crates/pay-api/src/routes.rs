//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Payments:
///   - POST /api/payments/create-intent - Create payment intent
///   - POST /api/payments/confirm-intent - Confirm payment intent
///   - GET  /api/payments/status/{paymentIntentId} - Intent status
///   - POST /api/payments/process - Mock payment (no processor call)
///   - POST /api/payments/create-checkout-session - Hosted checkout
///
/// - Health:
///   - GET /health, GET /
pub fn create_router(state: AppState) -> Router {
    // Reflect the caller's origin
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(Any)
        .allow_headers(Any);

    let payment_routes = Router::new()
        .route("/create-intent", post(handlers::create_intent))
        .route("/confirm-intent", post(handlers::confirm_intent))
        .route("/status/{payment_intent_id}", get(handlers::payment_status))
        .route("/process", post(handlers::process_payment))
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/payments", payment_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
