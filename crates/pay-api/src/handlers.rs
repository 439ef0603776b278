//! # Request Handlers
//!
//! Axum request handlers for the payment API.
//! Each handler makes at most one processor call and maps any failure to
//! a 500 with an `{error}` body.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{
    currency_from_json, minor_units_from_json, CheckoutSessionParams, CreateIntentParams,
    Metadata, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentIntentView,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request.
///
/// Fields are loosely typed: `amount` may be a number or a numeric string
/// and `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateIntentRequest {
    /// Amount in major units (e.g. 19.99)
    pub amount: Option<Value>,
    pub currency: Option<Value>,
    pub metadata: Option<Metadata>,
}

/// Create payment intent response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateIntentResponse {
    pub client_secret: Option<String>,
    #[serde(rename = "paymentIntentId")]
    pub payment_intent_id: String,
}

/// Confirm payment intent request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmIntentRequest {
    pub payment_intent_id: String,
    pub payment_method_id: String,
}

/// Mock payment request; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    /// Amount in major units
    pub amount: Option<Value>,
    pub currency: Option<Value>,
    /// Extra fields copied onto the fabricated intent when it is an object
    pub payment_data: Option<Value>,
}

/// Locally fabricated intent returned by the mock endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MockPaymentIntent {
    pub id: String,
    pub status: PaymentIntentStatus,
    /// `null` when the request carried no usable amount
    pub amount: Option<i64>,
    pub currency: String,
    /// Unix seconds
    pub created: i64,
    #[serde(flatten)]
    pub payment_data: Metadata,
}

impl MockPaymentIntent {
    const RESERVED: [&'static str; 5] = ["id", "status", "amount", "currency", "created"];

    /// Build a succeeded intent stamped with the current time.
    ///
    /// Only an object `payment_data` is merged, and its keys that collide
    /// with the core fields are dropped.
    pub fn succeeded(amount: Option<i64>, currency: String, payment_data: Option<Value>) -> Self {
        let now = chrono::Utc::now();
        let mut payment_data = match payment_data {
            Some(Value::Object(map)) => map,
            _ => Metadata::new(),
        };
        for key in Self::RESERVED {
            payment_data.remove(key);
        }

        Self {
            id: format!("pi_mock_{}", now.timestamp_millis()),
            status: PaymentIntentStatus::Succeeded,
            amount,
            currency,
            created: now.timestamp(),
            payment_data,
        }
    }
}

/// Mock payment response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessPaymentResponse {
    pub success: bool,
    #[serde(rename = "paymentIntent")]
    pub payment_intent: MockPaymentIntent,
}

/// Create checkout session request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    /// Line items, passed through untouched
    pub items: Vec<Value>,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Create checkout session response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCheckoutSessionResponse {
    pub id: String,
    pub url: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// =============================================================================
// Errors
// =============================================================================

/// Handler failure, always rendered as a 500
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::new(err.message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Log a failure for `operation` and convert it into an `ApiError`
fn failure<E>(operation: &'static str) -> impl FnOnce(E) -> ApiError
where
    E: Into<ApiError> + Display,
{
    move |err| {
        error!("Error {}: {}", operation, err);
        err.into()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "payment-gateway",
        "provider": state.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment intent with automatic payment methods
#[instrument(skip_all)]
pub async fn create_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreateIntentRequest>, JsonRejection>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    const OP: &str = "creating payment intent";
    let Json(request) = payload.map_err(failure(OP))?;

    let amount = minor_units_from_json(request.amount.as_ref())
        .ok_or_else(|| {
            let raw = request.amount.as_ref().unwrap_or(&Value::Null);
            ApiError::new(format!("Invalid amount: {}", raw))
        })
        .map_err(failure(OP))?;

    let params = CreateIntentParams {
        amount,
        currency: currency_from_json(request.currency.as_ref()),
        metadata: request.metadata.unwrap_or_default(),
    };

    let intent = state
        .processor
        .create_payment_intent(&params)
        .await
        .map_err(failure(OP))?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.id,
    }))
}

/// Confirm a payment intent and relay the processor's full intent object
#[instrument(skip_all)]
pub async fn confirm_intent(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmIntentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntent>, ApiError> {
    const OP: &str = "confirming payment intent";
    let Json(request) = payload.map_err(failure(OP))?;

    let intent = state
        .processor
        .confirm_payment_intent(&request.payment_intent_id, &request.payment_method_id)
        .await
        .map_err(failure(OP))?;

    Ok(Json(intent))
}

/// Get the status of a payment intent
#[instrument(skip_all)]
pub async fn payment_status(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PaymentIntentView>, ApiError> {
    const OP: &str = "getting payment status";
    let Path(payment_intent_id) = path.map_err(failure(OP))?;

    let intent = state
        .processor
        .retrieve_payment_intent(&payment_intent_id)
        .await
        .map_err(failure(OP))?;

    Ok(Json(intent.view()))
}

/// Simulate a successful payment without contacting the processor
#[instrument(skip_all)]
pub async fn process_payment(
    State(state): State<AppState>,
    payload: Result<Json<ProcessPaymentRequest>, JsonRejection>,
) -> Result<Json<ProcessPaymentResponse>, ApiError> {
    let Json(request) = payload.map_err(failure("processing payment"))?;

    if state.config.is_production() {
        warn!("Mock payment endpoint used in production environment");
    }

    let intent = MockPaymentIntent::succeeded(
        minor_units_from_json(request.amount.as_ref()),
        currency_from_json(request.currency.as_ref()),
        request.payment_data,
    );
    info!("Fabricated mock payment: id={}, amount={:?}", intent.id, intent.amount);

    Ok(Json(ProcessPaymentResponse {
        success: true,
        payment_intent: intent,
    }))
}

/// Create a hosted checkout session
#[instrument(skip_all)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateCheckoutSessionRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutSessionResponse>, ApiError> {
    const OP: &str = "creating checkout session";
    let Json(request) = payload.map_err(failure(OP))?;

    let params = CheckoutSessionParams {
        line_items: request.items,
        success_url: request.success_url,
        cancel_url: request.cancel_url,
        metadata: request.metadata.unwrap_or_default(),
    };

    let session = state
        .processor
        .create_checkout_session(&params)
        .await
        .map_err(failure(OP))?;

    Ok(Json(CreateCheckoutSessionResponse {
        id: session.id,
        url: session.url,
    }))
}
