//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use http::{HeaderMap, StatusCode};
use secrecy::SecretString;

use crate::application::handlers::payments::{
    CreatePaymentSessionHandler, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
    RedirectUrls,
};
use crate::config::{AppConfig, PublishFailurePolicy};
use crate::domain::checkout::CheckoutError;
use crate::domain::webhook::{WebhookError, WebhookVerifier};
use crate::ports::{NotificationPublisher, PaymentProvider};

use super::dto::{
    CreatePaymentSessionRequest, CreatePaymentSessionResponse, ErrorResponse,
    RedirectLandingResponse, WebhookAckResponse,
};

const SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub publisher: Arc<dyn NotificationPublisher>,
    pub redirects: RedirectUrls,
    pub webhook_secret: SecretString,
    pub webhook_tolerance_secs: i64,
    pub failure_policy: PublishFailurePolicy,
}

impl PaymentsAppState {
    /// Wires state from validated configuration and connected adapters.
    pub fn from_config(
        config: &AppConfig,
        payment_provider: Arc<dyn PaymentProvider>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            payment_provider,
            publisher,
            redirects: RedirectUrls {
                success_url: config.payment.success_url.clone(),
                cancel_url: config.payment.cancel_url.clone(),
            },
            webhook_secret: SecretString::new(config.payment.stripe_endpoint_secret.clone()),
            webhook_tolerance_secs: config.payment.webhook_tolerance_secs,
            failure_policy: config.bus.publish_failure_policy,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_session_handler(&self) -> CreatePaymentSessionHandler {
        CreatePaymentSessionHandler::new(self.payment_provider.clone(), self.redirects.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            WebhookVerifier::with_tolerance(
                self.webhook_secret.clone(),
                self.webhook_tolerance_secs,
            ),
            self.publisher.clone(),
            self.failure_policy,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payments/create-payment-session - Open a hosted checkout for an order
pub async fn create_payment_session(
    State(state): State<PaymentsAppState>,
    payload: Result<Json<CreatePaymentSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Json(request) = payload?;

    let handler = state.create_session_handler();
    let result = handler.handle(request.into()).await?;

    Ok(Json(CreatePaymentSessionResponse::from(result)))
}

/// POST /payments/webhook - Relay Stripe webhook events
///
/// The body is taken as raw bytes; re-serialized JSON would not verify.
pub async fn handle_stripe_webhook(
    State(state): State<PaymentsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.clone(),
    };

    handler.handle(cmd).await?;

    Ok(Json(WebhookAckResponse {
        signature: signature.unwrap_or_default(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Redirect Landing Pages (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /payments/success
pub async fn payment_success() -> impl IntoResponse {
    Json(RedirectLandingResponse {
        ok: true,
        message: "Payment successful".to_string(),
    })
}

/// GET /payments/cancelled
pub async fn payment_cancelled() -> impl IntoResponse {
    Json(RedirectLandingResponse {
        ok: false,
        message: "Payment cancelled".to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to JSON HTTP responses.
#[derive(Debug)]
pub enum PaymentsApiError {
    /// Body was not valid JSON or did not match the request shape.
    MalformedBody(String),
    Checkout(CheckoutError),
}

impl From<JsonRejection> for PaymentsApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<CheckoutError> for PaymentsApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Checkout(err)
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            PaymentsApiError::MalformedBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_FAILED", message),
            ),
            PaymentsApiError::Checkout(CheckoutError::Validation(e)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_FAILED", e.to_string()),
            ),
            PaymentsApiError::Checkout(CheckoutError::SessionCreationFailed(e)) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new("SESSION_CREATION_FAILED", "Failed to create checkout session")
                    .with_details(serde_json::json!({
                        "code": e.code,
                        "retryable": e.retryable,
                    })),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Webhook failures are answered in plain text: `Webhook Error: <reason>`.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        (self.0.status_code(), format!("Webhook Error: {}", self.0)).into_response()
    }
}
