//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the payment routes, the health probe and the
//! tower-http middleware stack into the service the binary serves.

pub mod payments;

use std::time::Duration;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use payments::{payment_routes, PaymentsAppState};

/// Service name reported by the health probe.
pub const SERVICE_NAME: &str = "payments-service";

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the complete application router.
///
/// Layers, outermost first: request id assignment, tracing, request id
/// propagation, then the per-request timeout.
pub fn app_router(state: PaymentsAppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/payments", payment_routes())
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
