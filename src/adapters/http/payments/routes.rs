//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_payment_session, handle_stripe_webhook, payment_cancelled, payment_success,
    PaymentsAppState,
};

/// Create the payments API router.
///
/// # Routes
///
/// - `POST /create-payment-session` - Start a hosted checkout for an order
/// - `POST /webhook` - Stripe webhook (no auth, signature verified)
/// - `GET /success` - Default landing page after payment
/// - `GET /cancelled` - Default landing page after abandoning checkout
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/payments", payment_routes())
///     .with_state(app_state);
/// ```
pub fn payment_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/create-payment-session", post(create_payment_session))
        .route("/webhook", post(handle_stripe_webhook))
        .route("/success", get(payment_success))
        .route("/cancelled", get(payment_cancelled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bus::InMemoryPublisher;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::payments::RedirectUrls;
    use crate::config::PublishFailurePolicy;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> PaymentsAppState {
        PaymentsAppState {
            payment_provider: Arc::new(MockPaymentProvider::new()),
            publisher: Arc::new(InMemoryPublisher::new()),
            redirects: RedirectUrls {
                success_url: "https://shop.test/ok".to_string(),
                cancel_url: "https://shop.test/cancel".to_string(),
            },
            webhook_secret: SecretString::new("whsec_routes".to_string()),
            webhook_tolerance_secs: 300,
            failure_policy: PublishFailurePolicy::Redeliver,
        }
    }

    fn test_app() -> Router {
        Router::new()
            .nest("/payments", payment_routes())
            .with_state(test_state())
    }

    #[tokio::test]
    async fn success_landing_route_exists() {
        let response = test_app()
            .oneshot(Request::get("/payments/success").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cancelled_landing_route_exists() {
        let response = test_app()
            .oneshot(Request::get("/payments/cancelled").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn webhook_requires_post() {
        let response = test_app()
            .oneshot(Request::get("/payments/webhook").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn session_route_rejects_non_json() {
        let response = test_app()
            .oneshot(
                Request::post("/payments/create-payment-session")
                    .header("content-type", "text/plain")
                    .body(Body::from("hello"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
