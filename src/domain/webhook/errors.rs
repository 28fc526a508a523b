//! Webhook error types for Stripe webhook handling.
//!
//! Every verification failure maps to 400 so Stripe stops redelivering a
//! payload that can never verify. Only a bus publish failure maps to a 5xx.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `stripe-signature` header was absent or not valid UTF-8.
    #[error("Missing stripe-signature header")]
    MissingSignature,

    /// No signature in the header matched the payload.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// Signature timestamp is older than the tolerance window.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Signature timestamp is in the future beyond clock skew tolerance.
    #[error("Timestamp is in the future")]
    InvalidTimestamp,

    /// Failed to parse the signature header or JSON payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The notification could not be handed to the message bus.
    #[error("Failed to publish notification: {0}")]
    PublishFailed(String),
}

impl WebhookError {
    /// Returns true if Stripe should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::PublishFailed(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Status codes determine Stripe's retry behavior:
    /// - 4xx: rejected, the payload will never verify
    /// - 5xx: Stripe will redeliver
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange
            | WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_) => StatusCode::BAD_REQUEST,

            WebhookError::PublishFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_displays_correctly() {
        let err = WebhookError::InvalidSignature;
        assert_eq!(
            err.to_string(),
            "No signatures found matching the expected signature for payload"
        );
    }

    #[test]
    fn parse_error_displays_message() {
        let err = WebhookError::ParseError("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid JSON");
    }

    #[test]
    fn verification_failures_return_bad_request() {
        for err in [
            WebhookError::MissingSignature,
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::InvalidTimestamp,
            WebhookError::ParseError("bad".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn publish_failure_is_retryable() {
        let err = WebhookError::PublishFailed("no responders".to_string());
        assert!(err.is_retryable());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
