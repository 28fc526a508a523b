//! Error types for checkout session creation.

use thiserror::Error;

use crate::ports::PaymentError;

/// Errors that occur while validating a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min}, got {actual}")]
    BelowMinimum {
        field: String,
        min: i64,
        actual: String,
    },

    #[error("Field '{field}' is too large")]
    TooLarge { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates a below-minimum validation error.
    pub fn below_minimum(field: impl Into<String>, min: i64, actual: impl ToString) -> Self {
        ValidationError::BelowMinimum {
            field: field.into(),
            min,
            actual: actual.to_string(),
        }
    }

    /// Creates a value-too-large validation error.
    pub fn too_large(field: impl Into<String>) -> Self {
        ValidationError::TooLarge {
            field: field.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the session creator.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    /// The request was rejected before any vendor call.
    #[error("Invalid checkout request: {0}")]
    Validation(#[from] ValidationError),

    /// The vendor rejected or failed the session creation call.
    #[error("Session creation failed: {0}")]
    SessionCreationFailed(PaymentError),
}

impl From<PaymentError> for CheckoutError {
    fn from(err: PaymentError) -> Self {
        CheckoutError::SessionCreationFailed(err)
    }
}
