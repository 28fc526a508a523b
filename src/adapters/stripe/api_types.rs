//! Stripe REST API response types.
//!
//! Only the fields the adapter reads are captured.

use serde::Deserialize;

/// Checkout Session object returned by `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    /// Session identifier (cs_xxx format).
    pub id: String,

    /// Hosted payment page. Null once the session is complete or expired.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub success_url: Option<String>,

    #[serde(default)]
    pub cancel_url: Option<String>,

    #[serde(default)]
    pub livemode: bool,
}

/// Error envelope Stripe returns with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Error category, e.g. `invalid_request_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Machine-readable code, e.g. `parameter_missing`.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Offending request parameter, when the error names one.
    #[serde(default)]
    pub param: Option<String>,
}

impl StripeApiError {
    /// Stripe's message, suffixed with the offending parameter if any.
    pub fn describe(&self) -> Option<String> {
        let message = self.message.as_deref()?;
        Some(match &self.param {
            Some(param) => format!("{} (param: {})", message, param),
            None => message.to_string(),
        })
    }
}
