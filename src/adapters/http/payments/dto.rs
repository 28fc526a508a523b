//! Request and response DTOs for payment endpoints.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::payments::{CheckoutItemInput, CreatePaymentSessionCommand};
use crate::domain::checkout::CheckoutResult;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /payments/create-payment-session`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentSessionRequest {
    pub items: Vec<CheckoutItemRequest>,
    pub currency: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItemRequest {
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
    pub quantity: i64,
}

impl From<CreatePaymentSessionRequest> for CreatePaymentSessionCommand {
    fn from(req: CreatePaymentSessionRequest) -> Self {
        Self {
            items: req
                .items
                .into_iter()
                .map(|item| CheckoutItemInput {
                    name: item.name,
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            currency: req.currency,
            order_id: req.order_id,
        }
    }
}

/// Price as sent by clients: a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(serde_json::Number),
    Text(String),
}

/// Parses a price from its textual form so `9.995` stays exactly `9.995`.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n.to_string(),
        RawPrice::Text(s) => s.trim().to_string(),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| serde::de::Error::custom(format!("invalid price: {}", text)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentSessionResponse {
    pub success_url: String,
    pub cancel_url: String,
    /// Hosted checkout page the client should redirect to.
    pub url: String,
}

impl From<CheckoutResult> for CreatePaymentSessionResponse {
    fn from(result: CheckoutResult) -> Self {
        Self {
            success_url: result.success_url,
            cancel_url: result.cancel_url,
            url: result.redirect_url,
        }
    }
}

/// Acknowledgement returned to Stripe; echoes the signature header.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub signature: String,
}

/// Body of the redirect landing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectLandingResponse {
    pub ok: bool,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
