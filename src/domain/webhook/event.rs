//! Verified payment events and the notifications derived from them.

use serde::{Deserialize, Serialize};

use super::errors::WebhookError;
use super::stripe_event::{StripeCharge, StripeEvent};

/// Bus topic for successful charge notifications.
pub const PAYMENT_SUCCEEDED_TOPIC: &str = "payment.succeeded";

/// Metadata key the session creator attaches to every payment intent.
pub const ORDER_ID_METADATA_KEY: &str = "orderId";

const CHARGE_SUCCEEDED: &str = "charge.succeeded";

/// Event kinds the dispatcher understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    /// A charge was captured successfully.
    ChargeSucceeded(StripeCharge),

    /// Any kind the service does not act on.
    Unrecognized { kind: String },
}

impl PaymentEvent {
    /// Classifies a verified Stripe event.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` when a recognized kind carries an
    /// object that does not match its schema.
    pub fn from_stripe(event: &StripeEvent) -> Result<Self, WebhookError> {
        match event.event_type.as_str() {
            CHARGE_SUCCEEDED => {
                let charge: StripeCharge = event
                    .deserialize_object()
                    .map_err(|e| WebhookError::ParseError(format!("Invalid charge: {}", e)))?;
                Ok(PaymentEvent::ChargeSucceeded(charge))
            }
            other => Ok(PaymentEvent::Unrecognized {
                kind: other.to_string(),
            }),
        }
    }

    /// The Stripe event type string.
    pub fn kind(&self) -> &str {
        match self {
            PaymentEvent::ChargeSucceeded(_) => CHARGE_SUCCEEDED,
            PaymentEvent::Unrecognized { kind } => kind,
        }
    }
}

/// Message published when a charge succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSucceededNotification {
    pub stripe_payment_id: String,
    pub order_id: String,
    pub receipt_url: Option<String>,
}

impl ChargeSucceededNotification {
    /// Derives the notification from a charge.
    ///
    /// Returns `None` when the charge carries no order id, i.e. it was not
    /// created through this service's checkout sessions.
    pub fn from_charge(charge: &StripeCharge) -> Option<Self> {
        let order_id = charge
            .metadata
            .get(ORDER_ID_METADATA_KEY)
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())?;

        Some(Self {
            stripe_payment_id: charge.id.clone(),
            order_id: order_id.to_string(),
            receipt_url: charge.receipt_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(kind: &str, object: serde_json::Value) -> StripeEvent {
        serde_json::from_value(json!({
            "id": "evt_test",
            "type": kind,
            "data": {"object": object}
        }))
        .unwrap()
    }

    #[test]
    fn classifies_charge_succeeded() {
        let event = event(
            "charge.succeeded",
            json!({"id": "C", "metadata": {"orderId": "X"}, "receipt_url": "R"}),
        );

        let parsed = PaymentEvent::from_stripe(&event).unwrap();

        assert_eq!(parsed.kind(), "charge.succeeded");
        assert!(matches!(parsed, PaymentEvent::ChargeSucceeded(ref c) if c.id == "C"));
    }

    #[test]
    fn classifies_unknown_kinds() {
        let event = event("payment_intent.created", json!({"id": "pi_1"}));

        let parsed = PaymentEvent::from_stripe(&event).unwrap();

        assert_eq!(
            parsed,
            PaymentEvent::Unrecognized {
                kind: "payment_intent.created".to_string()
            }
        );
    }

    #[test]
    fn malformed_charge_is_parse_error() {
        let event = event("charge.succeeded", json!({"metadata": "nope"}));

        let result = PaymentEvent::from_stripe(&event);

        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn notification_maps_fields_exactly() {
        let charge = StripeCharge {
            id: "C".to_string(),
            metadata: [("orderId".to_string(), "X".to_string())].into(),
            receipt_url: Some("R".to_string()),
        };

        let notification = ChargeSucceededNotification::from_charge(&charge).unwrap();

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({"stripePaymentId": "C", "orderId": "X", "receiptUrl": "R"})
        );
    }

    #[test]
    fn notification_keeps_null_receipt() {
        let charge = StripeCharge {
            id: "C".to_string(),
            metadata: [("orderId".to_string(), "X".to_string())].into(),
            receipt_url: None,
        };

        let notification = ChargeSucceededNotification::from_charge(&charge).unwrap();

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({"stripePaymentId": "C", "orderId": "X", "receiptUrl": null})
        );
    }

    #[test]
    fn charge_without_order_id_yields_nothing() {
        let charge = StripeCharge {
            id: "C".to_string(),
            metadata: Default::default(),
            receipt_url: None,
        };
        assert!(ChargeSucceededNotification::from_charge(&charge).is_none());

        let blank = StripeCharge {
            metadata: [("orderId".to_string(), " ".to_string())].into(),
            ..charge
        };
        assert!(ChargeSucceededNotification::from_charge(&blank).is_none());
    }
}
