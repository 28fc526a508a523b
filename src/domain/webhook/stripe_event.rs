//! Stripe webhook event types.
//!
//! Defines the structures for parsing Stripe webhook payloads.
//! Only fields relevant to our processing are captured.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stripe webhook event (simplified).
///
/// Contains the essential fields needed for webhook processing.
/// Additional fields from Stripe's full event schema are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "charge.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    #[serde(default)]
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,

    /// API version used to render this event.
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Stripe Charge object, reduced to the fields the relay forwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StripeCharge {
    /// Charge identifier (ch_xxx format).
    pub id: String,

    /// Metadata copied from the payment intent at checkout time.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Hosted receipt page; absent until Stripe renders one.
    #[serde(default)]
    pub receipt_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_event() {
        let json = r#"{
            "id": "evt_1",
            "type": "charge.succeeded",
            "data": {"object": {"id": "ch_1"}}
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "charge.succeeded");
        assert!(!event.livemode);
        assert!(event.api_version.is_none());
    }

    #[test]
    fn charge_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "evt_1",
            "type": "charge.succeeded",
            "data": {"object": {"id": "ch_1", "receipt_url": null}}
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();
        let charge: StripeCharge = event.deserialize_object().unwrap();

        assert_eq!(charge.id, "ch_1");
        assert!(charge.metadata.is_empty());
        assert!(charge.receipt_url.is_none());
    }

    #[test]
    fn charge_without_id_fails() {
        let json = r#"{
            "id": "evt_1",
            "type": "charge.succeeded",
            "data": {"object": {"amount": 100}}
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();
        assert!(event.deserialize_object::<StripeCharge>().is_err());
    }
}
