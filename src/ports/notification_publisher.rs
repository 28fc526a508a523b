//! NotificationPublisher port - Interface for announcing payment outcomes.
//!
//! The webhook handler publishes to a topic without knowing which message
//! bus sits behind it (NATS, Redis, a log sink in development).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Port for publishing fire-and-forget bus notifications.
///
/// Implementations must return `Err` whenever the bus did not accept the
/// message, so the caller can ask the webhook sender to redeliver.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish a single message to its topic.
    async fn publish(&self, message: BusMessage) -> Result<(), PublishError>;

    /// Short transport name for logs and health output.
    fn transport(&self) -> &'static str;
}

/// A message bound for the bus.
#[derive(Debug, Clone, PartialEq)]
pub struct BusMessage {
    /// Unique message id, used by transports that deduplicate.
    pub id: Uuid,

    /// Topic (NATS subject or Redis channel).
    pub topic: String,

    /// JSON payload.
    pub payload: Value,

    pub created_at: DateTime<Utc>,
}

/// The envelope consumers decode: `{"pattern": <topic>, "data": <payload>}`.
#[derive(Serialize)]
struct WireEnvelope<'a> {
    pattern: &'a str,
    data: &'a Value,
}

impl BusMessage {
    /// Builds a message from any serializable payload.
    pub fn new(topic: impl Into<String>, payload: &impl Serialize) -> Result<Self, PublishError> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        Ok(Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            payload,
            created_at: Utc::now(),
        })
    }

    /// Encodes the message body as sent on the wire.
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>, PublishError> {
        serde_json::to_vec(&WireEnvelope {
            pattern: &self.topic,
            data: &self.payload,
        })
        .map_err(|e| PublishError::Serialization(e.to_string()))
    }
}

/// Errors from publishing to the bus.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("Bus connection failed: {0}")]
    Connection(String),

    #[error("Bus rejected message: {0}")]
    Rejected(String),

    #[error("Bus operation timed out")]
    Timeout,

    #[error("Failed to serialize message: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn NotificationPublisher) {}
    }

    #[test]
    fn wire_envelope_wraps_payload_under_pattern() {
        let message = BusMessage::new("payment.succeeded", &json!({"orderId": "X"})).unwrap();

        let wire: Value = serde_json::from_slice(&message.to_wire_bytes().unwrap()).unwrap();

        assert_eq!(
            wire,
            json!({"pattern": "payment.succeeded", "data": {"orderId": "X"}})
        );
    }

    #[test]
    fn messages_get_distinct_ids() {
        let a = BusMessage::new("t", &json!({})).unwrap();
        let b = BusMessage::new("t", &json!({})).unwrap();
        assert_ne!(a.id, b.id);
    }
}
