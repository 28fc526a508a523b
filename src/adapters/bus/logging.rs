//! Log-only publisher for local development.

use async_trait::async_trait;

use crate::ports::{BusMessage, NotificationPublisher, PublishError};

/// Writes each notification to the log instead of a bus.
///
/// Rejected by configuration validation in production.
#[derive(Debug, Default, Clone)]
pub struct LoggingPublisher;

impl LoggingPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationPublisher for LoggingPublisher {
    async fn publish(&self, message: BusMessage) -> Result<(), PublishError> {
        tracing::info!(
            topic = %message.topic,
            message_id = %message.id,
            payload = %message.payload,
            "notification (log transport)"
        );
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "log"
    }
}
