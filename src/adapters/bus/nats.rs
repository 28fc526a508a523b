//! NATS notification publisher.

use std::time::Duration;

use async_nats::{Client, ConnectOptions, HeaderMap};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::ports::{BusMessage, NotificationPublisher, PublishError};

/// Publishes notifications as core NATS messages.
///
/// Each message carries a `Nats-Msg-Id` header so JetStream streams bound to
/// the subject can drop redelivered duplicates.
pub struct NatsPublisher {
    client: Client,
    flush_timeout: Duration,
}

impl NatsPublisher {
    /// Connects to the given servers, failing fast if none is reachable.
    pub async fn connect(servers: &[String], timeout: Duration) -> Result<Self, PublishError> {
        let addresses = servers.join(",");
        info!(servers = %addresses, "Connecting to NATS");

        let client = ConnectOptions::new()
            .name("payments-service")
            .connection_timeout(timeout)
            .connect(addresses.as_str())
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        info!("Connected to NATS successfully");

        Ok(Self {
            client,
            flush_timeout: timeout,
        })
    }

    fn build_headers(message: &BusMessage) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Nats-Msg-Id", message.id.to_string().as_str());
        headers.insert("timestamp", message.created_at.to_rfc3339().as_str());
        headers.insert("content-type", "application/json");
        headers
    }
}

#[async_trait]
impl NotificationPublisher for NatsPublisher {
    async fn publish(&self, message: BusMessage) -> Result<(), PublishError> {
        let body = message.to_wire_bytes()?;
        let headers = Self::build_headers(&message);

        debug!(subject = %message.topic, message_id = %message.id, "Publishing message to NATS");

        self.client
            .publish_with_headers(message.topic.clone(), headers, body.into())
            .await
            .map_err(|e| PublishError::Rejected(e.to_string()))?;

        // Publishing only buffers locally; flush confirms the server has it.
        tokio::time::timeout(self.flush_timeout, self.client.flush())
            .await
            .map_err(|_| PublishError::Timeout)?
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        Ok(())
    }

    fn transport(&self) -> &'static str {
        "nats"
    }
}
