//! Redis pub/sub notification publisher.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info, warn};

use crate::ports::{BusMessage, NotificationPublisher, PublishError};

/// Publishes notifications with `PUBLISH <topic> <envelope>`.
///
/// Redis pub/sub has no persistence, so a message published while no
/// subscriber is connected is lost. The receiver count is logged for that
/// reason.
#[derive(Clone)]
pub struct RedisPublisher {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisPublisher {
    /// Connects to the first configured server.
    pub async fn connect(servers: &[String], timeout: Duration) -> Result<Self, PublishError> {
        let url = servers
            .first()
            .ok_or_else(|| PublishError::Connection("no Redis server configured".to_string()))?;
        if servers.len() > 1 {
            warn!(
                ignored = servers.len() - 1,
                "Redis publisher uses only the first configured server"
            );
        }

        let client =
            redis::Client::open(url.as_str()).map_err(|e| PublishError::Connection(e.to_string()))?;
        let conn = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| PublishError::Timeout)?
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        info!("Connected to Redis successfully");

        Ok(Self { conn, timeout })
    }
}

#[async_trait]
impl NotificationPublisher for RedisPublisher {
    async fn publish(&self, message: BusMessage) -> Result<(), PublishError> {
        let body = message.to_wire_bytes()?;
        let mut conn = self.conn.clone();

        let receivers: i64 = tokio::time::timeout(self.timeout, conn.publish(&message.topic, body))
            .await
            .map_err(|_| PublishError::Timeout)?
            .map_err(|e: redis::RedisError| PublishError::Rejected(e.to_string()))?;

        if receivers == 0 {
            warn!(channel = %message.topic, message_id = %message.id, "Published to Redis with no subscribers");
        } else {
            debug!(channel = %message.topic, message_id = %message.id, receivers, "Published to Redis");
        }

        Ok(())
    }

    fn transport(&self) -> &'static str {
        "redis"
    }
}
