//! Message bus adapters.
//!
//! Adapters implement the `NotificationPublisher` port for different
//! environments:
//!
//! - `NatsPublisher` - Core NATS with `Nats-Msg-Id` dedup headers
//! - `RedisPublisher` - Redis pub/sub
//! - `LoggingPublisher` - Log sink for local development
//! - `InMemoryPublisher` - Capturing publisher for tests

mod in_memory;
mod logging;
mod nats;
mod redis;

use std::sync::Arc;

pub use in_memory::InMemoryPublisher;
pub use logging::LoggingPublisher;
pub use nats::NatsPublisher;
pub use redis::RedisPublisher;

use crate::config::{BusConfig, BusTransport};
use crate::ports::{NotificationPublisher, PublishError};

/// Connects the publisher selected by configuration.
///
/// # Errors
///
/// Returns `PublishError::Connection` or `PublishError::Timeout` when the
/// bus cannot be reached within the configured connect timeout.
pub async fn connect_publisher(
    config: &BusConfig,
) -> Result<Arc<dyn NotificationPublisher>, PublishError> {
    let servers = config.servers_list();
    let timeout = config.connect_timeout();

    let publisher: Arc<dyn NotificationPublisher> = match config.transport {
        BusTransport::Nats => Arc::new(NatsPublisher::connect(&servers, timeout).await?),
        BusTransport::Redis => Arc::new(RedisPublisher::connect(&servers, timeout).await?),
        BusTransport::Log => {
            tracing::warn!("Using log transport; notifications will not reach any consumer");
            Arc::new(LoggingPublisher::new())
        }
    };

    Ok(publisher)
}
