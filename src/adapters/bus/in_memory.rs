//! In-memory publisher for testing.
//!
//! Captures published messages for assertions and can be told to fail the
//! next publish. It is not intended for production use.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{BusMessage, NotificationPublisher, PublishError};

/// In-memory publisher for testing.
///
/// # Example
///
/// ```ignore
/// let bus = InMemoryPublisher::new();
/// bus.fail_next(PublishError::Timeout);
///
/// assert!(bus.publish(message).await.is_err());
/// assert!(bus.published().is_empty());
/// ```
#[derive(Default, Clone)]
pub struct InMemoryPublisher {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    published: Vec<BusMessage>,
    next_error: Option<PublishError>,
    fail_all: Option<PublishError>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published messages in order.
    pub fn published(&self) -> Vec<BusMessage> {
        self.state().published.clone()
    }

    /// Returns messages published to `topic`.
    pub fn published_to(&self, topic: &str) -> Vec<BusMessage> {
        self.published()
            .into_iter()
            .filter(|m| m.topic == topic)
            .collect()
    }

    /// Makes the next publish fail with `error`.
    pub fn fail_next(&self, error: PublishError) {
        self.state().next_error = Some(error);
    }

    /// Makes every publish fail until [`InMemoryPublisher::recover`] is called.
    pub fn fail_always(&self, error: PublishError) {
        self.state().fail_all = Some(error);
    }

    pub fn recover(&self) {
        let mut state = self.state();
        state.fail_all = None;
        state.next_error = None;
    }

    pub fn clear(&self) {
        self.state().published.clear();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl NotificationPublisher for InMemoryPublisher {
    async fn publish(&self, message: BusMessage) -> Result<(), PublishError> {
        let mut state = self.state();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        if let Some(error) = &state.fail_all {
            return Err(error.clone());
        }
        state.published.push(message);
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "memory"
    }
}
