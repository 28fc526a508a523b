//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured hosted checkout responses
//! - Error injection
//! - Request capture for assertions

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{CheckoutSessionRequest, HostedCheckout, PaymentError, PaymentProvider};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_error(PaymentError::authentication("bad key"));
///
/// let result = mock.create_checkout_session(request).await;
/// assert!(result.is_err());
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_checkout: Option<HostedCheckout>,
    next_error: Option<PaymentError>,
    requests: Vec<CheckoutSessionRequest>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session returned by the next call.
    pub fn set_checkout(&self, checkout: HostedCheckout) {
        self.state().next_checkout = Some(checkout);
    }

    /// Makes the next call fail with `error`.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CheckoutSessionRequest> {
        self.state().requests.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<HostedCheckout, PaymentError> {
        let mut state = self.state();
        let (success_url, cancel_url) = (request.success_url.clone(), request.cancel_url.clone());
        state.requests.push(request);

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let sequence = state.requests.len();
        Ok(state.next_checkout.take().unwrap_or_else(|| HostedCheckout {
            session_id: format!("cs_test_mock_{}", sequence),
            url: format!("https://checkout.stripe.com/c/pay/cs_test_mock_{}", sequence),
            success_url,
            cancel_url,
        }))
    }
}
