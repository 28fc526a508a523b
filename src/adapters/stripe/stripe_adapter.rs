//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API using
//! form-encoded requests, the way Stripe's own client libraries do.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key).with_timeout(Duration::from_secs(10));
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::webhook::ORDER_ID_METADATA_KEY;
use crate::ports::{
    CheckoutSessionRequest, HostedCheckout, PaymentError, PaymentErrorCode, PaymentProvider,
};

use super::api_types::{StripeCheckoutSession, StripeErrorResponse};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    timeout: Duration,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builds the adapter configuration from the validated payment section.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self::new(SecretString::new(config.stripe_secret.clone()))
            .with_base_url(config.api_base_url.clone())
            .with_timeout(config.api_timeout())
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Encodes a session request as Stripe form parameters.
    fn session_params(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
        let checkout = &request.checkout;
        let mut params = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
            (
                format!("payment_intent_data[metadata][{}]", ORDER_ID_METADATA_KEY),
                checkout.order_id().to_string(),
            ),
        ];

        for (i, item) in checkout.items().iter().enumerate() {
            params.push((
                format!("line_items[{}][price_data][currency]", i),
                checkout.currency().as_str().to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name().to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount().to_string(),
            ));
            params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity().to_string(),
            ));
        }

        params
    }

    /// Maps a non-2xx Stripe response to a `PaymentError`.
    fn error_from_response(status: StatusCode, body: &str) -> PaymentError {
        let parsed = serde_json::from_str::<StripeErrorResponse>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.error.describe())
            .unwrap_or_else(|| format!("Stripe API error ({})", status));

        let code = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PaymentErrorCode::AuthenticationError,
            StatusCode::TOO_MANY_REQUESTS => PaymentErrorCode::RateLimitExceeded,
            s if s.is_client_error() => PaymentErrorCode::InvalidRequest,
            s if s.is_server_error() => PaymentErrorCode::ProviderError,
            _ => PaymentErrorCode::Unknown,
        };

        let mut error = PaymentError::new(code, message);
        if let Some(provider_code) = parsed
            .and_then(|b| b.error.code.or(b.error.error_type))
        {
            error = error.with_provider_code(provider_code);
        }
        error
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<HostedCheckout, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = Self::session_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::network("Stripe API request timed out")
                } else {
                    PaymentError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = Self::error_from_response(status, &error_text);
            tracing::error!(
                status = %status,
                code = %error.code,
                provider_code = ?error.provider_code,
                "Stripe create_checkout_session failed"
            );
            return Err(error);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session.url.ok_or_else(|| {
            PaymentError::invalid_response(format!(
                "Checkout session {} has no hosted page URL",
                session.id
            ))
        })?;

        tracing::debug!(session_id = %session.id, livemode = session.livemode, "Stripe session created");

        Ok(HostedCheckout {
            session_id: session.id,
            url,
            success_url: session.success_url.unwrap_or(request.success_url),
            cancel_url: session.cancel_url.unwrap_or(request.cancel_url),
        })
    }
}
