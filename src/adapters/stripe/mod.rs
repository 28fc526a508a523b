//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe hosted checkout.
//!
//! # Security
//!
//! - The API key is held as `secrecy::SecretString` and never logged
//! - Webhook verification lives in `domain::webhook` and needs no API access
//!
//! # Configuration
//!
//! - `PAYMENTS__PAYMENT__STRIPE_SECRET`: Stripe secret API key
//! - `PAYMENTS__PAYMENT__API_BASE_URL`: override for tests and proxies

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
