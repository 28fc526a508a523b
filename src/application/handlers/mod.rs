//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod payments;

pub use payments::{
    CheckoutItemInput, CreatePaymentSessionCommand, CreatePaymentSessionHandler,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, RedirectUrls, WebhookOutcome,
};
