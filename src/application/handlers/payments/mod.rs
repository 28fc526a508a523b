//! Payment handlers.
//!
//! ## Commands
//! - Creating hosted checkout sessions for orders
//! - Relaying verified Stripe webhooks to the message bus

mod create_payment_session;
mod handle_payment_webhook;

pub use create_payment_session::{
    CheckoutItemInput, CreatePaymentSessionCommand, CreatePaymentSessionHandler, RedirectUrls,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};
