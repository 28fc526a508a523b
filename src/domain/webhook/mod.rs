//! Webhook domain module.
//!
//! Verifies Stripe webhook deliveries and turns them into bus notifications.
//!
//! # Module Structure
//!
//! - `signature` - `stripe-signature` header parsing and HMAC verification
//! - `stripe_event` - Wire types for Stripe event payloads
//! - `event` - Event classification and the charge-succeeded notification
//! - `errors` - Webhook error taxonomy and HTTP status mapping

mod errors;
mod event;
mod signature;
mod stripe_event;

pub use errors::WebhookError;
pub use event::{
    ChargeSucceededNotification, PaymentEvent, ORDER_ID_METADATA_KEY, PAYMENT_SUCCEEDED_TOPIC,
};
pub use signature::{sign_payload, SignatureHeader, WebhookVerifier, DEFAULT_TOLERANCE_SECS};
pub use stripe_event::{StripeCharge, StripeEvent, StripeEventData};
