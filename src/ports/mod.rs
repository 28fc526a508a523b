//! Ports - Interfaces between the application core and external systems.
//!
//! - `PaymentProvider` - Creates hosted checkout sessions (Stripe)
//! - `NotificationPublisher` - Publishes payment notifications to the bus

mod notification_publisher;
mod payment_provider;

pub use notification_publisher::{BusMessage, NotificationPublisher, PublishError};
pub use payment_provider::{
    CheckoutSessionRequest, HostedCheckout, PaymentError, PaymentErrorCode, PaymentProvider,
};
