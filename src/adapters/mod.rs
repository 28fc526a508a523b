//! Adapters - Implementations of ports for external systems.
//!
//! - `stripe` - Stripe hosted checkout (PaymentProvider)
//! - `bus` - NATS, Redis, log and in-memory publishers (NotificationPublisher)
//! - `http` - Axum routes, handlers and middleware stack

pub mod bus;
pub mod http;
pub mod stripe;
