//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `checkout` - Line items, currency, minor-unit rounding and session results
//! - `webhook` - Stripe signature verification, event classification, notifications

pub mod checkout;
pub mod webhook;
