//! Checkout domain module.
//!
//! Turns an order's line items into a validated checkout request.
//!
//! # Module Structure
//!
//! - `money` - Currency codes and decimal-to-minor-unit rounding
//! - `request` - `LineItem`, `CheckoutRequest` and `CheckoutResult`
//! - `errors` - Validation and session creation errors

mod errors;
mod money;
mod request;

pub use errors::{CheckoutError, ValidationError};
pub use money::{to_minor_units, Currency};
pub use request::{CheckoutRequest, CheckoutResult, LineItem};
