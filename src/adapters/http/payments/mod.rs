//! HTTP adapter for payment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckoutItemRequest, CreatePaymentSessionRequest, CreatePaymentSessionResponse,
    ErrorResponse, RedirectLandingResponse, WebhookAckResponse,
};
pub use handlers::{PaymentsApiError, PaymentsAppState, WebhookApiError};
pub use routes::payment_routes;
