//! CreatePaymentSessionHandler - Command handler for opening a hosted checkout.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::checkout::{
    CheckoutError, CheckoutRequest, CheckoutResult, Currency, LineItem,
};
use crate::ports::{CheckoutSessionRequest, PaymentProvider};

/// One line of the incoming order, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutItemInput {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// Command to create a payment session for an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentSessionCommand {
    pub items: Vec<CheckoutItemInput>,
    pub currency: String,
    pub order_id: String,
}

/// Fixed redirect targets sent to the vendor with every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

/// Handler for creating hosted checkout sessions.
///
/// Validates the order, converts prices to minor units, and asks the
/// payment provider for a hosted page. The order id travels with the
/// payment so the later webhook can be correlated.
pub struct CreatePaymentSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    redirects: RedirectUrls,
}

impl CreatePaymentSessionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, redirects: RedirectUrls) -> Self {
        Self {
            payment_provider,
            redirects,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentSessionCommand,
    ) -> Result<CheckoutResult, CheckoutError> {
        // 1. Validate input before any vendor call
        let currency = Currency::parse(&cmd.currency)?;
        let items = cmd
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| LineItem::new(index, item.name, item.price, item.quantity))
            .collect::<Result<Vec<_>, _>>()?;
        let checkout = CheckoutRequest::new(items, currency, cmd.order_id)?;
        let order_id = checkout.order_id().to_string();

        // 2. Create the session
        let hosted = self
            .payment_provider
            .create_checkout_session(CheckoutSessionRequest {
                checkout,
                success_url: self.redirects.success_url.clone(),
                cancel_url: self.redirects.cancel_url.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, error = %e, "checkout session creation failed");
                CheckoutError::from(e)
            })?;

        tracing::info!(
            order_id = %order_id,
            session_id = %hosted.session_id,
            "checkout session created"
        );

        Ok(CheckoutResult {
            success_url: hosted.success_url,
            cancel_url: hosted.cancel_url,
            redirect_url: hosted.url,
        })
    }
}
