//! HandlePaymentWebhookHandler - Command handler for relaying Stripe webhooks.

use std::sync::Arc;

use crate::config::PublishFailurePolicy;
use crate::domain::webhook::{
    ChargeSucceededNotification, PaymentEvent, WebhookError, WebhookVerifier,
    PAYMENT_SUCCEEDED_TOPIC,
};
use crate::ports::{BusMessage, NotificationPublisher};

/// Command to handle a Stripe webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `stripe-signature` header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing. Every variant is acknowledged to Stripe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Charge succeeded and the notification was published.
    Forwarded { event_id: String, order_id: String },
    /// Verified, but of a kind the service does not act on.
    Ignored { event_id: String, kind: String },
    /// Charge succeeded but carried no order id to correlate with.
    Uncorrelated { event_id: String, charge_id: String },
    /// Publishing failed and the acknowledge policy swallowed the error.
    DeliveryFailed { event_id: String, reason: String },
}

/// Handler for processing Stripe webhooks.
///
/// Verifies the signature over the raw body, dispatches on event kind, and
/// publishes `payment.succeeded` for successful charges.
pub struct HandlePaymentWebhookHandler {
    verifier: WebhookVerifier,
    publisher: Arc<dyn NotificationPublisher>,
    failure_policy: PublishFailurePolicy,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        verifier: WebhookVerifier,
        publisher: Arc<dyn NotificationPublisher>,
        failure_policy: PublishFailurePolicy,
    ) -> Self {
        Self {
            verifier,
            publisher,
            failure_policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        // 1. Verify signature and parse event
        let signature = cmd
            .signature
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let stripe_event = self
            .verifier
            .verify_and_parse(&cmd.payload, signature)
            .map_err(|e| {
                tracing::warn!(error = %e, "webhook verification failed");
                e
            })?;

        tracing::debug!(
            event_id = %stripe_event.id,
            event_type = %stripe_event.event_type,
            livemode = stripe_event.livemode,
            "webhook verified"
        );

        // 2. Process based on event type
        match PaymentEvent::from_stripe(&stripe_event)? {
            PaymentEvent::ChargeSucceeded(charge) => {
                let Some(notification) = ChargeSucceededNotification::from_charge(&charge) else {
                    tracing::warn!(
                        event_id = %stripe_event.id,
                        charge_id = %charge.id,
                        "charge succeeded without an orderId, nothing to publish"
                    );
                    return Ok(WebhookOutcome::Uncorrelated {
                        event_id: stripe_event.id,
                        charge_id: charge.id,
                    });
                };
                self.forward(stripe_event.id, notification).await
            }
            PaymentEvent::Unrecognized { kind } => {
                tracing::debug!(event_id = %stripe_event.id, kind = %kind, "ignoring webhook event");
                Ok(WebhookOutcome::Ignored {
                    event_id: stripe_event.id,
                    kind,
                })
            }
        }
    }

    async fn forward(
        &self,
        event_id: String,
        notification: ChargeSucceededNotification,
    ) -> Result<WebhookOutcome, WebhookError> {
        let order_id = notification.order_id.clone();
        let published = match BusMessage::new(PAYMENT_SUCCEEDED_TOPIC, &notification) {
            Ok(message) => self.publisher.publish(message).await,
            Err(e) => Err(e),
        };

        match published {
            Ok(()) => {
                tracing::info!(
                    event_id = %event_id,
                    order_id = %order_id,
                    stripe_payment_id = %notification.stripe_payment_id,
                    transport = self.publisher.transport(),
                    "payment.succeeded published"
                );
                Ok(WebhookOutcome::Forwarded { event_id, order_id })
            }
            Err(e) => match self.failure_policy {
                PublishFailurePolicy::Redeliver => {
                    tracing::error!(
                        event_id = %event_id,
                        order_id = %order_id,
                        error = %e,
                        "failed to publish payment.succeeded, requesting redelivery"
                    );
                    Err(WebhookError::PublishFailed(e.to_string()))
                }
                PublishFailurePolicy::Acknowledge => {
                    tracing::error!(
                        event_id = %event_id,
                        order_id = %order_id,
                        error = %e,
                        "failed to publish payment.succeeded, notification dropped"
                    );
                    Ok(WebhookOutcome::DeliveryFailed {
                        event_id,
                        reason: e.to_string(),
                    })
                }
            },
        }
    }
}
