//! Payments Service - Hosted checkout sessions and charge webhook relay
//!
//! This crate opens Stripe-hosted checkout pages for orders and relays
//! verified `charge.succeeded` webhooks to the message bus as
//! `payment.succeeded` notifications.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
