//! Payments service binary.
//!
//! Loads configuration, connects the Stripe adapter and the message bus, and
//! serves the HTTP API until SIGINT or SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use payments_service::adapters::bus::connect_publisher;
use payments_service::adapters::http::{app_router, PaymentsAppState};
use payments_service::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use payments_service::config::{AppConfig, ConfigError, ValidationError};
use payments_service::ports::{PaymentError, PublishError};
use payments_service::telemetry;

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid server address: {0}")]
    Address(#[from] ValidationError),

    #[error("payment provider setup failed: {0}")]
    PaymentProvider(#[from] PaymentError),

    #[error("message bus unavailable: {0}")]
    Bus(#[from] PublishError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init_tracing(&config.server) {
        eprintln!("failed to initialise tracing: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "payments service stopped");
            ExitCode::FAILURE
        }
    }
}

/// Tracing is not installed yet when configuration fails, so this goes to stderr.
fn report_config_error(error: &ConfigError) {
    eprintln!("configuration error: {}", error);
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    let addr = config.server.socket_addr().await?;

    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        transport = ?config.bus.transport,
        publish_failure_policy = ?config.bus.publish_failure_policy,
        "starting payments service"
    );

    let payment_provider = Arc::new(StripePaymentAdapter::new(
        StripeConfig::from_payment_config(&config.payment),
    )?);
    let publisher = connect_publisher(&config.bus).await?;

    let state = PaymentsAppState::from_config(&config, payment_provider, publisher);
    let app = app_router(state, config.server.request_timeout());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
