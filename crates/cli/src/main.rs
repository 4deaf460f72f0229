//! EiffelBridge entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Load configuration**: `.env` (if present), then environment variables
//!    (see [`config`]).
//! 2. **Wire observability**: JSON `tracing` output plus optional OTLP export
//!    (see [`telemetry`]).
//! 3. **Connect to the broker**: open the [`amqp::AmqpPublisher`], retrying a
//!    bounded number of times (see [`startup`]).
//! 4. **Serve**: inject the publisher into a [`listener::Dispatcher`] and run
//!    the webhook endpoint until Ctrl-C or SIGTERM.
//! 5. **Tear down**: close the broker session on every exit path once it has
//!    been established, including a server failure.

mod config;
mod startup;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use amqp::AmqpPublisher;
use config::BridgeConfig;
use listener::{Dispatcher, WebhookState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = BridgeConfig::from_env().context("Invalid configuration")?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        queue = %config.queue_name,
        "Starting EiffelBridge"
    );

    let result = run(&config).await;
    if let Err(err) = &result {
        error!(error = %format!("{err:#}"), "EiffelBridge stopped with an error");
    }

    telemetry.shutdown();
    result
}

async fn run(config: &BridgeConfig) -> Result<()> {
    let publisher = startup::connect_with_retry(config.startup_retry(), |_| {
        AmqpPublisher::connect(&config.rabbit_url, &config.queue_name)
    })
    .await
    .with_context(|| {
        format!(
            "Failed to connect to broker after {} attempt(s)",
            config.connect_attempts
        )
    })?;
    let publisher = Arc::new(publisher);

    let state = WebhookState::new(
        Dispatcher::new(publisher.clone()),
        config.webhook_token.clone(),
    );
    if config.webhook_token.is_none() {
        info!("GITLAB_WEBHOOK_TOKEN not set; accepting deliveries without a token");
    }

    let served = listener::serve(
        config.listen_addr(),
        listener::router(state),
        shutdown_signal(),
    )
    .await;

    let closed = publisher.close().await;
    served.context("Webhook server failed")?;
    closed.context("Failed to close broker session")?;

    info!("EiffelBridge shut down cleanly");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
