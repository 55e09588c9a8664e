//! # SMS Verifier
//!
//! Entry point: verifies RSA-SHA256 signatures on SMS messages over HTTP.
//!
//! Configuration comes from `SV_*` environment variables; see
//! `sms_verifier_node::config` for the full list.

use anyhow::{Context, Result};
use sms_verifier_node::config::NodeConfig;
use sms_verifier_node::{telemetry, NodeRuntime};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env();
    telemetry::init_tracing(&config.logging).context("Failed to initialise logging")?;

    info!("===========================================");
    info!("  SMS Verifier v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let runtime = NodeRuntime::new(config).map_err(|e| {
        error!(error = %e, "Startup failed");
        e
    })?;

    runtime
        .run(shutdown_signal())
        .await
        .context("HTTP gateway failed")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            // Without a signal handler the only way out is killing the process.
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
