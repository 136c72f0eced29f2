//! Greptime quickstart: export process runtime metrics over OTLP/HTTP.
//!
//! # Usage
//!
//! ```bash
//! greptime-quickstart --host localhost --port 4000 --no-secure
//! ```
//!
//! Environment variables can also be used:
//! - `GREPTIME_HOST`: Host address of the GreptimeDB HTTP endpoint
//! - `GREPTIME_DATABASE`: Database the metrics are written into
//! - `GREPTIME_USERNAME` / `GREPTIME_PASSWORD`: Database credentials
//! - `GREPTIME_PORT`: Port of the HTTP endpoint
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use std::sync::Arc;

use anyhow::Result;
use opentelemetry::global;

use greptime_quickstart::config::Config;
use greptime_quickstart::observability::metrics::init_meter_provider;
use greptime_quickstart::observability::tracing::init_tracing;
use greptime_quickstart::runtime::{self, ProcessSampler};

/// Print startup banner with version and configuration.
fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        r#"
  greptime-quickstart v{}

  Configuration:
    Endpoint:   {}
    Database:   {}
    Log Level:  {}

  Press Ctrl+C to stop.
"#,
        version,
        config.endpoint_url(),
        config.database,
        config.log_level
    );
}

/// Wait for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
            }
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM, initiating shutdown...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.expect("failed to listen for ctrl+c");
        tracing::info!("Received Ctrl+C, initiating shutdown...");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    // Build the OTLP/HTTP pipeline; the provider owns the export task
    let provider = init_meter_provider(&config)?;

    // Register the runtime observer sets on the global meter
    let meter = global::meter("greptime_quickstart");
    let sampler = Arc::new(ProcessSampler::new());
    runtime::register_all(&meter, sampler);

    print_banner(&config);
    tracing::info!("Sending metrics...");

    // Idle until interrupted; the SDK exports on its own cadence
    shutdown_signal().await;

    // Flush the final batch. A failed flush (e.g. unreachable endpoint) is
    // logged but does not fail the run.
    if let Err(err) = provider.shutdown() {
        tracing::warn!(error = %err, "Meter provider shutdown reported an error");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
