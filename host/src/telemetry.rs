// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const TRIALS_TOTAL: &str = "hashcheck_trials_total";
pub const MISMATCHES_TOTAL: &str = "hashcheck_mismatches_total";
pub const CHAIN_DURATION: &str = "hashcheck_chain_duration_seconds";
pub const EXCHANGE_DURATION: &str = "hashcheck_exchange_duration_seconds";

/// Initialize telemetry (logs + metrics)
///
/// Diagnostics go to stderr; stdout carries only the mirrored event log.
pub fn init_telemetry() {
    // 1. Initialize Tracing (Logs)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hashcheck_host=info,hashcheck=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 2. Initialize Metrics (Prometheus)
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::warn!("Metrics recorder unavailable: {}", e),
    }

    metrics::describe_counter!(TRIALS_TOTAL, "Trials completed against the device");
    metrics::describe_counter!(MISMATCHES_TOTAL, "Reported digests that differ from the expected digest");
    metrics::describe_histogram!(CHAIN_DURATION, "Time taken to compute the expected digest");
    metrics::describe_histogram!(EXCHANGE_DURATION, "Time from sending a seed to receiving all three digests");
}

/// Get the Prometheus rendering of all metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
