//! Prometheus metrics for the HTTP API.
//!
//! This module provides:
//! - Per-endpoint request latency
//! - Created todo count
//! - Storage and validation failure counts
//!
//! Until [`init_metrics`] installs a recorder every call here is a no-op,
//! which is what the tests rely on.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Todos created counter metric name.
pub const METRIC_TODOS_CREATED: &str = "todos_created_total";
/// Storage errors counter metric name.
pub const METRIC_STORAGE_ERRORS: &str = "storage_errors_total";
/// Validation errors counter metric name.
pub const METRIC_VALIDATION_ERRORS: &str = "validation_errors_total";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_TODOS_CREATED, "Total number of todos created");
    describe_counter!(
        METRIC_STORAGE_ERRORS,
        "Total number of failed storage operations"
    );
    describe_counter!(
        METRIC_VALIDATION_ERRORS,
        "Total number of rejected create requests"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Increment todos created counter.
pub fn inc_todos_created() {
    counter!(METRIC_TODOS_CREATED).increment(1);
}

/// Increment storage errors counter for the given operation.
pub fn inc_storage_errors(operation: &'static str) {
    counter!(METRIC_STORAGE_ERRORS, "operation" => operation).increment(1);
}

/// Increment validation errors counter.
pub fn inc_validation_errors() {
    counter!(METRIC_VALIDATION_ERRORS).increment(1);
}

/// RAII guard for timing a request.
/// Records latency under the endpoint label when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint)
            .record(self.elapsed_ms());
    }
}

/// Create a latency timer for an HTTP endpoint.
pub fn timer_http(endpoint: &'static str) -> LatencyTimer {
    LatencyTimer::new(endpoint)
}
