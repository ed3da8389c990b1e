//! Prometheus metrics for the attendance service.
//!
//! - [`init_metrics`] installs the global recorder once
//! - [`metrics_handler`] renders the `/metrics` text
//! - [`middleware::metrics_middleware`] records per-request HTTP metrics
//! - [`AttendanceMetrics`] records registry outcomes
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler};
//!
//! init_metrics()?;
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod attendance;
pub mod middleware;

pub use attendance::{AttendanceMetrics, RegistrationOutcome};
pub use middleware::metrics_middleware;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// `GET /metrics`
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    // HTTP
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP responses with a 4xx or 5xx status"
    );

    // Cache-aside
    describe_counter!("cache_hits_total", "Cache reads served from the cache");
    describe_counter!("cache_misses_total", "Cache reads that fell through to storage");
    describe_counter!(
        "cache_invalidation_failures_total",
        "Cache keys that could not be invalidated after a write"
    );

    // Attendance registry
    describe_counter!(
        "attendance_registrations_total",
        "Registration attempts by outcome"
    );
    describe_counter!("attendance_rosters_removed_total", "Rosters removed");
}
