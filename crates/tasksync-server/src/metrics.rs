//! Prometheus metrics for the `TaskSync` server.
//!
//! Exposes metrics for monitoring request rates, latencies, connections,
//! authentication, and share-link verdicts.

use std::sync::OnceLock;

use prometheus::{
    Counter, CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry.
static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Server metrics collection.
pub struct Metrics {
    /// Registry for all metrics.
    registry: Registry,

    // Request metrics
    /// Total requests by method and status.
    pub requests_total: CounterVec,
    /// Request duration histogram by method.
    pub request_duration_seconds: HistogramVec,

    // Connection metrics
    /// Total connections accepted.
    pub connections_total: Counter,
    /// Currently active connections.
    pub connections_active: Gauge,

    // Rate limiting metrics
    /// Requests rejected due to rate limiting.
    pub rate_limited_total: Counter,

    // Authentication metrics
    /// Authentication attempts by result.
    pub auth_attempts: CounterVec,

    // Share workflow metrics
    /// Share requests by verdict (issued, rejected, failed).
    pub fraud_verdicts_total: CounterVec,
}

impl Metrics {
    /// Creates a new metrics collection.
    fn new() -> Self {
        let registry = Registry::new();

        let requests_total = CounterVec::new(
            Opts::new("tasksync_requests_total", "Total number of requests"),
            &["method", "status"],
        )
        .expect("valid metric");

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "tasksync_request_duration_seconds",
                "Request duration in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
            ]),
            &["method"],
        )
        .expect("valid metric");

        let connections_total = Counter::new(
            "tasksync_connections_total",
            "Total number of connections accepted",
        )
        .expect("valid metric");

        let connections_active = Gauge::new(
            "tasksync_connections_active",
            "Number of active connections",
        )
        .expect("valid metric");

        let rate_limited_total = Counter::new(
            "tasksync_rate_limited_total",
            "Total requests rejected due to rate limiting",
        )
        .expect("valid metric");

        let auth_attempts = CounterVec::new(
            Opts::new("tasksync_auth_attempts", "Authentication attempts"),
            &["result"],
        )
        .expect("valid metric");

        let fraud_verdicts_total = CounterVec::new(
            Opts::new(
                "tasksync_fraud_verdicts_total",
                "Share requests by verdict",
            ),
            &["verdict"],
        )
        .expect("valid metric");

        registry
            .register(Box::new(requests_total.clone()))
            .expect("register metric");
        registry
            .register(Box::new(request_duration_seconds.clone()))
            .expect("register metric");
        registry
            .register(Box::new(connections_total.clone()))
            .expect("register metric");
        registry
            .register(Box::new(connections_active.clone()))
            .expect("register metric");
        registry
            .register(Box::new(rate_limited_total.clone()))
            .expect("register metric");
        registry
            .register(Box::new(auth_attempts.clone()))
            .expect("register metric");
        registry
            .register(Box::new(fraud_verdicts_total.clone()))
            .expect("register metric");

        Self {
            registry,
            requests_total,
            request_duration_seconds,
            connections_total,
            connections_active,
            rate_limited_total,
            auth_attempts,
            fraud_verdicts_total,
        }
    }

    /// Renders all metrics in the Prometheus text format.
    pub fn gather(&self) -> String {
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&self.registry.gather())
            .unwrap_or_default()
    }
}

/// Returns the global metrics collection, initializing it on first use.
pub fn metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}
