//! Health check endpoints for liveness and readiness probes.
//!
//! Provides liveness (process is responsive) and readiness (dependencies
//! are reachable) checks for load balancer and orchestrator probes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tasksync_store::TaskStore;
use tasksync_types::UserId;

use crate::metrics::metrics;

/// Health check status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The service is healthy.
    Ok,
    /// The service is degraded but functional.
    Degraded,
    /// The service is unhealthy.
    Unhealthy,
}

impl HealthStatus {
    /// Returns true if the status is healthy or degraded.
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Ok | Self::Degraded)
    }
}

/// Result of a health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Individual check results.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub checks: HashMap<String, CheckResult>,
    /// Server version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Uptime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<u64>,
}

impl HealthResponse {
    /// Serializes the response to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"status":"unhealthy"}"#.to_string())
    }
}

/// Result of an individual health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check status.
    pub status: HealthStatus,
    /// Additional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Check duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl CheckResult {
    /// Creates a healthy check result.
    pub fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
            message: None,
            duration_ms: None,
        }
    }

    /// Creates an unhealthy check result.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            duration_ms: None,
        }
    }

    /// Creates a degraded check result.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            duration_ms: None,
        }
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis() as u64);
        self
    }
}

/// Health checker that performs liveness and readiness checks.
pub struct HealthChecker {
    /// Server start time.
    start_time: Instant,
    /// The task store probed during readiness checks.
    store: Arc<dyn TaskStore>,
    /// Connection count considered "near capacity".
    high_connection_watermark: f64,
}

impl HealthChecker {
    /// Creates a new health checker over the given store.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            start_time: Instant::now(),
            store,
            high_connection_watermark: 900.0,
        }
    }

    /// Sets the connection count treated as "near capacity".
    #[must_use]
    pub fn with_high_connection_watermark(mut self, watermark: f64) -> Self {
        self.high_connection_watermark = watermark;
        self
    }

    /// Performs a liveness check.
    ///
    /// Liveness checks should be fast and only verify that the process
    /// is running and responsive. If this fails, the container should
    /// be restarted.
    pub fn liveness_check(&self) -> HealthResponse {
        HealthResponse {
            status: HealthStatus::Ok,
            checks: HashMap::new(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            uptime_seconds: Some(self.start_time.elapsed().as_secs()),
        }
    }

    /// Performs a readiness check.
    ///
    /// Readiness checks verify that the service is ready to accept
    /// traffic: the store answers queries and connections are below
    /// capacity.
    pub fn readiness_check(&self) -> HealthResponse {
        let mut checks = HashMap::new();
        let mut overall_status = HealthStatus::Ok;

        let store_check = self.check_store();
        if store_check.status == HealthStatus::Unhealthy {
            overall_status = HealthStatus::Unhealthy;
        }
        checks.insert("store".to_string(), store_check);

        let conn_check = self.check_connections();
        if conn_check.status == HealthStatus::Degraded && overall_status == HealthStatus::Ok {
            overall_status = HealthStatus::Degraded;
        }
        checks.insert("connections".to_string(), conn_check);

        HealthResponse {
            status: overall_status,
            checks,
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            uptime_seconds: Some(self.start_time.elapsed().as_secs()),
        }
    }

    /// Checks that the task store answers queries.
    fn check_store(&self) -> CheckResult {
        let start = Instant::now();
        let probe = UserId::new("health-probe");

        match self.store.list_tasks(&probe) {
            Ok(_) => CheckResult::ok().with_duration(start.elapsed()),
            Err(e) => {
                CheckResult::unhealthy(format!("store probe failed: {e}"))
                    .with_duration(start.elapsed())
            }
        }
    }

    /// Checks current connection pressure.
    fn check_connections(&self) -> CheckResult {
        let start = Instant::now();
        let connections = metrics().connections_active.get();

        if connections > self.high_connection_watermark {
            CheckResult::degraded(format!("high connection count: {connections}"))
                .with_duration(start.elapsed())
        } else {
            CheckResult::ok().with_duration(start.elapsed())
        }
    }

    /// Returns the uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
