//! Velocity-window judgment backend.
//!
//! A burst of share requests from one identity inside a sliding window is
//! the strongest fraud signal the source data offers: legitimate users
//! share a list once, invite farms share it hundreds of times.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tasksync_types::{FraudVerdict, UserId};
use tracing::debug;

use crate::error::{AssessmentError, AssessmentResult};
use crate::facts::RequestFacts;
use crate::FraudChecker;

/// Reason attached to verdicts produced by the velocity window.
pub const VELOCITY_ANOMALY_REASON: &str = "velocity anomaly";

/// Flags identities that request share links faster than the configured
/// threshold.
///
/// Each assessment records the request and counts recent ones from the same
/// requester. Verdicts are therefore order-dependent: retrying a request
/// re-runs the judgment against fresh state and may flip the verdict.
pub struct VelocityChecker {
    /// Requests allowed per window before the verdict turns positive.
    max_requests: usize,
    /// Window duration.
    window: Duration,
    /// Request timestamps per requester.
    recent: Mutex<HashMap<UserId, Vec<Instant>>>,
}

impl VelocityChecker {
    /// Creates a checker allowing `max_requests` per `window` per requester.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            recent: Mutex::new(HashMap::new()),
        }
    }

    /// Default threshold: 5 share requests per minute per identity.
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }
}

impl FraudChecker for VelocityChecker {
    fn assess(&self, facts: &RequestFacts) -> AssessmentResult<FraudVerdict> {
        let now = Instant::now();

        let mut recent = self
            .recent
            .lock()
            .map_err(|_| AssessmentError::BackendUnavailable("lock poisoned".to_string()))?;

        let times = recent.entry(facts.requester.clone()).or_default();
        times.retain(|&t| now.duration_since(t) < self.window);
        times.push(now);
        let count = times.len();
        drop(recent);

        debug!(
            requester = %facts.requester,
            count,
            "velocity window assessed"
        );

        if count > self.max_requests {
            Ok(FraudVerdict::fraudulent(VELOCITY_ANOMALY_REASON))
        } else {
            Ok(FraudVerdict::clean())
        }
    }
}
