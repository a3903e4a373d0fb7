//! Probabilistic judgment backend for simulation testing.
//!
//! Flags a configurable fraction of requests at random. Given the same
//! seed, the checker produces the exact same sequence of verdicts, which
//! makes simulation runs reproducible.

use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tasksync_types::FraudVerdict;

use crate::error::{AssessmentError, AssessmentResult};
use crate::facts::RequestFacts;
use crate::FraudChecker;

/// Seeded probabilistic [`FraudChecker`].
pub struct SampledChecker {
    /// Probability that any single request is flagged, in `[0.0, 1.0]`.
    fraud_probability: f64,
    rng: Mutex<SmallRng>,
}

impl SampledChecker {
    /// Creates a checker flagging requests with the given probability.
    pub fn new(fraud_probability: f64, seed: u64) -> Self {
        Self {
            fraud_probability: fraud_probability.clamp(0.0, 1.0),
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// A checker that never flags anything.
    pub fn always_clean() -> Self {
        Self::new(0.0, 0)
    }

    /// A checker that flags every request.
    pub fn always_fraudulent() -> Self {
        Self::new(1.0, 0)
    }
}

impl FraudChecker for SampledChecker {
    fn assess(&self, _facts: &RequestFacts) -> AssessmentResult<FraudVerdict> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AssessmentError::BackendUnavailable("lock poisoned".to_string()))?;

        if rng.gen_bool(self.fraud_probability) {
            Ok(FraudVerdict::fraudulent(
                "randomly determined as potentially fraudulent",
            ))
        } else {
            Ok(FraudVerdict::clean())
        }
    }
}
