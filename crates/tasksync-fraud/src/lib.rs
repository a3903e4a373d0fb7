//! # tasksync-fraud: Fraud assessment for share requests
//!
//! Given structured facts about a share request, produce a [`FraudVerdict`]:
//! a boolean determination plus a reason when positive. The judgment itself
//! sits behind the [`FraudChecker`] trait so the issuer can be tested with
//! deterministic doubles and deployed against any backend.
//!
//! Two backends ship with the crate:
//! - [`VelocityChecker`] — flags bursts of share requests from one identity
//!   within a sliding window.
//! - [`SampledChecker`] — seeded probabilistic verdicts for simulation-style
//!   testing.

mod error;
mod facts;
mod sampled;
mod velocity;


pub use error::{AssessmentError, AssessmentResult};
pub use facts::RequestFacts;
pub use sampled::SampledChecker;
pub use velocity::{VelocityChecker, VELOCITY_ANOMALY_REASON};

use tasksync_types::FraudVerdict;

/// Produces a fraud verdict for one share request.
///
/// Two calls with identical input may return different verdicts; callers
/// must not assume idempotence when retrying. Implementations must fail
/// with an [`AssessmentError`] rather than substitute a default verdict
/// when the underlying judgment cannot be produced.
pub trait FraudChecker: Send + Sync {
    /// Assesses the request facts, blocking until a verdict is available.
    fn assess(&self, facts: &RequestFacts) -> AssessmentResult<FraudVerdict>;
}
