use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one completed attempt. Immutable once created.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Attempt {
    /// Number of correctly answered questions.
    pub score: u32,
    /// Question count of the quiz at scoring time.
    pub total: u32,
    /// Whole percent in 0..=100, rounded half-up.
    pub percentage: u32,
    /// Completion time. Serialized as RFC 3339 text, so history sorts lexicographically.
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    /// Stamps a record with the current wall clock.
    pub fn now(score: u32, total: u32, percentage: u32) -> Self {
        Self { score, total, percentage, timestamp: Utc::now() }
    }
}
