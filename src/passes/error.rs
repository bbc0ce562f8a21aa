use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassError {
    #[error("malformed event sequence at {instant}: {reason}")]
    MalformedEventSequence {
        instant: DateTime<Utc>,
        reason: String,
    },
    #[error("pass rising at {rise} has no set before the end of the search interval")]
    TruncatedTrailingPass { rise: DateTime<Utc> },
    #[error("checkpoint sampling needs at least 2 samples, slice [{start}..={end}] has {len}")]
    EmptySampleSlice {
        start: usize,
        end: usize,
        len: usize,
    },
}
