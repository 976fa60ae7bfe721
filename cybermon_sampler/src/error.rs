//! Failure kinds reported by a stats source.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The metric does not exist on this host (no battery, no load average API).
    #[error("{metric} is not available on this host")]
    Unavailable { metric: &'static str },

    /// The read failed this time; the next tick retries it.
    #[error("reading {metric} failed: {reason}")]
    Transient { metric: &'static str, reason: String },

    /// The stats capability could not be set up at all.
    #[error("cannot initialise system stats: {0}")]
    Startup(String),
}

impl SourceError {
    pub fn unavailable(metric: &'static str) -> Self {
        Self::Unavailable { metric }
    }

    pub fn transient(metric: &'static str, reason: impl Into<String>) -> Self {
        Self::Transient {
            metric,
            reason: reason.into(),
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
