//! Host metrics sampling engine for the cybermon dashboard.
//!
//! A [`SamplingEngine`] pulls readings from a [`StatsSource`] once per tick and
//! returns an immutable [`MetricsSnapshot`]: CPU history, I/O throughput derived
//! from cumulative counters, and a top-N process table refreshed on a slower
//! cadence than the tick.

pub mod engine;
pub mod error;
pub mod history;
pub mod metrics;
pub mod processes;
pub mod rates;
pub mod sampler;
pub mod source;
pub mod types;

pub use engine::{Clock, EngineConfig, SamplingEngine, SystemClock};
pub use error::{SourceError, SourceResult};
pub use history::{spark_level, HistoryBuffer};
pub use metrics::{SysinfoSource, CPU_SETTLE};
pub use processes::ProcessCache;
pub use rates::CounterSample;
pub use sampler::{spawn_sampler, LatestSnapshot};
pub use source::StatsSource;
pub use types::*;
