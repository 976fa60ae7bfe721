//! The sampling engine: one `tick()` pulls fresh readings from a
//! `StatsSource` and folds them into rates, history and the process table.

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};
use crate::history::{HistoryBuffer, DEFAULT_HISTORY_LEN};
use crate::processes::{ProcessCache, DEFAULT_REFRESH_EVERY, DEFAULT_TOP_N};
use crate::rates::{compute, CounterSample};
use crate::source::StatsSource;
use crate::types::{HostInfo, MetricsSnapshot, RateSample};

/// Time as seen by the engine. Swapped for a manual clock in tests.
pub trait Clock {
    fn now(&self) -> Instant;
    fn unix_secs(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn unix_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub history_len: usize,
    pub top_n: usize,
    /// Re-enumerate processes every N ticks.
    pub proc_refresh_every: u64,
    /// Filesystem whose usage is reported.
    pub disk_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_len: DEFAULT_HISTORY_LEN,
            top_n: DEFAULT_TOP_N,
            proc_refresh_every: DEFAULT_REFRESH_EVERY,
            disk_path: PathBuf::from("/"),
        }
    }
}

pub struct SamplingEngine<S, C = SystemClock> {
    source: S,
    clock: C,
    config: EngineConfig,
    tick: u64,
    host: HostInfo,
    boot_time: Option<u64>,
    history: HistoryBuffer,
    processes: ProcessCache,
    prev_counters: Option<CounterSample>,
    last_rates: RateSample,
}

impl<S: StatsSource> SamplingEngine<S> {
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self::with_clock(source, SystemClock, config)
    }
}

impl<S: StatsSource, C: Clock> SamplingEngine<S, C> {
    /// Reads host info, boot time and a baseline counter sample, so the
    /// first tick already has something to diff against.
    pub fn with_clock(mut source: S, clock: C, config: EngineConfig) -> Self {
        let host = source.host_info();
        let boot_time = source.boot_time().ok();
        let prev_counters = read_counters(&mut source, &clock)
            .map_err(|e| warn!("no baseline I/O counters: {e}"))
            .ok();
        Self {
            history: HistoryBuffer::new(config.history_len),
            processes: ProcessCache::new(config.top_n),
            source,
            clock,
            config,
            tick: 0,
            host,
            boot_time,
            prev_counters,
            last_rates: RateSample::default(),
        }
    }

    pub fn tick(&mut self) -> MetricsSnapshot {
        let tick = self.tick;

        let cpu_percent = optional(self.source.cpu_percent());
        let memory = optional(self.source.memory());
        let swap = optional(self.source.swap());
        let disk_usage = optional(self.source.disk_usage(&self.config.disk_path));
        let load_avg = optional(self.source.load_avg());
        let battery = optional(self.source.battery());
        if self.boot_time.is_none() {
            self.boot_time = optional(self.source.boot_time());
        }
        let uptime_secs = self
            .boot_time
            .map(|boot| self.clock.unix_secs().saturating_sub(boot));

        if let Some(cpu) = cpu_percent {
            self.history.push(cpu);
        }

        self.update_rates();

        let force = tick == 0 || !self.processes.is_populated();
        let process_top = self
            .processes
            .maybe_refresh(tick, force, self.config.proc_refresh_every, &mut self.source)
            .to_vec();

        self.tick += 1;

        MetricsSnapshot {
            tick,
            host: self.host.clone(),
            cpu_percent,
            cpu_history: self.history.snapshot(),
            memory,
            swap,
            disk_usage,
            rates: self.last_rates,
            process_top,
            load_avg,
            uptime_secs,
            battery,
        }
    }

    // Each counter sample is diffed exactly once: replace prev right after use.
    fn update_rates(&mut self) {
        match read_counters(&mut self.source, &self.clock) {
            Ok(curr) => {
                if let Some(prev) = self.prev_counters.replace(curr) {
                    self.last_rates = compute(&prev, &curr);
                }
            }
            Err(e) => warn!(tick = self.tick, "I/O counters unavailable, serving last rates: {e}"),
        }
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

fn read_counters<S: StatsSource, C: Clock>(source: &mut S, clock: &C) -> SourceResult<CounterSample> {
    let net = source.net_io_counters()?;
    let disk = source.disk_io_counters()?;
    Ok(CounterSample::new(clock.now(), net, disk))
}

fn optional<T>(r: SourceResult<T>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(e @ SourceError::Unavailable { .. }) => {
            debug!("{e}");
            None
        }
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}
