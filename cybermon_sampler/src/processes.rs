//! Top-N process table that is only re-enumerated every few ticks.

use tracing::warn;

use crate::source::StatsSource;
use crate::types::ProcessEntry;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_REFRESH_EVERY: u64 = 2;

#[derive(Debug, Clone)]
pub struct ProcessCache {
    top: Vec<ProcessEntry>,
    top_n: usize,
    populated: bool,
    last_refresh: Option<u64>,
}

impl ProcessCache {
    pub fn new(top_n: usize) -> Self {
        Self {
            top: Vec::with_capacity(top_n),
            top_n,
            populated: false,
            last_refresh: None,
        }
    }

    /// Whether a refresh is due on `tick`. `refresh_every == 0` means every tick.
    pub fn due(tick: u64, force: bool, refresh_every: u64) -> bool {
        force || tick % refresh_every.max(1) == 0
    }

    /// Re-enumerate when due; otherwise, or when enumeration fails, serve
    /// the previous table unchanged.
    pub fn maybe_refresh<S: StatsSource + ?Sized>(
        &mut self,
        tick: u64,
        force: bool,
        refresh_every: u64,
        source: &mut S,
    ) -> &[ProcessEntry] {
        if !Self::due(tick, force, refresh_every) {
            return &self.top;
        }
        match source.processes() {
            Ok(all) => {
                self.top = select_top(all, self.top_n);
                self.populated = true;
                self.last_refresh = Some(tick);
            }
            Err(e) => warn!(tick, "process refresh failed, keeping previous table: {e}"),
        }
        &self.top
    }

    pub fn current(&self) -> &[ProcessEntry] {
        &self.top
    }

    /// True once any enumeration has succeeded.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn last_refresh(&self) -> Option<u64> {
        self.last_refresh
    }
}

impl Default for ProcessCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

/// Highest `cpu_percent` first; ties keep enumeration order. A non-finite
/// reading counts as 0.
pub fn select_top(mut all: Vec<ProcessEntry>, n: usize) -> Vec<ProcessEntry> {
    for p in &mut all {
        if !p.cpu_percent.is_finite() {
            p.cpu_percent = 0.0;
        }
    }
    all.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    all.truncate(n);
    all
}
