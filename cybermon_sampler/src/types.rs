//! Data types produced by the engine and handed to the render layer.
//! Keep this module minimal and stable: it is the renderer's only input.

use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct MemoryUsage {
    pub used: u64,
    pub total: u64,
    pub percent: f32,
}

impl MemoryUsage {
    pub fn from_used_total(used: u64, total: u64) -> Self {
        Self {
            used,
            total,
            percent: percent_of(used, total),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct DiskSpace {
    pub free: u64,
    pub total: u64,
    pub percent: f32,
}

impl DiskSpace {
    pub fn from_free_total(free: u64, total: u64) -> Self {
        Self {
            free,
            total,
            percent: percent_of(total.saturating_sub(free), total),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiskIoCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetIoCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct LoadAvg {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Battery {
    pub percent: f32,
    pub plugged: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct HostInfo {
    pub node: String,
    pub os: String,
}

/// Throughput derived from two counter samples, in bytes per second.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct RateSample {
    pub net_in_bps: f64,
    pub net_out_bps: f64,
    pub disk_read_bps: f64,
    pub disk_write_bps: f64,
}

/// Everything one tick produced. Optional fields are platform dependent or
/// failed this tick; the renderer skips their rows.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub tick: u64,
    pub host: HostInfo,
    pub cpu_percent: Option<f32>,
    /// Oldest first.
    pub cpu_history: Vec<f32>,
    pub memory: Option<MemoryUsage>,
    pub swap: Option<MemoryUsage>,
    pub disk_usage: Option<DiskSpace>,
    pub rates: RateSample,
    pub process_top: Vec<ProcessEntry>,
    pub load_avg: Option<LoadAvg>,
    pub uptime_secs: Option<u64>,
    pub battery: Option<Battery>,
}

pub(crate) fn percent_of(part: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0) as f32
}
