//! Turn two cumulative counter samples into bytes/second.

use std::time::Instant;

use crate::types::{DiskIoCounters, NetIoCounters, RateSample};

/// Cumulative OS counters read at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSample {
    pub timestamp: Instant,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub disk_read: u64,
    pub disk_write: u64,
}

impl CounterSample {
    pub fn new(timestamp: Instant, net: NetIoCounters, disk: DiskIoCounters) -> Self {
        Self {
            timestamp,
            bytes_sent: net.bytes_sent,
            bytes_recv: net.bytes_recv,
            disk_read: disk.read_bytes,
            disk_write: disk.write_bytes,
        }
    }
}

/// Rates between `prev` and `curr`. Total: a zero interval counts as one
/// second and a counter that went backwards (reset, wrap, a disk that
/// disappeared) reports 0.
pub fn compute(prev: &CounterSample, curr: &CounterSample) -> RateSample {
    let dt = curr
        .timestamp
        .saturating_duration_since(prev.timestamp)
        .as_secs_f64();
    let dt = if dt <= 0.0 { 1.0 } else { dt };
    let rate = |before: u64, after: u64| after.saturating_sub(before) as f64 / dt;
    RateSample {
        net_in_bps: rate(prev.bytes_recv, curr.bytes_recv),
        net_out_bps: rate(prev.bytes_sent, curr.bytes_sent),
        disk_read_bps: rate(prev.disk_read, curr.disk_read),
        disk_write_bps: rate(prev.disk_write, curr.disk_write),
    }
}
