//! The capability the engine samples from. Every read is one-shot and
//! synchronous; a failure means "absent this tick", never a fatal error.

use std::path::Path;

use crate::error::SourceResult;
use crate::types::{
    Battery, DiskIoCounters, DiskSpace, HostInfo, LoadAvg, MemoryUsage, NetIoCounters,
    ProcessEntry,
};

pub trait StatsSource {
    /// Global CPU utilisation since the previous call, 0..=100.
    fn cpu_percent(&mut self) -> SourceResult<f32>;
    fn memory(&mut self) -> SourceResult<MemoryUsage>;
    fn swap(&mut self) -> SourceResult<MemoryUsage>;
    fn disk_usage(&mut self, path: &Path) -> SourceResult<DiskSpace>;
    /// Cumulative bytes read/written since boot.
    fn disk_io_counters(&mut self) -> SourceResult<DiskIoCounters>;
    /// Cumulative bytes sent/received since boot.
    fn net_io_counters(&mut self) -> SourceResult<NetIoCounters>;
    fn load_avg(&mut self) -> SourceResult<LoadAvg>;
    /// Seconds since the Unix epoch.
    fn boot_time(&mut self) -> SourceResult<u64>;
    fn battery(&mut self) -> SourceResult<Battery>;
    /// Every process, in enumeration order.
    fn processes(&mut self) -> SourceResult<Vec<ProcessEntry>>;

    fn host_info(&mut self) -> HostInfo {
        HostInfo::default()
    }
}

impl<S: StatsSource + ?Sized> StatsSource for Box<S> {
    fn cpu_percent(&mut self) -> SourceResult<f32> {
        (**self).cpu_percent()
    }
    fn memory(&mut self) -> SourceResult<MemoryUsage> {
        (**self).memory()
    }
    fn swap(&mut self) -> SourceResult<MemoryUsage> {
        (**self).swap()
    }
    fn disk_usage(&mut self, path: &Path) -> SourceResult<DiskSpace> {
        (**self).disk_usage(path)
    }
    fn disk_io_counters(&mut self) -> SourceResult<DiskIoCounters> {
        (**self).disk_io_counters()
    }
    fn net_io_counters(&mut self) -> SourceResult<NetIoCounters> {
        (**self).net_io_counters()
    }
    fn load_avg(&mut self) -> SourceResult<LoadAvg> {
        (**self).load_avg()
    }
    fn boot_time(&mut self) -> SourceResult<u64> {
        (**self).boot_time()
    }
    fn battery(&mut self) -> SourceResult<Battery> {
        (**self).battery()
    }
    fn processes(&mut self) -> SourceResult<Vec<ProcessEntry>> {
        (**self).processes()
    }
    fn host_info(&mut self) -> HostInfo {
        (**self).host_info()
    }
}
