//! Scripted `StatsSource` and a hand-driven clock shared by the engine tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cybermon_sampler::{
    Battery, Clock, DiskIoCounters, DiskSpace, HostInfo, LoadAvg, MemoryUsage, NetIoCounters,
    ProcessEntry, SourceError, SourceResult, StatsSource,
};

/// Each scripted queue is popped once per read; when a queue runs dry the
/// last value is repeated. An empty script means the metric is unavailable.
#[derive(Default)]
pub struct FakeSource {
    pub cpu: VecDeque<f32>,
    pub net: VecDeque<NetIoCounters>,
    pub disk_io: VecDeque<DiskIoCounters>,
    pub processes: VecDeque<SourceResult<Vec<ProcessEntry>>>,
    pub memory: Option<MemoryUsage>,
    pub load_avg: Option<LoadAvg>,
    pub battery: Option<Battery>,
    pub boot_time: Option<u64>,
    /// Net and disk counter reads fail while set.
    pub counters_fail: bool,
    pub process_calls: usize,
    last_cpu: Option<f32>,
    last_net: Option<NetIoCounters>,
    last_disk: Option<DiskIoCounters>,
    last_procs: Option<SourceResult<Vec<ProcessEntry>>>,
}

fn next<T: Clone>(queue: &mut VecDeque<T>, last: &mut Option<T>) -> Option<T> {
    if let Some(v) = queue.pop_front() {
        *last = Some(v.clone());
    }
    last.clone()
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn net_sent(mut self, sent: &[u64]) -> Self {
        self.net = sent
            .iter()
            .map(|&s| NetIoCounters {
                bytes_sent: s,
                bytes_recv: 0,
            })
            .collect();
        self.disk_io = [DiskIoCounters::default()].into();
        self
    }

    pub fn cpu(mut self, readings: &[f32]) -> Self {
        self.cpu = readings.iter().copied().collect();
        self
    }

    pub fn with_processes(mut self, table: Vec<ProcessEntry>) -> Self {
        self.processes = [Ok(table)].into();
        self
    }
}

impl StatsSource for FakeSource {
    fn cpu_percent(&mut self) -> SourceResult<f32> {
        next(&mut self.cpu, &mut self.last_cpu).ok_or(SourceError::unavailable("cpu"))
    }

    fn memory(&mut self) -> SourceResult<MemoryUsage> {
        self.memory.ok_or(SourceError::unavailable("memory"))
    }

    fn swap(&mut self) -> SourceResult<MemoryUsage> {
        Ok(MemoryUsage::from_used_total(0, 0))
    }

    fn disk_usage(&mut self, _path: &Path) -> SourceResult<DiskSpace> {
        Ok(DiskSpace::from_free_total(40, 100))
    }

    fn disk_io_counters(&mut self) -> SourceResult<DiskIoCounters> {
        next(&mut self.disk_io, &mut self.last_disk).ok_or(SourceError::unavailable("disk io"))
    }

    fn net_io_counters(&mut self) -> SourceResult<NetIoCounters> {
        if self.counters_fail {
            return Err(SourceError::transient("net io", "interface went away"));
        }
        next(&mut self.net, &mut self.last_net).ok_or(SourceError::unavailable("net io"))
    }

    fn load_avg(&mut self) -> SourceResult<LoadAvg> {
        self.load_avg.ok_or(SourceError::unavailable("load average"))
    }

    fn boot_time(&mut self) -> SourceResult<u64> {
        self.boot_time.ok_or(SourceError::unavailable("boot time"))
    }

    fn battery(&mut self) -> SourceResult<Battery> {
        self.battery.ok_or(SourceError::unavailable("battery"))
    }

    fn processes(&mut self) -> SourceResult<Vec<ProcessEntry>> {
        self.process_calls += 1;
        next(&mut self.processes, &mut self.last_procs)
            .unwrap_or_else(|| Err(SourceError::unavailable("processes")))
    }

    fn host_info(&mut self) -> HostInfo {
        HostInfo {
            node: "testbox".into(),
            os: "TestOS 1.0".into(),
        }
    }
}

/// Starts at an arbitrary instant; only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
    pub unix: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
            unix: Rc::new(Cell::new(1_700_000_000)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
        self.unix.set(self.unix.get() + by.as_secs());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn unix_secs(&self) -> u64 {
        self.unix.get()
    }
}

pub fn proc(pid: u32, cpu: f32) -> ProcessEntry {
    ProcessEntry {
        pid,
        name: format!("proc{pid}"),
        cpu_percent: cpu,
        memory_percent: 0.5,
    }
}
