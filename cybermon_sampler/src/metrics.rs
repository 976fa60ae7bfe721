//! `StatsSource` backed by sysinfo, plus a few Linux-only /sys readers.

#[cfg(target_os = "linux")]
use std::fs;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use sysinfo::{Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::source::StatsSource;
use crate::types::{
    percent_of, Battery, DiskIoCounters, DiskSpace, HostInfo, LoadAvg, MemoryUsage,
    NetIoCounters, ProcessEntry,
};

/// Minimum gap between two CPU reads for the second to be meaningful.
pub const CPU_SETTLE: Duration = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

pub struct SysinfoSource {
    sys: System,
    disks: Disks,
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> SourceResult<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SourceError::Startup(format!(
                "platform {} is not supported by sysinfo",
                std::env::consts::OS
            )));
        }
        let mut sys = System::new();
        // Prime CPU counters so the first reading isn't 0%
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Ok(Self {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        })
    }
}

impl StatsSource for SysinfoSource {
    fn cpu_percent(&mut self) -> SourceResult<f32> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(SourceError::transient("cpu", "no cpus reported"));
        }
        Ok(self.sys.global_cpu_usage().clamp(0.0, 100.0))
    }

    fn memory(&mut self) -> SourceResult<MemoryUsage> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SourceError::transient("memory", "total memory reported as 0"));
        }
        let used = total.saturating_sub(self.sys.available_memory());
        Ok(MemoryUsage::from_used_total(used, total))
    }

    fn swap(&mut self) -> SourceResult<MemoryUsage> {
        self.sys.refresh_memory();
        Ok(MemoryUsage::from_used_total(
            self.sys.used_swap(),
            self.sys.total_swap(),
        ))
    }

    fn disk_usage(&mut self, path: &Path) -> SourceResult<DiskSpace> {
        self.disks.refresh(false);
        // Longest mount point that contains the path wins
        let disk = self
            .disks
            .iter()
            .filter(|d| path.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
            .ok_or_else(|| {
                SourceError::transient("disk usage", format!("no mount contains {}", path.display()))
            })?;
        Ok(DiskSpace::from_free_total(
            disk.available_space(),
            disk.total_space(),
        ))
    }

    fn disk_io_counters(&mut self) -> SourceResult<DiskIoCounters> {
        self.disks.refresh(false);
        if self.disks.list().is_empty() {
            return Err(SourceError::transient("disk io", "no disks listed"));
        }
        Ok(sum_by_device(self.disks.iter().map(|d| {
            let usage = d.usage();
            (
                d.name().to_string_lossy().into_owned(),
                usage.total_read_bytes,
                usage.total_written_bytes,
            )
        })))
    }

    fn net_io_counters(&mut self) -> SourceResult<NetIoCounters> {
        self.networks.refresh(true);
        let (bytes_recv, bytes_sent) = self
            .networks
            .iter()
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            });
        Ok(NetIoCounters {
            bytes_sent,
            bytes_recv,
        })
    }

    #[cfg(unix)]
    fn load_avg(&mut self) -> SourceResult<LoadAvg> {
        let l = System::load_average();
        Ok(LoadAvg {
            one: l.one,
            five: l.five,
            fifteen: l.fifteen,
        })
    }

    // sysinfo reports zeros where there is no load average
    #[cfg(not(unix))]
    fn load_avg(&mut self) -> SourceResult<LoadAvg> {
        Err(SourceError::unavailable("load average"))
    }

    fn boot_time(&mut self) -> SourceResult<u64> {
        match System::boot_time() {
            0 => Err(SourceError::transient("boot time", "reported as 0")),
            t => Ok(t),
        }
    }

    #[cfg(target_os = "linux")]
    fn battery(&mut self) -> SourceResult<Battery> {
        read_linux_battery()
    }

    #[cfg(not(target_os = "linux"))]
    fn battery(&mut self) -> SourceResult<Battery> {
        Err(SourceError::unavailable("battery"))
    }

    fn processes(&mut self) -> SourceResult<Vec<ProcessEntry>> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        if self.sys.total_memory() == 0 {
            self.sys.refresh_memory();
        }
        let total_mem = self.sys.total_memory();
        let mut list: Vec<ProcessEntry> = self
            .sys
            .processes()
            .values()
            .map(|p| ProcessEntry {
                pid: p.pid().as_u32(),
                name: p.name().to_string_lossy().into_owned(),
                cpu_percent: p.cpu_usage(),
                memory_percent: percent_of(p.memory(), total_mem),
            })
            .collect();
        if list.is_empty() {
            return Err(SourceError::transient("processes", "process table is empty"));
        }
        sort_by_pid(&mut list);
        debug!(count = list.len(), "enumerated processes");
        Ok(list)
    }

    fn host_info(&mut self) -> HostInfo {
        let node = hostname::get()
            .ok()
            .map(|h| h.to_string_lossy().into_owned())
            .or_else(System::host_name)
            .unwrap_or_else(|| "unknown".into());
        let os = match (System::name(), System::kernel_version()) {
            (Some(n), Some(k)) => format!("{n} {k}"),
            (Some(n), None) => n,
            _ => std::env::consts::OS.to_string(),
        };
        HostInfo { node, os }
    }
}

/// Sum cumulative (device, read, written) counters, counting each device
/// once: several mounts of one device report the same counters.
pub fn sum_by_device(disks: impl Iterator<Item = (String, u64, u64)>) -> DiskIoCounters {
    let per_device: BTreeMap<String, (u64, u64)> = disks
        .map(|(name, read, written)| (name, (read, written)))
        .collect();
    let (read_bytes, write_bytes) = per_device
        .values()
        .fold((0u64, 0u64), |(r, w), (dr, dw)| {
            (r.saturating_add(*dr), w.saturating_add(*dw))
        });
    DiskIoCounters {
        read_bytes,
        write_bytes,
    }
}

/// sysinfo hands out a hash map; enumerate in pid order like the OS does.
pub fn sort_by_pid(list: &mut [ProcessEntry]) {
    list.sort_by_key(|p| p.pid);
}

// /sys/class/power_supply/<name>/{type,capacity,status}
#[cfg(target_os = "linux")]
fn read_linux_battery() -> SourceResult<Battery> {
    let dir = fs::read_dir("/sys/class/power_supply")
        .map_err(|_| SourceError::unavailable("battery"))?;
    for entry in dir.flatten() {
        let path = entry.path();
        let kind = fs::read_to_string(path.join("type")).unwrap_or_default();
        if kind.trim() != "Battery" {
            continue;
        }
        let capacity = fs::read_to_string(path.join("capacity"))
            .map_err(|e| SourceError::transient("battery", e.to_string()))?;
        let percent: f32 = capacity
            .trim()
            .parse()
            .map_err(|_| SourceError::transient("battery", format!("bad capacity {capacity:?}")))?;
        let status = fs::read_to_string(path.join("status")).unwrap_or_default();
        return Ok(Battery {
            percent: percent.clamp(0.0, 100.0),
            plugged: battery_plugged(status.trim()),
        });
    }
    Err(SourceError::unavailable("battery"))
}

#[cfg(any(target_os = "linux", test))]
fn battery_plugged(status: &str) -> bool {
    !status.eq_ignore_ascii_case("discharging")
}
