use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, System};

use super::{NetCounters, StatsProvider};
use crate::system::snapshot::{DiskUsage, MemoryUsage};

/// Production [`StatsProvider`] backed by `sysinfo`. Keeps the `System`,
/// `Disks` and `Networks` handles alive between cycles so refreshes reuse
/// their allocations.
pub struct SysinfoProvider {
    sys: System,
    disks: Disks,
    networks: Networks,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        // Prime the CPU sampler so the first windowed read has a baseline.
        sys.refresh_cpu_usage();
        SysinfoProvider {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl StatsProvider for SysinfoProvider {
    fn cpu_percent(&mut self, window: Duration) -> Result<f64> {
        self.sys.refresh_cpu_usage();
        std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_usage();
        Ok(f64::from(self.sys.global_cpu_usage()))
    }

    fn virtual_memory(&mut self) -> Result<MemoryUsage> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(eyre!("memory totals unavailable"));
        }
        let used = self.sys.used_memory();
        Ok(MemoryUsage {
            total,
            used,
            used_percent: used as f64 / total as f64 * 100.0,
        })
    }

    fn disk_partitions(&mut self) -> Result<Vec<PathBuf>> {
        self.disks.refresh(true);
        Ok(self
            .disks
            .list()
            .iter()
            .map(|disk| disk.mount_point().to_path_buf())
            .collect())
    }

    fn disk_usage(&mut self, mount: &Path) -> Result<DiskUsage> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == mount)
            .ok_or_else(|| eyre!("mount point {} not present", mount.display()))?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        let used_percent = if total > 0 {
            used as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Ok(DiskUsage {
            path: mount.to_path_buf(),
            total,
            used,
            used_percent,
        })
    }

    fn net_io_counters(&mut self) -> Result<NetCounters> {
        self.networks.refresh(true);
        let mut counters = NetCounters::default();
        for (_name, data) in self.networks.iter() {
            counters.rx += data.total_received();
            counters.tx += data.total_transmitted();
        }
        Ok(counters)
    }

    fn uptime(&mut self) -> Result<u64> {
        Ok(System::uptime())
    }
}
