use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::Result;

use super::snapshot::{DiskUsage, MemoryUsage};

mod sysinfo;

pub use self::sysinfo::SysinfoProvider;

/// Cumulative network counters summed over all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetCounters {
    pub rx: u64,
    pub tx: u64,
}

/// Capability interface over the raw OS measurements the collector needs.
///
/// Every call may fail independently; the collector treats a failure as
/// "leave that field at zero" and keeps going.
pub trait StatsProvider: Send {
    /// Blocks the calling thread for `window` while the OS accumulates a
    /// utilization sample. Returns a percentage in [0, 100].
    fn cpu_percent(&mut self, window: Duration) -> Result<f64>;

    fn virtual_memory(&mut self) -> Result<MemoryUsage>;

    /// Mount points of the currently known partitions.
    fn disk_partitions(&mut self) -> Result<Vec<PathBuf>>;

    fn disk_usage(&mut self, mount: &Path) -> Result<DiskUsage>;

    /// Cumulative receive/transmit counters as reported by the OS.
    fn net_io_counters(&mut self) -> Result<NetCounters>;

    /// Seconds since boot.
    fn uptime(&mut self) -> Result<u64>;
}
