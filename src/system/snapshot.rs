use std::path::PathBuf;

use serde::Serialize;

/// One point-in-time set of host resource measurements.
///
/// A default-constructed snapshot doubles as the "never written" sentinel:
/// `memory.total == 0` marks a slot that holds no real sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "cpu")]
    pub cpu_percent: f64,
    pub memory: MemoryUsage,
    pub disk: Vec<DiskUsage>,
    pub network: NetworkUsage,
    pub uptime: u64,
    /// 1/5/15-minute load. Not collected yet; kept so the wire shape stays
    /// stable once it is.
    pub load_avg: [f64; 3],
}

impl Snapshot {
    /// True for slots that never received a completed sample (or whose
    /// memory read failed entirely). Sentinels are excluded from historical
    /// query results.
    pub fn is_sentinel(&self) -> bool {
        self.memory.total == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub total: u64,
    pub used: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsage {
    pub path: PathBuf,
    pub total: u64,
    pub used: u64,
    pub used_percent: f64,
}

/// Cumulative receive/transmit byte counters as reported at sample time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NetworkUsage {
    pub rx: u64,
    pub tx: u64,
}
