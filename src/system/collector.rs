use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};

use super::MetricsState;
use super::provider::{NetCounters, StatsProvider};
use super::snapshot::Snapshot;

/// Network counter baseline left by the previous cycle.
#[derive(Debug, Clone, Copy)]
struct NetBaseline {
    counters: NetCounters,
    sampled_at: SystemTime,
}

/// Owns the provider and builds one snapshot per cycle, publishing it to the
/// shared state. Driven by at most one task at a time.
pub(crate) struct Collector {
    provider: Box<dyn StatsProvider>,
    state: Arc<MetricsState>,
    baseline: NetBaseline,
    cpu_window: Duration,
}

impl Collector {
    /// Primes the network baseline. A provider that cannot report counters
    /// at startup is tolerated; the baseline starts at zero.
    pub fn new(
        mut provider: Box<dyn StatsProvider>,
        state: Arc<MetricsState>,
        cpu_window: Duration,
    ) -> Self {
        let counters = match provider.net_io_counters() {
            Ok(counters) => counters,
            Err(err) => {
                warn!(error = %err, "network baseline unavailable at startup");
                NetCounters::default()
            }
        };
        Collector {
            provider,
            state,
            baseline: NetBaseline {
                counters,
                sampled_at: SystemTime::now(),
            },
            cpu_window,
        }
    }

    /// Runs one full measurement cycle and publishes the result.
    ///
    /// Each measurement group is queried independently: a failed call logs a
    /// warning and leaves its field zeroed, a failed partition is omitted,
    /// and the cycle always completes.
    pub fn collect_cycle(&mut self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        match self.provider.cpu_percent(self.cpu_window) {
            Ok(percent) => snapshot.cpu_percent = percent,
            Err(err) => warn!(error = %err, "cpu sample failed"),
        }

        match self.provider.virtual_memory() {
            Ok(memory) => snapshot.memory = memory,
            Err(err) => warn!(error = %err, "memory sample failed"),
        }

        match self.provider.disk_partitions() {
            Ok(mounts) => {
                for mount in mounts {
                    match self.provider.disk_usage(&mount) {
                        Ok(usage) => snapshot.disk.push(usage),
                        Err(err) => {
                            warn!(mount = %mount.display(), error = %err, "disk sample failed");
                        }
                    }
                }
            }
            Err(err) => warn!(error = %err, "partition enumeration failed"),
        }

        match self.provider.net_io_counters() {
            Ok(counters) => self.record_network(&mut snapshot, counters),
            Err(err) => warn!(error = %err, "network sample failed"),
        }

        match self.provider.uptime() {
            Ok(seconds) => snapshot.uptime = seconds,
            Err(err) => warn!(error = %err, "uptime read failed"),
        }

        self.state.publish(snapshot.clone());
        snapshot
    }

    /// Stores the raw cumulative counters and advances the baseline whenever
    /// wall-clock time moved forward since the last cycle. On a clock that
    /// stood still or went backwards the fields stay zero and the baseline
    /// is kept.
    fn record_network(&mut self, snapshot: &mut Snapshot, counters: NetCounters) {
        let now = SystemTime::now();
        let advanced = now
            .duration_since(self.baseline.sampled_at)
            .is_ok_and(|elapsed| elapsed > Duration::ZERO);
        if advanced {
            debug!(
                rx_delta = counters.rx.saturating_sub(self.baseline.counters.rx),
                tx_delta = counters.tx.saturating_sub(self.baseline.counters.tx),
                "network counters sampled"
            );
            snapshot.network.rx = counters.rx;
            snapshot.network.tx = counters.tx;
            self.baseline = NetBaseline {
                counters,
                sampled_at: now,
            };
        }
    }
}

/// Drives the periodic schedule until the shutdown signal fires or its
/// sender is dropped. The first cycle has already run synchronously during
/// init, so the interval's immediate initial tick is consumed before the
/// loop. An in-flight cycle always finishes before the task exits.
pub(crate) async fn run(
    mut collector: Collector,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = interval.tick() => {
                // The CPU sampler blocks for its window, so the cycle runs
                // on the blocking pool.
                match tokio::task::spawn_blocking(move || {
                    collector.collect_cycle();
                    collector
                })
                .await
                {
                    Ok(returned) => collector = returned,
                    Err(err) => {
                        error!(error = %err, "collection cycle panicked");
                        break;
                    }
                }
            }
        }
    }
    debug!("collector schedule stopped");
}
