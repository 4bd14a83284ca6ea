//! The telemetry subsystem: a background collector feeding a bounded
//! in-memory history and a current-snapshot cache.

pub mod history;
pub mod provider;
pub mod snapshot;

mod collector;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::MonitorConfig;
use collector::Collector;
use history::{DEFAULT_HOURS, HistoryStore, SAMPLES_PER_HOUR};
use provider::{StatsProvider, SysinfoProvider};
use snapshot::Snapshot;

/// Default applied at the HTTP boundary when the `hours` query parameter is
/// missing or out of range. Intentionally narrower than the direct API's
/// 24-hour fallback; the two call sites differ on purpose.
pub const HTTP_DEFAULT_HOURS: i64 = 6;

/// State shared between the collector task and accessor callers: the
/// current-snapshot cache and the history ring, each behind its own lock so
/// readers of one never contend with writers of the other.
#[derive(Debug)]
pub(crate) struct MetricsState {
    current: RwLock<Snapshot>,
    history: HistoryStore,
}

impl MetricsState {
    pub fn new(capacity: usize) -> Self {
        MetricsState {
            current: RwLock::new(Snapshot::default()),
            history: HistoryStore::new(capacity),
        }
    }

    pub fn current(&self) -> Snapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Whole-snapshot replace of the cache, then an append to the ring. Two
    /// independent locks; a reader may briefly see one updated before the
    /// other, but never a half-written snapshot.
    pub fn publish(&self, snapshot: Snapshot) {
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = snapshot.clone();
        }
        self.history.append(snapshot);
    }
}

/// Handle to a running telemetry collector.
///
/// Constructed once at startup by [`Monitor::init`]; the HTTP layer keeps it
/// for the process lifetime and calls the read methods from request
/// handlers. Reads never fail and never block beyond a lock acquisition.
#[derive(Debug)]
pub struct Monitor {
    state: Arc<MetricsState>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Monitor {
    /// Sets up the telemetry subsystem against the real OS: allocates the
    /// history ring, primes the network baseline, runs the first collection
    /// cycle to completion and starts the periodic schedule.
    pub async fn init(config: &MonitorConfig) -> Result<Monitor> {
        Self::init_with_provider(config, Box::new(SysinfoProvider::new())).await
    }

    /// Same as [`Monitor::init`] but with an injected provider, so tests can
    /// run isolated instances against scripted measurements.
    pub async fn init_with_provider(
        config: &MonitorConfig,
        provider: Box<dyn StatsProvider>,
    ) -> Result<Monitor> {
        let settings = &config.collector;
        let hours = if settings.history_hours == 0 || settings.history_hours > 24 {
            24
        } else {
            settings.history_hours
        };
        let state = Arc::new(MetricsState::new(hours as usize * SAMPLES_PER_HOUR));

        let cpu_window = Duration::from_millis(settings.cpu_window_ms);
        let collector = Collector::new(provider, Arc::clone(&state), cpu_window);

        // The first cycle runs to completion before init returns, so
        // current_metrics never serves a sentinel to early callers.
        let collector = tokio::task::spawn_blocking(move || {
            let mut collector = collector;
            collector.collect_cycle();
            collector
        })
        .await
        .wrap_err("initial collection cycle did not complete")?;

        let period = Duration::from_secs(settings.sample_interval_secs.max(1));
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(collector::run(collector, period, stop_rx));
        info!(
            capacity_hours = hours,
            period_secs = period.as_secs(),
            "telemetry collector started"
        );

        Ok(Monitor {
            state,
            stop_tx,
            task,
        })
    }

    /// The most recently completed snapshot. Never fails; before the first
    /// cycle lands this is the zero snapshot.
    pub fn current_metrics(&self) -> Snapshot {
        self.state.current()
    }

    /// The last `hours` of samples, most recent first, sentinels excluded.
    /// Out-of-range values fall back to the full 24-hour horizon.
    pub fn historical_metrics(&self, hours: i64) -> Vec<Snapshot> {
        let hours = if hours <= 0 || hours > DEFAULT_HOURS {
            DEFAULT_HOURS
        } else {
            hours
        };
        self.state.history().query(hours as usize * SAMPLES_PER_HOUR)
    }

    /// Stops the schedule and waits for any in-flight cycle to finish.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.stop_tx.send(true);
        self.task
            .await
            .wrap_err("collector task terminated abnormally")?;
        info!("telemetry collector stopped");
        Ok(())
    }
}

/// Parses the raw `hours` query-string value the way the monitor endpoints
/// do: absent, unparsable or out-of-range input falls back to
/// [`HTTP_DEFAULT_HOURS`].
pub fn parse_hours_param(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|hours| (1..=DEFAULT_HOURS).contains(hours))
        .unwrap_or(HTTP_DEFAULT_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_param_defaults_to_six() {
        assert_eq!(parse_hours_param(None), 6);
        assert_eq!(parse_hours_param(Some("")), 6);
        assert_eq!(parse_hours_param(Some("abc")), 6);
        assert_eq!(parse_hours_param(Some("0")), 6);
        assert_eq!(parse_hours_param(Some("-3")), 6);
        assert_eq!(parse_hours_param(Some("25")), 6);
    }

    #[test]
    fn hours_param_accepts_valid_range() {
        assert_eq!(parse_hours_param(Some("1")), 1);
        assert_eq!(parse_hours_param(Some("12")), 12);
        assert_eq!(parse_hours_param(Some(" 24 ")), 24);
    }
}
