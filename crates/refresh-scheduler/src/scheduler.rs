use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tse_options_core::{AppConfig, Clock, FeedSource, SnapshotStore, SystemClock};
use tse_options_screener::build_snapshot;
use tse_options_tsetmc::{parse_market_watch, TsetmcClient, TsetmcClientConfig};

/// Summary of one successful refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub total_rows: usize,
    pub option_rows: usize,
    pub unresolved_options: usize,
    pub elapsed: Duration,
}

pub struct RefreshScheduler {
    feed: Arc<dyn FeedSource>,
    clock: Arc<dyn Clock>,
    store: Arc<SnapshotStore>,
    interval: Duration,
}

impl RefreshScheduler {
    #[must_use]
    pub fn new(
        feed: Arc<dyn FeedSource>,
        clock: Arc<dyn Clock>,
        store: Arc<SnapshotStore>,
        interval: Duration,
    ) -> Self {
        Self {
            feed,
            clock,
            store,
            interval,
        }
    }

    /// Wires the TSETMC client and a wall clock in the configured timezone.
    ///
    /// # Errors
    /// Returns an error if the timezone is unknown or the HTTP client cannot
    /// be built.
    pub fn from_config(config: &AppConfig, store: Arc<SnapshotStore>) -> Result<Self> {
        let tz = config.refresh.tz()?;
        let client = TsetmcClient::new(TsetmcClientConfig::from(&config.feed))
            .context("Failed to build market-watch client")?;

        Ok(Self::new(
            Arc::new(client),
            Arc::new(SystemClock::new(tz)),
            store,
            Duration::from_secs(config.refresh.interval_secs.max(1)),
        ))
    }

    #[must_use]
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single fetch → parse → pipeline → publish pass.
    ///
    /// # Errors
    /// Returns an error if the fetch fails or the body has no records
    /// section. Nothing is published in that case.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let started = Instant::now();

        let body = self
            .feed
            .fetch()
            .await
            .context("Failed to fetch market watch")?;
        let records = parse_market_watch(&body).context("Failed to parse market watch")?;
        let snapshot = build_snapshot(&records, self.clock.as_ref());

        let report = CycleReport {
            total_rows: snapshot.total_rows(),
            option_rows: snapshot.option_rows(),
            unresolved_options: snapshot.unresolved_options(),
            elapsed: started.elapsed(),
        };
        self.store.publish(snapshot);

        Ok(report)
    }

    /// Refreshes on every tick until `shutdown` flips to `true` or its
    /// sender is dropped.
    ///
    /// The first cycle starts immediately. A cycle that outlasts the
    /// interval delays the next tick instead of stacking ticks up.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Refresh scheduler started"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !*shutdown.borrow() {
            tokio::select! {
                _ = interval.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }

            match self.run_cycle().await {
                Ok(report) => info!(
                    rows = report.total_rows,
                    options = report.option_rows,
                    unresolved = report.unresolved_options,
                    elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
                    "Snapshot refreshed"
                ),
                Err(e) => error!(
                    error = %e,
                    cause = %e.root_cause(),
                    "Refresh cycle failed, keeping previous snapshot"
                ),
            }
        }

        info!("Refresh scheduler stopped");
    }
}
