//! Daemon command: refresh on an interval until SIGINT or SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::watch;
use tracing::{info, warn};
use tse_options_core::config_loader::DEFAULT_CONFIG_PATH;
use tse_options_core::{Column, ConfigLoader, MarketRow, Snapshot, SnapshotStore, SortOrder};
use tse_options_scheduler::RefreshScheduler;

use super::output::{self, OutputFormat};

/// Arguments for the run command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// After each refresh, print the N options with the highest daily return
    #[arg(long)]
    pub top: Option<usize>,
}

/// The `n` option rows with the highest daily return.
#[must_use]
pub fn top_options(snapshot: &Snapshot, n: usize) -> Vec<&MarketRow> {
    snapshot
        .sorted_by(Column::DailyReturnPct, SortOrder::Descending)
        .into_iter()
        .filter(|row| row.is_option())
        .take(n)
        .collect()
}

/// Runs the refresh daemon.
///
/// # Errors
/// Returns an error if the config cannot be loaded, the scheduler cannot be
/// built, or signal handlers cannot be installed.
pub async fn run_refresh(args: RunArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;
    info!(
        url = %config.feed.url,
        interval_secs = config.refresh.interval_secs,
        timezone = %config.refresh.timezone,
        "Loaded configuration"
    );

    let store = Arc::new(SnapshotStore::new());
    let scheduler = RefreshScheduler::from_config(&config, Arc::clone(&store))?;

    let printer = args.top.map(|n| {
        let mut updates = store.subscribe();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let latest = updates.borrow_and_update().clone();
                let Some(snapshot) = latest else {
                    continue;
                };
                let rows = top_options(&snapshot, n);
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                let written = output::write_rows(&mut out, &snapshot, &rows, OutputFormat::Table);
                if let Err(e) = written {
                    warn!(error = %e, "Failed to print top options");
                }
            }
        })
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    shutdown_signal().await?;

    // The receiver is gone only if the loop already exited.
    let _ = shutdown_tx.send(true);
    refresh.await.context("Refresh task failed")?;
    if let Some(printer) = printer {
        printer.abort();
    }

    info!("Screener stopped");
    Ok(())
}

async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
            _ = sigint.recv() => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl+C")?;
        info!("Received Ctrl+C, initiating graceful shutdown");
    }

    Ok(())
}
