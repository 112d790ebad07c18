//! One-shot snapshot command.
//!
//! Runs a single refresh cycle against the live feed and prints the table,
//! optionally narrowed by a numeric range and ordered by one column.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tse_options_core::config_loader::DEFAULT_CONFIG_PATH;
use tse_options_core::{Column, ConfigLoader, MarketRow, Snapshot, SnapshotStore, SortOrder};
use tse_options_scheduler::RefreshScheduler;

use super::output::{self, OutputFormat};

/// Inclusive numeric range on one column, written `COLUMN:MIN:MAX`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub column: Column,
    pub min: f64,
    pub max: f64,
}

impl FromStr for RangeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [column, min, max] = parts.as_slice() else {
            return Err(format!("expected COLUMN:MIN:MAX, got '{s}'"));
        };

        let column = column.parse::<Column>().map_err(|e| e.to_string())?;
        let min = min
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid minimum '{min}'"))?;
        let max = max
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid maximum '{max}'"))?;
        if min > max {
            return Err(format!("minimum {min} is greater than maximum {max}"));
        }

        Ok(Self { column, min, max })
    }
}

/// Sort key written `COLUMN` or `COLUMN:asc|desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub order: SortOrder,
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, order) = match s.split_once(':') {
            Some((column, order)) => {
                let order = order.parse::<SortOrder>().map_err(|e| e.to_string())?;
                (column, order)
            }
            None => (s, SortOrder::Ascending),
        };
        let column = column.parse::<Column>().map_err(|e| e.to_string())?;
        Ok(Self { column, order })
    }
}

/// Arguments for the snapshot command.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Keep rows whose column value is within MIN..=MAX (e.g. "dte:0:30")
    #[arg(long)]
    pub filter: Option<RangeFilter>,

    /// Sort by column, ascending unless ":desc" is given (e.g. "margin:desc")
    #[arg(long)]
    pub sort: Option<SortSpec>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only print option contracts
    #[arg(long)]
    pub options_only: bool,
}

/// Applies sort, filter, and the options-only switch to the snapshot.
///
/// Filtering keeps sorted order, so the result is the same as filtering
/// first and sorting the survivors.
#[must_use]
pub fn select_rows<'a>(snapshot: &'a Snapshot, args: &SnapshotArgs) -> Vec<&'a MarketRow> {
    let mut rows = match args.sort {
        Some(sort) => snapshot.sorted_by(sort.column, sort.order),
        None => snapshot.rows.iter().collect(),
    };

    rows.retain(|row| {
        (!args.options_only || row.is_option())
            && args
                .filter
                .map_or(true, |f| f.column.in_range(row, f.min, f.max))
    });
    rows
}

/// Runs the snapshot command.
///
/// # Errors
/// Returns an error if the config cannot be loaded, the refresh cycle fails,
/// or writing to stdout fails.
pub async fn run_snapshot(args: SnapshotArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let scheduler = RefreshScheduler::from_config(&config, Arc::new(SnapshotStore::new()))?;
    let report = scheduler.run_cycle().await?;
    tracing::info!(
        rows = report.total_rows,
        options = report.option_rows,
        unresolved = report.unresolved_options,
        elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
        "Snapshot built"
    );

    let snapshot = scheduler
        .store()
        .latest()
        .context("Refresh cycle did not publish a snapshot")?;
    let rows = select_rows(&snapshot, &args);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_rows(&mut out, &snapshot, &rows, args.format)
}
