//! Latest computed table and the accessors the serving side reads it with.
//!
//! The store keeps a single `Arc<Snapshot>` behind a `watch` channel. A
//! refresh cycle builds a complete new snapshot and swaps it in with one
//! `send_replace`, so a reader either sees the previous table or the new
//! one, never a partial rebuild.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::market::{Dte, MarketRow};

/// Errors from the column-based accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown sort order: {0} (expected asc or desc)")]
    UnknownOrder(String),
}

/// One fully enriched table plus the time it was built.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub rows: Vec<MarketRow>,
    pub updated_at: DateTime<Tz>,
}

impl Snapshot {
    #[must_use]
    pub fn new(rows: Vec<MarketRow>, updated_at: DateTime<Tz>) -> Self {
        Self { rows, updated_at }
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn option_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.contract_type.is_option()).count()
    }

    /// Option rows whose underlying could not be resolved.
    #[must_use]
    pub fn unresolved_options(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.contract_type.is_option() && r.underlying_symbol.is_none())
            .count()
    }

    /// Last-update time formatted for display.
    #[must_use]
    pub fn last_update(&self) -> String {
        self.updated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Rows whose numeric value in `column` lies in `[min, max]`.
    ///
    /// Missing values and text columns never match.
    #[must_use]
    pub fn filter_range(&self, column: Column, min: f64, max: f64) -> Vec<&MarketRow> {
        self.rows
            .iter()
            .filter(|row| column.in_range(row, min, max))
            .collect()
    }

    /// Rows stably sorted by `column`; missing values go last in either order.
    #[must_use]
    pub fn sorted_by(&self, column: Column, order: SortOrder) -> Vec<&MarketRow> {
        let mut rows: Vec<&MarketRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            let (a, b) = (column.value(a), column.value(b));
            match (a.is_missing(), b.is_missing()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => match order {
                    SortOrder::Ascending => a.compare(&b),
                    SortOrder::Descending => b.compare(&a),
                },
            }
        });
        rows
    }
}

/// Holder for the most recent snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    tx: watch::Sender<Option<Arc<Snapshot>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replaces the current snapshot as a whole.
    pub fn publish(&self, snapshot: Snapshot) {
        self.tx.send_replace(Some(Arc::new(snapshot)));
    }

    /// The latest snapshot, or `None` before the first successful cycle.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.tx.borrow().clone()
    }

    /// A receiver that is notified on every publish.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.tx.subscribe()
    }
}

/// Sort direction for [`Snapshot::sorted_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ColumnError::UnknownOrder(s.to_string())),
        }
    }
}

/// Addressable columns of a [`MarketRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    IndustryCode,
    ShortSymbol,
    FullName,
    ClosePrice,
    LastPrice,
    ContractType,
    StrikePrice,
    ExpirationToken,
    UnderlyingSymbol,
    UnderlyingLastPrice,
    UnderlyingClosePrice,
    Dte,
    Margin,
    DailyReturnPct,
    OtmPct,
}

impl Column {
    pub const ALL: [Self; 15] = [
        Self::IndustryCode,
        Self::ShortSymbol,
        Self::FullName,
        Self::ClosePrice,
        Self::LastPrice,
        Self::ContractType,
        Self::StrikePrice,
        Self::ExpirationToken,
        Self::UnderlyingSymbol,
        Self::UnderlyingLastPrice,
        Self::UnderlyingClosePrice,
        Self::Dte,
        Self::Margin,
        Self::DailyReturnPct,
        Self::OtmPct,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IndustryCode => "industry_code",
            Self::ShortSymbol => "short_symbol",
            Self::FullName => "full_name",
            Self::ClosePrice => "close_price",
            Self::LastPrice => "last_price",
            Self::ContractType => "contract_type",
            Self::StrikePrice => "strike_price",
            Self::ExpirationToken => "expiration_token",
            Self::UnderlyingSymbol => "underlying_symbol",
            Self::UnderlyingLastPrice => "underlying_last_price",
            Self::UnderlyingClosePrice => "underlying_close_price",
            Self::Dte => "dte",
            Self::Margin => "margin",
            Self::DailyReturnPct => "daily_return_pct",
            Self::OtmPct => "otm_pct",
        }
    }

    /// True if the row's numeric value lies in `[min, max]`.
    #[must_use]
    pub fn in_range(self, row: &MarketRow, min: f64, max: f64) -> bool {
        self.value(row)
            .as_f64()
            .is_some_and(|v| v >= min && v <= max)
    }

    /// Extracts this column's value from a row.
    #[must_use]
    pub fn value(self, row: &MarketRow) -> CellValue<'_> {
        match self {
            Self::IndustryCode => CellValue::Int(row.industry_code),
            Self::ShortSymbol => CellValue::Text(&row.short_symbol),
            Self::FullName => CellValue::Text(&row.full_name),
            Self::ClosePrice => CellValue::Int(row.close_price),
            Self::LastPrice => CellValue::Int(row.last_price),
            Self::ContractType => CellValue::Label(row.contract_type.to_string()),
            Self::StrikePrice => CellValue::Int(row.strike_price),
            Self::ExpirationToken => CellValue::Text(&row.expiration_token),
            Self::UnderlyingSymbol => row
                .underlying_symbol
                .as_deref()
                .map_or(CellValue::Missing, CellValue::Text),
            Self::UnderlyingLastPrice => CellValue::Int(row.underlying_last_price),
            Self::UnderlyingClosePrice => CellValue::Int(row.underlying_close_price),
            Self::Dte => match row.dte {
                Dte::Days(d) => CellValue::Int(i64::from(d)),
                Dte::NotAvailable => CellValue::Missing,
            },
            Self::Margin => CellValue::Int(row.margin),
            Self::DailyReturnPct => row
                .daily_return_pct
                .and_then(|d| d.to_f64())
                .map_or(CellValue::Missing, CellValue::Float),
            Self::OtmPct => row
                .otm_pct
                .and_then(|d| d.to_f64())
                .map_or(CellValue::Missing, CellValue::Float),
        }
    }
}

impl FromStr for Column {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ColumnError::UnknownColumn(s.to_string()))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell, typed for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    Label(String),
    Missing,
}

impl CellValue<'_> {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) | Self::Label(_) | Self::Missing => None,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Label(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.as_text().cmp(&other.as_text()),
            },
        }
    }
}

impl std::fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.2}"),
            Self::Text(s) => f.write_str(s),
            Self::Label(s) => f.write_str(s),
            Self::Missing => f.write_str("NA"),
        }
    }
}
