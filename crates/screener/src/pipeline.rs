//! Raw records to a finished snapshot.

use chrono::NaiveDate;
use tracing::debug;
use tse_options_core::{Clock, MarketRow, RawRecord, Snapshot};

use crate::{calendar, classifier, decomposer, metrics, resolver};

/// Runs every stage over the records, in order, and returns the table.
///
/// Deterministic for a given `records` and `today`.
#[must_use]
pub fn build_rows(records: &[RawRecord], today: NaiveDate) -> Vec<MarketRow> {
    let mut rows = classifier::classify(records);
    debug!(
        input = records.len(),
        kept = rows.len(),
        "Classified market-watch records"
    );

    decomposer::apply(&mut rows);
    resolver::apply(&mut rows);
    calendar::apply(&mut rows, today);
    metrics::apply(&mut rows);

    rows
}

/// Builds a snapshot stamped with the clock's current time.
///
/// DTE is computed against the same instant's calendar date.
#[must_use]
pub fn build_snapshot(records: &[RawRecord], clock: &dyn Clock) -> Snapshot {
    let now = clock.now();
    let rows = build_rows(records, now.date_naive());
    Snapshot::new(rows, now)
}
