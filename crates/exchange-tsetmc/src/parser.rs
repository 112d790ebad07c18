//! Market-watch body splitting.
//!
//! The body is a set of `@`-separated sections. Section 2 holds the
//! instrument rows, separated by `;`, each a `,`-separated field list.

use tracing::{debug, warn};
use tse_options_core::RawRecord;

use crate::error::{FeedError, Result};

const SECTION_DELIMITER: char = '@';
const ROW_DELIMITER: char = ';';
const ROWS_SECTION: usize = 2;

/// Splits a feed body into raw records.
///
/// Rows shorter than [`RawRecord::MIN_FIELDS`] are dropped without error.
///
/// # Errors
/// Returns [`FeedError::MalformedFeed`] if the rows section is missing.
pub fn parse_market_watch(body: &str) -> Result<Vec<RawRecord>> {
    let section = body.split(SECTION_DELIMITER).nth(ROWS_SECTION).ok_or_else(|| {
        FeedError::MalformedFeed(format!(
            "expected at least {} '{SECTION_DELIMITER}' sections, got {}",
            ROWS_SECTION + 1,
            body.split(SECTION_DELIMITER).count()
        ))
    })?;

    let mut dropped = 0usize;
    let records: Vec<RawRecord> = section
        .split(ROW_DELIMITER)
        .filter(|row| !row.is_empty())
        .map(RawRecord::from)
        .filter(|record| {
            let keep = record.len() >= RawRecord::MIN_FIELDS;
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    if dropped > 0 {
        warn!(dropped, "Dropped feed rows with too few fields");
    }
    debug!(rows = records.len(), "Parsed market-watch rows");

    Ok(records)
}
