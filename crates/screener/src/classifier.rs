//! Record selection: keep option contracts and tracked underlyings.

use tse_options_core::{MarketRow, RawRecord};

use crate::coerce::int_or_zero;
use crate::universe::{is_target_symbol, OPTION_CODE_FIELDS, OPTION_SYMBOL_PREFIXES};

const SYMBOL: usize = 2;
const FULL_NAME: usize = 3;
const CLOSE_PRICE: usize = 6;
const LAST_PRICE: usize = 7;
const INDUSTRY_CODE: usize = 22;

/// Returns true if the record belongs in the table.
///
/// A record is kept when its symbol starts with an option prefix and its raw
/// industry code is an option code, or when its symbol is exactly a tracked
/// underlying.
#[must_use]
pub fn is_in_scope(record: &RawRecord) -> bool {
    if record.len() < RawRecord::MIN_FIELDS {
        return false;
    }

    let symbol = record.field(SYMBOL);
    let option_like = symbol.starts_with(OPTION_SYMBOL_PREFIXES)
        && OPTION_CODE_FIELDS.contains(&record.field(INDUSTRY_CODE));

    option_like || is_target_symbol(symbol)
}

/// Converts an in-scope record to a row with only feed fields populated.
#[must_use]
pub fn to_row(record: &RawRecord) -> MarketRow {
    MarketRow::new(
        int_or_zero(record.field(INDUSTRY_CODE)),
        record.field(SYMBOL),
        record.field(FULL_NAME),
        int_or_zero(record.field(CLOSE_PRICE)),
        int_or_zero(record.field(LAST_PRICE)),
    )
}

/// Filters records and converts survivors to rows, preserving feed order.
#[must_use]
pub fn classify(records: &[RawRecord]) -> Vec<MarketRow> {
    records
        .iter()
        .filter(|r| is_in_scope(r))
        .map(to_row)
        .collect()
}
