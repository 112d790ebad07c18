//! Joins option rows to their underlying instrument's prices.

use std::collections::HashMap;

use tse_options_core::MarketRow;

use crate::universe::{LEVERAGED_FUND_MARKER, LEVERAGED_FUND_SYMBOL, TARGET_SYMBOLS};

/// Close and last price of an underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnderlyingQuote {
    pub close: i64,
    pub last: i64,
}

/// Builds `short_symbol -> quote` from every non-option row.
///
/// A symbol appearing twice keeps the later row's prices.
#[must_use]
pub fn price_map(rows: &[MarketRow]) -> HashMap<String, UnderlyingQuote> {
    rows.iter()
        .filter(|r| !r.is_option())
        .map(|r| {
            (
                r.short_symbol.clone(),
                UnderlyingQuote {
                    close: r.close_price,
                    last: r.last_price,
                },
            )
        })
        .collect()
}

/// Finds the underlying symbol named inside an option's full name.
///
/// Targets are tried in list order and the first substring hit wins.
#[must_use]
pub fn resolve_symbol(full_name: &str) -> Option<&'static str> {
    TARGET_SYMBOLS
        .iter()
        .copied()
        .find(|target| full_name.contains(target))
        .or_else(|| full_name.contains(LEVERAGED_FUND_MARKER).then_some(LEVERAGED_FUND_SYMBOL))
}

/// Sets the underlying symbol and prices on every option row.
pub fn apply(rows: &mut [MarketRow]) {
    let prices = price_map(rows);

    for row in rows.iter_mut().filter(|r| r.is_option()) {
        let Some(symbol) = resolve_symbol(&row.full_name) else {
            continue;
        };
        let quote = prices.get(symbol).copied().unwrap_or_default();
        row.underlying_symbol = Some(symbol.to_string());
        row.underlying_close_price = quote.close;
        row.underlying_last_price = quote.last;
    }
}
