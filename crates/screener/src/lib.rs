//! Option screening pipeline for the TSE market-watch feed.
//!
//! Each refresh cycle runs these stages in order over the whole table:
//! - Classify: keep option contracts and tracked underlyings
//! - Decompose: right, strike, and expiry token from the option name
//! - Resolve: underlying symbol and its close/last prices
//! - Calendar: Jalali expiry to Gregorian, days to expiration
//! - Metrics: required margin, daily return %, OTM %
//!
//! All stages are pure. Bad numbers and dates fall back to 0, `"NA"`, or
//! `None` on the affected row; nothing here fails a cycle.

pub mod calendar;
pub mod classifier;
pub mod coerce;
pub mod decomposer;
pub mod metrics;
pub mod pipeline;
pub mod resolver;
pub mod universe;

pub use pipeline::{build_rows, build_snapshot};
