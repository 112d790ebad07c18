//! TSETMC market-watch integration.
//!
//! This crate provides:
//! - HTTP client for the `MarketWatchPlus` endpoint with a bounded timeout
//! - Splitting of the raw body into per-instrument records
//! - Typed errors for the failures that abort a refresh cycle
//!
//! # Feed layout
//!
//! The body is `@`-separated. The third section carries one row per
//! instrument, rows separated by `;`, fields by `,`. Field 2 is the trading
//! symbol, field 3 the full name, fields 6 and 7 the close and last prices,
//! and field 22 the industry code.

pub mod client;
pub mod error;
pub mod parser;

pub use client::{TsetmcClient, TsetmcClientConfig};
pub use error::{FeedError, Result};
pub use parser::parse_market_watch;
