//! Background refresh of the screener snapshot.
//!
//! One task runs fetch, parse, pipeline, and publish back to back, then waits
//! for the next tick. Cycles never overlap and a failed cycle leaves the
//! previous snapshot in place.

pub mod scheduler;

pub use scheduler::{CycleReport, RefreshScheduler};
