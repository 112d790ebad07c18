//! CLI commands for the options screener.

pub mod output;
pub mod run;
pub mod snapshot;

pub use output::OutputFormat;
pub use run::{run_refresh, RunArgs};
pub use snapshot::{run_snapshot, SnapshotArgs};
