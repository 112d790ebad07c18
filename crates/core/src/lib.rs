pub mod config;
pub mod config_loader;
pub mod market;
pub mod snapshot;
pub mod traits;

pub use config::{AppConfig, FeedConfig, RefreshConfig};
pub use config_loader::ConfigLoader;
pub use market::{is_option_code, ContractType, Dte, MarketRow, RawRecord, OPTION_INDUSTRY_CODES};
pub use snapshot::{CellValue, Column, ColumnError, Snapshot, SnapshotStore, SortOrder};
pub use traits::{Clock, FeedSource, FixedClock, SystemClock};
