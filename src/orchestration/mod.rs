pub mod analyzer;
pub mod catalog;
pub mod fetch;
pub mod side_tables;

pub use analyzer::{build_report, Analyzer};
pub use catalog::{key_timestamp, list_window, select_keys, KeyTimestampError};
pub use fetch::{partition_chunks, ChunkedFetcher, FetchError, FetchOptions};
pub use side_tables::{SideTableError, SideTableLoader, SideTables};
