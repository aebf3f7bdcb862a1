//! Domain types for the token-economy ledger.
//!
//! This module provides:
//! - Domain primitives: Address, TimeWindow, day buckets
//! - Transfer records decoded from daily log objects
//! - Side tables (user join times, token prices)
//! - Metric types produced by the aggregation engine

pub mod metrics;
pub mod primitives;
pub mod side_tables;
pub mod transfer;

pub use metrics::{
    EconomyReport, PayerType, UserRoiDetail, UserTransactionVolume, ValueFrequencyPercentage,
};
pub use primitives::{day_bucket, Address, TimeWindow};
pub use side_tables::{
    InvalidPriceDate, PriceEntry, PriceHistory, PriceTable, UserJoinTable, PRICE_DATE_FORMAT,
};
pub use transfer::Transfer;
