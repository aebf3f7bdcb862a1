pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod orchestration;

pub use config::{Config, EconomyConfig};
pub use datasource::{LocalObjectStore, MockObjectStore, ObjectStore, StoreError};
pub use domain::{
    Address, EconomyReport, PayerType, PriceTable, TimeWindow, Transfer, UserJoinTable,
    UserRoiDetail, UserTransactionVolume, ValueFrequencyPercentage,
};
pub use error::AppError;
pub use orchestration::Analyzer;
