//! Side tables joined against transfers: user join times and token prices.

use crate::domain::{day_bucket, Address, TimeWindow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Calendar format used by the price history document.
pub const PRICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Join timestamps of the users who joined inside the run window ("new users").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserJoinTable {
    joined_at: HashMap<Address, i64>,
}

impl UserJoinTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(address, join timestamp)` pairs, keeping only those in `window`.
    pub fn from_entries<I>(entries: I, window: &TimeWindow) -> Self
    where
        I: IntoIterator<Item = (Address, i64)>,
    {
        let joined_at = entries
            .into_iter()
            .filter(|(_, ts)| window.contains(*ts))
            .collect();
        Self { joined_at }
    }

    pub fn insert(&mut self, address: Address, joined_at: i64) {
        self.joined_at.insert(address, joined_at);
    }

    /// Join timestamp if `address` is a new user.
    pub fn joined_at(&self, address: &Address) -> Option<i64> {
        self.joined_at.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.joined_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joined_at.is_empty()
    }
}

/// One `{date, price}` entry of the price history document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Price")]
    pub price: f64,
}

/// Price history document for one token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(alias = "Prices")]
    pub prices: Vec<PriceEntry>,
}

#[derive(Debug, Error)]
#[error("invalid price date {date:?}: {source}")]
pub struct InvalidPriceDate {
    pub date: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Day-bucket timestamp → price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    by_day: HashMap<i64, f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a price history into a day-keyed table.
    ///
    /// Every date must parse; one bad entry rejects the whole table. A date
    /// listed twice keeps its last price.
    pub fn from_history(history: &PriceHistory) -> Result<Self, InvalidPriceDate> {
        let mut by_day = HashMap::with_capacity(history.prices.len());
        for entry in &history.prices {
            let date = NaiveDate::parse_from_str(&entry.date, PRICE_DATE_FORMAT).map_err(
                |source| InvalidPriceDate {
                    date: entry.date.clone(),
                    source,
                },
            )?;
            let day = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
            by_day.insert(day, entry.price);
        }
        Ok(Self { by_day })
    }

    pub fn insert(&mut self, day: i64, price: f64) {
        self.by_day.insert(day, price);
    }

    /// Price for the UTC day containing `ts`.
    pub fn price_on_day_of(&self, ts: i64, seconds_per_day: i64) -> Option<f64> {
        self.by_day.get(&day_bucket(ts, seconds_per_day)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}
