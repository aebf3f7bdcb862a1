//! Loading of the auxiliary JSON documents joined against transfers.

use crate::datasource::{ObjectStore, StoreError};
use crate::domain::{
    Address, InvalidPriceDate, PriceHistory, PriceTable, TimeWindow, UserJoinTable,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SideTableError {
    #[error("failed to fetch {bucket}/{key}: {source}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to decode {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("bad price history {key}: {source}")]
    Price {
        key: String,
        #[source]
        source: InvalidPriceDate,
    },
}

/// Per-address metadata in the join-time document.
#[derive(Debug, Deserialize)]
struct UserMeta {
    #[serde(default)]
    timestamp: String,
}

/// Every side table one run needs.
#[derive(Debug, Clone, Default)]
pub struct SideTables {
    pub new_users: UserJoinTable,
    pub prices: PriceTable,
    /// Precomputed days-to-ROI per user; empty when no table is configured.
    pub roi_days: HashMap<Address, i64>,
}

#[derive(Debug, Clone)]
pub struct SideTableLoader {
    store: Arc<dyn ObjectStore>,
}

impl SideTableLoader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<T, SideTableError> {
        let body = self
            .store
            .get(bucket, key)
            .await
            .map_err(|source| SideTableError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| SideTableError::Json {
            key: key.to_string(),
            source,
        })
    }

    /// Load the users whose join time falls inside `window`.
    ///
    /// An entry whose timestamp is not an integer is skipped with a warning.
    pub async fn load_user_join_table(
        &self,
        bucket: &str,
        key: &str,
        window: &TimeWindow,
    ) -> Result<UserJoinTable, SideTableError> {
        let raw: HashMap<String, UserMeta> = self.fetch_json(bucket, key).await?;
        let total = raw.len();

        let mut skipped = 0usize;
        let entries: Vec<(Address, i64)> = raw
            .into_iter()
            .filter_map(|(address, meta)| match meta.timestamp.trim().parse::<i64>() {
                Ok(ts) => Some((Address::new(address), ts)),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        if skipped > 0 {
            warn!(key = %key, skipped, "Join entries without an integer timestamp skipped");
        }

        let table = UserJoinTable::from_entries(entries, window);
        info!(key = %key, users = total, new_users = table.len(), "Loaded user join table");
        Ok(table)
    }

    /// Load a price history and key it by day. Any bad date fails the load.
    pub async fn load_price_table(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<PriceTable, SideTableError> {
        let history: PriceHistory = self.fetch_json(bucket, key).await?;
        let table = PriceTable::from_history(&history).map_err(|source| SideTableError::Price {
            key: key.to_string(),
            source,
        })?;
        info!(key = %key, days = table.len(), "Loaded price history");
        Ok(table)
    }

    /// Load a `{ address: days }` table of precomputed days-to-ROI.
    pub async fn load_roi_days(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<HashMap<Address, i64>, SideTableError> {
        let raw: HashMap<String, i64> = self.fetch_json(bucket, key).await?;
        info!(key = %key, users = raw.len(), "Loaded ROI days");
        Ok(raw
            .into_iter()
            .map(|(address, days)| (Address::new(address), days))
            .collect())
    }
}
