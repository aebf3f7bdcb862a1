//! Selection of daily log objects by the timestamp in their key.

use crate::datasource::{ObjectStore, StoreError};
use crate::domain::TimeWindow;
use std::num::ParseIntError;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
#[error("key {key:?} has no numeric timestamp prefix: {source}")]
pub struct KeyTimestampError {
    pub key: String,
    #[source]
    pub source: ParseIntError,
}

/// Parse the Unix timestamp before the first `-` of a `<timestamp>-<suffix>` key.
pub fn key_timestamp(key: &str) -> Result<i64, KeyTimestampError> {
    let prefix = key.split('-').next().unwrap_or(key);
    prefix.parse::<i64>().map_err(|source| KeyTimestampError {
        key: key.to_string(),
        source,
    })
}

/// Keep the keys whose timestamp lies inside `window`, in listing order.
///
/// Keys without a timestamp prefix are skipped.
pub fn select_keys<I>(keys: I, window: &TimeWindow) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    keys.into_iter()
        .filter(|key| match key_timestamp(key) {
            Ok(ts) => window.contains(ts),
            Err(e) => {
                debug!(error = %e, "Skipping object");
                false
            }
        })
        .collect()
}

/// List `bucket` and select the objects partitioned inside `window`.
pub async fn list_window(
    store: &dyn ObjectStore,
    bucket: &str,
    window: &TimeWindow,
) -> Result<Vec<String>, StoreError> {
    let listed = store.list(bucket).await?;
    let total = listed.len();
    let selected = select_keys(listed, window);
    info!(
        bucket = %bucket,
        listed = total,
        selected = selected.len(),
        from = window.from,
        to = window.to,
        "Selected log objects"
    );
    Ok(selected)
}
