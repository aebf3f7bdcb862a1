//! Chunked, bounded-concurrency fetch of daily log objects.

use crate::datasource::{decode_transfers, ObjectStore, StoreError};
use crate::domain::{Address, Transfer};
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {bucket}/{key}: {source}")]
    Object {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Number of chunks, and so the maximum number of requests in flight.
    pub concurrency: usize,
    /// Sleep before every request of a worker.
    pub pause: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            pause: Duration::from_secs(1),
        }
    }
}

/// Split `keys` into exactly `concurrency` contiguous chunks of
/// `ceil(len / concurrency)` keys. Trailing chunks may be short or empty.
pub fn partition_chunks(keys: &[String], concurrency: usize) -> Vec<&[String]> {
    let concurrency = concurrency.max(1);
    let chunk_size = keys.len().div_ceil(concurrency);
    (0..concurrency)
        .map(|idx| {
            let start = (idx * chunk_size).min(keys.len());
            let end = (start + chunk_size).min(keys.len());
            &keys[start..end]
        })
        .collect()
}

/// Fetches and decodes log objects with one sequential worker per chunk.
#[derive(Debug, Clone)]
pub struct ChunkedFetcher {
    store: Arc<dyn ObjectStore>,
    options: FetchOptions,
}

impl ChunkedFetcher {
    pub fn new(store: Arc<dyn ObjectStore>, options: FetchOptions) -> Self {
        Self { store, options }
    }

    /// Fetch every key and merge the decoded transfers in no particular order.
    ///
    /// The first failing request aborts the whole fetch: sibling workers are
    /// dropped mid-request and no partial result is returned.
    pub async fn fetch_transfers(
        &self,
        bucket: &str,
        keys: &[String],
        game_token: &Address,
    ) -> Result<Vec<Transfer>, FetchError> {
        let chunks = partition_chunks(keys, self.options.concurrency);
        info!(
            bucket = %bucket,
            objects = keys.len(),
            workers = chunks.len(),
            "Fetching log objects"
        );

        let workers = chunks
            .into_iter()
            .enumerate()
            .map(|(idx, chunk)| self.fetch_chunk(idx, bucket, chunk, game_token));
        let per_chunk = try_join_all(workers).await?;

        Ok(per_chunk.into_iter().flatten().collect())
    }

    async fn fetch_chunk(
        &self,
        idx: usize,
        bucket: &str,
        chunk: &[String],
        game_token: &Address,
    ) -> Result<Vec<Transfer>, FetchError> {
        debug!(chunk = idx, size = chunk.len(), "Starting chunk");
        let mut transfers = Vec::new();
        for key in chunk {
            if !self.options.pause.is_zero() {
                tokio::time::sleep(self.options.pause).await;
            }
            let body = self
                .store
                .get(bucket, key)
                .await
                .map_err(|source| FetchError::Object {
                    bucket: bucket.to_string(),
                    key: key.clone(),
                    source,
                })?;
            let decoded = decode_transfers(&body, game_token);
            debug!(key = %key, transfers = decoded.len(), "Decoded log object");
            transfers.extend(decoded);
        }
        debug!(chunk = idx, transfers = transfers.len(), "Finished chunk");
        Ok(transfers)
    }
}
