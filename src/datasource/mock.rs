//! In-memory object store for testing without a filesystem or network.

use super::{ObjectStore, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock object store that serves predefined objects.
///
/// Tracks how many `get` calls are in flight so tests can check fan-out bounds.
#[derive(Debug, Clone, Default)]
pub struct MockObjectStore {
    buckets: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    failing_keys: HashMap<(String, String), StoreError>,
    key_delays: HashMap<String, Duration>,
    get_delay: Duration,
    list_error: Option<StoreError>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    get_count: Arc<AtomicUsize>,
}

impl MockObjectStore {
    /// Create a new mock store with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the store.
    pub fn with_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.buckets
            .entry(bucket.into())
            .or_default()
            .insert(key.into(), body.into());
        self
    }

    /// Make `get(bucket, key)` fail with `error`. The key is still listed.
    pub fn with_failing_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        error: StoreError,
    ) -> Self {
        let bucket = bucket.into();
        let key = key.into();
        self.buckets
            .entry(bucket.clone())
            .or_default()
            .insert(key.clone(), Vec::new());
        self.failing_keys.insert((bucket, key), error);
        self
    }

    /// Make every `list` call fail.
    pub fn with_list_error(mut self, error: StoreError) -> Self {
        self.list_error = Some(error);
        self
    }

    /// Delay applied to every `get`.
    pub fn with_get_delay(mut self, delay: Duration) -> Self {
        self.get_delay = delay;
        self
    }

    /// Delay applied to `get` of one key, overriding the global delay.
    pub fn with_key_delay(mut self, key: impl Into<String>, delay: Duration) -> Self {
        self.key_delays.insert(key.into(), delay);
        self
    }

    /// Highest number of concurrent `get` calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Number of `get` calls started.
    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn list(&self, bucket: &str) -> Result<Vec<String>, StoreError> {
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }
        Ok(self
            .buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(self.in_flight.clone());

        let delay = self.key_delays.get(key).copied().unwrap_or(self.get_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self
            .failing_keys
            .get(&(bucket.to_string(), key.to_string()))
        {
            return Err(err.clone());
        }

        self.buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}
