use crate::config::{Config, EconomyConfig};
use crate::datasource::ObjectStore;
use crate::domain::{EconomyReport, TimeWindow, Transfer};
use crate::engine;
use crate::error::AppError;
use crate::orchestration::catalog::list_window;
use crate::orchestration::fetch::{ChunkedFetcher, FetchOptions};
use crate::orchestration::side_tables::{SideTableLoader, SideTables};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Runs one batch over a fixed window: select, load side tables, fetch, aggregate.
#[derive(Debug, Clone)]
pub struct Analyzer {
    store: Arc<dyn ObjectStore>,
    config: Config,
}

impl Analyzer {
    pub fn new(store: Arc<dyn ObjectStore>, config: Config) -> Self {
        Self { store, config }
    }

    pub async fn run(&self) -> Result<EconomyReport, AppError> {
        let buckets = &self.config.buckets;
        let window = self.config.window;

        let keys = list_window(self.store.as_ref(), &buckets.transfer_bucket, &window)
            .await
            .map_err(|source| AppError::Listing {
                bucket: buckets.transfer_bucket.clone(),
                source,
            })?;

        let tables = self.load_side_tables(&window).await?;

        let fetcher = ChunkedFetcher::new(
            self.store.clone(),
            FetchOptions {
                concurrency: self.config.fetch_concurrency,
                pause: self.config.fetch_pause,
            },
        );
        let transfers = fetcher
            .fetch_transfers(
                &buckets.transfer_bucket,
                &keys,
                &self.config.economy.game_token_address,
            )
            .await?;

        let report = build_report(window, keys.len(), &transfers, &tables, &self.config.economy);
        info!(
            objects = report.object_count,
            transfers = report.transfer_count,
            new_users = report.user_roi_details.len(),
            profitable_rate = ?report.overall_profitable_rate,
            "Run complete"
        );
        Ok(report)
    }

    async fn load_side_tables(&self, window: &TimeWindow) -> Result<SideTables, AppError> {
        let buckets = &self.config.buckets;
        let loader = SideTableLoader::new(self.store.clone());

        let new_users = loader
            .load_user_join_table(&buckets.user_bucket, &buckets.user_join_key, window)
            .await?;
        let prices = loader
            .load_price_table(&buckets.price_bucket, &buckets.price_history_key)
            .await?;
        let roi_days = match &buckets.roi_days_key {
            Some(key) => loader.load_roi_days(&buckets.user_bucket, key).await?,
            None => HashMap::new(),
        };

        Ok(SideTables {
            new_users,
            prices,
            roi_days,
        })
    }
}

/// Run every reducer over the merged transfer set.
pub fn build_report(
    window: TimeWindow,
    object_count: usize,
    transfers: &[Transfer],
    tables: &SideTables,
    economy: &EconomyConfig,
) -> EconomyReport {
    let profit =
        engine::compute_new_user_profit(transfers, &tables.new_users, &tables.prices, economy);

    EconomyReport {
        window,
        object_count,
        transfer_count: transfers.len(),
        active_user_count: engine::active_users(transfers).len(),
        user_roi_details: profit.user_roi_details,
        overall_profitable_rate: profit.overall_profitable_rate,
        unpriced_spend_count: profit.unpriced_spend_count,
        transaction_volume: engine::transaction_volume(transfers, economy),
        payer_types: engine::classify_senders(transfers, economy),
        spending_distribution: engine::spending_distribution(transfers, economy),
        roi_day_distribution: engine::roi_day_distribution(&tables.roi_days),
    }
}
