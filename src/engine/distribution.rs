//! Spending and ROI-day distributions.

use crate::config::EconomyConfig;
use crate::domain::{Address, Transfer, ValueFrequencyPercentage};
use std::collections::{BTreeMap, HashMap};

/// Whole-unit outgoing value per sender, skipping game wallets.
///
/// Each transfer is truncated to whole units before it is summed.
pub fn per_user_spending(
    transfers: &[Transfer],
    economy: &EconomyConfig,
) -> HashMap<Address, i64> {
    let mut spending: HashMap<Address, i64> = HashMap::new();
    for transfer in transfers {
        if economy.is_game_wallet(&transfer.from_address) {
            continue;
        }
        *spending.entry(transfer.from_address.clone()).or_insert(0) +=
            transfer.whole_units(economy.token_unit_scale);
    }
    spending
}

/// Bucket identical values and express each bucket as a fraction of all values.
///
/// Output is sorted ascending by value; empty input gives an empty distribution.
pub fn value_distribution<I>(values: I) -> Vec<ValueFrequencyPercentage>
where
    I: IntoIterator<Item = i64>,
{
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    let mut total = 0u64;
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
        total += 1;
    }

    counts
        .into_iter()
        .map(|(value, count)| ValueFrequencyPercentage {
            value,
            frequency_percentage: count as f64 / total as f64,
        })
        .collect()
}

pub fn spending_distribution(
    transfers: &[Transfer],
    economy: &EconomyConfig,
) -> Vec<ValueFrequencyPercentage> {
    value_distribution(per_user_spending(transfers, economy).into_values())
}

/// Distribution of days-to-ROI. Users under one day have not reached ROI and
/// are left out of both the buckets and the total.
pub fn roi_day_distribution(per_user_roi_days: &HashMap<Address, i64>) -> Vec<ValueFrequencyPercentage> {
    value_distribution(per_user_roi_days.values().copied().filter(|&days| days >= 1))
}
