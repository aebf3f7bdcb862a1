//! Payer-type classification of senders.

use crate::config::EconomyConfig;
use crate::domain::{Address, PayerType, Transfer};
use std::collections::{BTreeMap, HashMap};

/// Group transfers by sender address.
pub fn group_by_sender(transfers: &[Transfer]) -> HashMap<&Address, Vec<&Transfer>> {
    let mut grouped: HashMap<&Address, Vec<&Transfer>> = HashMap::new();
    for transfer in transfers {
        grouped
            .entry(&transfer.from_address)
            .or_default()
            .push(transfer);
    }
    grouped
}

/// Classify one sender from its outgoing transfers.
///
/// Sums are per-day normalized (value / seconds per day). Investing must be
/// strictly greater than renting to classify as Purchaser.
pub fn classify_payer(transfers: &[&Transfer], economy: &EconomyConfig) -> PayerType {
    let seconds_per_day = economy.seconds_per_day as f64;
    let mut investing = 0.0;
    let mut renting = 0.0;
    for transfer in transfers {
        if economy.is_investment(&transfer.contract_address) {
            investing += transfer.value / seconds_per_day;
        } else if economy.is_rent(&transfer.contract_address) {
            renting += transfer.value / seconds_per_day;
        }
    }

    if investing > renting {
        PayerType::Purchaser
    } else {
        PayerType::Renter
    }
}

/// Classify every sender in `grouped`.
pub fn classify_payers(
    grouped: &HashMap<&Address, Vec<&Transfer>>,
    economy: &EconomyConfig,
) -> BTreeMap<Address, PayerType> {
    grouped
        .iter()
        .map(|(&sender, transfers)| (sender.clone(), classify_payer(transfers, economy)))
        .collect()
}

/// Group by sender and classify in one step.
pub fn classify_senders(
    transfers: &[Transfer],
    economy: &EconomyConfig,
) -> BTreeMap<Address, PayerType> {
    classify_payers(&group_by_sender(transfers), economy)
}
