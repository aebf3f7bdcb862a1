use crate::config::EconomyConfig;
use crate::domain::{Address, Transfer, UserTransactionVolume};
use std::collections::HashSet;

/// Whole-unit volume per contract category. Transfers through any other
/// contract are ignored.
pub fn transaction_volume(transfers: &[Transfer], economy: &EconomyConfig) -> UserTransactionVolume {
    let mut volume = UserTransactionVolume::default();
    for transfer in transfers {
        let units = transfer.whole_units(economy.token_unit_scale);
        if economy.is_rent(&transfer.contract_address) {
            volume.renter_transaction_volume += units;
        } else if economy.is_investment(&transfer.contract_address) {
            volume.purchaser_transaction_volume += units;
        } else if economy.is_withdraw(&transfer.contract_address) {
            volume.withdrawer_transaction_volume += units;
        }
    }
    volume
}

/// Every address that sent or received at least one transfer.
pub fn active_users(transfers: &[Transfer]) -> HashSet<&Address> {
    transfers
        .iter()
        .flat_map(|t| [&t.from_address, &t.to_address])
        .collect()
}

/// Scaled value of every transfer `address` sent or received.
pub fn user_transaction_volume(address: &Address, transfers: &[Transfer], unit_scale: f64) -> f64 {
    let raw: f64 = transfers
        .iter()
        .filter(|t| t.from_address == *address || t.to_address == *address)
        .map(|t| t.value)
        .sum();
    raw / unit_scale
}
