//! Output types produced by the aggregation engine.

use crate::domain::{Address, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running profit and spending of one new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoiDetail {
    pub user_address: Address,
    pub join_date_timestamp: i64,
    /// Price-converted value the user sent out.
    pub total_spending: f64,
    /// Net value flow: incoming token quantity minus price-converted spending.
    pub total_profit: f64,
}

impl UserRoiDetail {
    pub fn new(user_address: Address, join_date_timestamp: i64) -> Self {
        Self {
            user_address,
            join_date_timestamp,
            total_spending: 0.0,
            total_profit: 0.0,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.total_profit > 0.0
    }
}

/// A value bucket and the fraction of users that fell into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueFrequencyPercentage {
    pub value: i64,
    pub frequency_percentage: f64,
}

/// Unit-scaled transfer volume per game contract category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTransactionVolume {
    pub renter_transaction_volume: i64,
    pub purchaser_transaction_volume: i64,
    pub withdrawer_transaction_volume: i64,
}

/// How a paying user spends: mostly buying assets, or mostly renting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayerType {
    Purchaser,
    Renter,
}

impl std::fmt::Display for PayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayerType::Purchaser => write!(f, "purchaser"),
            PayerType::Renter => write!(f, "renter"),
        }
    }
}

/// Everything one analyzer run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyReport {
    pub window: TimeWindow,
    pub object_count: usize,
    pub transfer_count: usize,
    pub active_user_count: usize,
    /// Sorted by address.
    pub user_roi_details: Vec<UserRoiDetail>,
    /// `None` when no new user was touched by any transfer.
    pub overall_profitable_rate: Option<f64>,
    /// Outgoing new-user transfers whose join day had no price.
    pub unpriced_spend_count: usize,
    pub transaction_volume: UserTransactionVolume,
    pub payer_types: BTreeMap<Address, PayerType>,
    pub spending_distribution: Vec<ValueFrequencyPercentage>,
    pub roi_day_distribution: Vec<ValueFrequencyPercentage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payer_type_serialization() {
        assert_eq!(
            serde_json::to_string(&PayerType::Purchaser).unwrap(),
            "\"purchaser\""
        );
        assert_eq!(PayerType::Renter.to_string(), "renter");
    }

    #[test]
    fn test_user_roi_detail_profitable_is_strict() {
        let mut detail = UserRoiDetail::new(Address::new("0xa"), 0);
        assert!(!detail.is_profitable());
        detail.total_profit = 0.1;
        assert!(detail.is_profitable());
    }

    #[test]
    fn test_undefined_rate_serializes_as_null() {
        let report = EconomyReport {
            window: TimeWindow::new(0, 1),
            object_count: 0,
            transfer_count: 0,
            active_user_count: 0,
            user_roi_details: vec![],
            overall_profitable_rate: None,
            unpriced_spend_count: 0,
            transaction_volume: UserTransactionVolume::default(),
            payer_types: BTreeMap::new(),
            spending_distribution: vec![],
            roi_day_distribution: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["overallProfitableRate"].is_null());
        assert_eq!(json["transactionVolume"]["renterTransactionVolume"], 0);
    }
}
