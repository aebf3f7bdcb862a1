//! New-user profit and ROI accumulation.

use crate::config::EconomyConfig;
use crate::domain::{Address, PriceTable, Transfer, UserJoinTable, UserRoiDetail};
use std::collections::BTreeMap;
use tracing::warn;

/// Result of folding every transfer into the new-user accumulators.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitSummary {
    /// One entry per new user touched by at least one transfer, sorted by address.
    pub user_roi_details: Vec<UserRoiDetail>,
    /// Share of accumulated users with positive profit; `None` when there are none.
    pub overall_profitable_rate: Option<f64>,
    /// Outgoing transfers valued at zero because the sender's join day had no price.
    pub unpriced_spend_count: usize,
}

/// Folds transfers into per-user spending/profit.
///
/// Outgoing value is converted with the price of the sender's join day and
/// counted as spending; incoming value is credited at face token quantity
/// with no price conversion. The two sides are therefore in different units,
/// and that asymmetry is kept as is.
pub struct ProfitAccumulator<'a> {
    new_users: &'a UserJoinTable,
    prices: &'a PriceTable,
    economy: &'a EconomyConfig,
    per_user: BTreeMap<Address, UserRoiDetail>,
    unpriced_spend_count: usize,
}

impl<'a> ProfitAccumulator<'a> {
    pub fn new(
        new_users: &'a UserJoinTable,
        prices: &'a PriceTable,
        economy: &'a EconomyConfig,
    ) -> Self {
        Self {
            new_users,
            prices,
            economy,
            per_user: BTreeMap::new(),
            unpriced_spend_count: 0,
        }
    }

    /// Fold one transfer. Order of calls does not matter.
    pub fn process_transfer(&mut self, transfer: &Transfer) {
        if let Some(joined_at) = self.new_users.joined_at(&transfer.from_address) {
            let price = match self
                .prices
                .price_on_day_of(joined_at, self.economy.seconds_per_day)
            {
                Some(price) => price,
                None => {
                    self.unpriced_spend_count += 1;
                    0.0
                }
            };
            let spent = transfer.scaled_value(self.economy.token_unit_scale) * price;
            let detail = self.entry(&transfer.from_address, joined_at);
            detail.total_spending += spent;
            detail.total_profit -= spent;
        }

        if let Some(joined_at) = self.new_users.joined_at(&transfer.to_address) {
            let received = transfer.scaled_value(self.economy.token_unit_scale);
            self.entry(&transfer.to_address, joined_at).total_profit += received;
        }
    }

    fn entry(&mut self, address: &Address, joined_at: i64) -> &mut UserRoiDetail {
        self.per_user
            .entry(address.clone())
            .or_insert_with(|| UserRoiDetail::new(address.clone(), joined_at))
    }

    pub fn finish(self) -> ProfitSummary {
        if self.unpriced_spend_count > 0 {
            warn!(
                count = self.unpriced_spend_count,
                "Outgoing new-user transfers valued at zero: no price for join day"
            );
        }

        let user_roi_details: Vec<UserRoiDetail> = self.per_user.into_values().collect();
        let profitable = user_roi_details.iter().filter(|d| d.is_profitable()).count();
        let overall_profitable_rate = if user_roi_details.is_empty() {
            None
        } else {
            Some(profitable as f64 / user_roi_details.len() as f64)
        };

        ProfitSummary {
            user_roi_details,
            overall_profitable_rate,
            unpriced_spend_count: self.unpriced_spend_count,
        }
    }
}

/// Compute new-user profit/ROI over a whole transfer set.
pub fn compute_new_user_profit(
    transfers: &[Transfer],
    new_users: &UserJoinTable,
    prices: &PriceTable,
    economy: &EconomyConfig,
) -> ProfitSummary {
    let mut acc = ProfitAccumulator::new(new_users, prices, economy);
    for transfer in transfers {
        acc.process_transfer(transfer);
    }
    acc.finish()
}
