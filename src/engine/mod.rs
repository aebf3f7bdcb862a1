//! Pure aggregation reducers over a transfer multiset.
//!
//! Every reducer is single-pass and insensitive to transfer order, so the
//! unordered output of the fetch stage can be fed in directly.

pub mod distribution;
pub mod payer;
pub mod profit;
pub mod volume;

pub use distribution::{
    per_user_spending, roi_day_distribution, spending_distribution, value_distribution,
};
pub use payer::{classify_payer, classify_payers, classify_senders, group_by_sender};
pub use profit::{compute_new_user_profit, ProfitAccumulator, ProfitSummary};
pub use volume::{active_users, transaction_volume, user_transaction_volume};
