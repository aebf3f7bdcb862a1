//! Transfer type representing a single decoded token-movement event.

use crate::domain::Address;
use serde::{Deserialize, Serialize};

/// A single token transfer decoded from a daily log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Token contract the transfer moved.
    pub token_address: Address,
    /// Sender.
    pub from_address: Address,
    /// Receiver.
    pub to_address: Address,
    /// Raw amount in token units (not yet divided by the unit scale).
    pub value: f64,
    pub transaction_hash: String,
    pub log_index: i64,
    pub block_number: i64,
    /// Event time in Unix seconds.
    pub timestamp: i64,
    /// Game contract the transfer was routed through.
    pub contract_address: Address,
}

impl Transfer {
    /// Amount divided by the token unit scale.
    pub fn scaled_value(&self, unit_scale: f64) -> f64 {
        self.value / unit_scale
    }

    /// Scaled amount truncated toward zero.
    pub fn whole_units(&self, unit_scale: f64) -> i64 {
        (self.value / unit_scale) as i64
    }
}
