//! Domain primitives: Address, TimeWindow, day buckets.

use serde::{Deserialize, Serialize};

/// Wallet or contract address (hex string, compared verbatim).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Create an Address from a string.
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into())
    }

    /// Get the address as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address(s.to_string())
    }
}

/// Closed time window in Unix seconds. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

impl TimeWindow {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// True when `ts` is neither before `from` nor after `to`.
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.from && ts <= self.to
    }
}

/// Floor a Unix timestamp to the start of its UTC day.
pub fn day_bucket(ts: i64, seconds_per_day: i64) -> i64 {
    ts - ts.rem_euclid(seconds_per_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = TimeWindow::new(100, 200);
        assert!(window.contains(100));
        assert!(window.contains(200));
        assert!(window.contains(150));
        assert!(!window.contains(99));
        assert!(!window.contains(201));
    }

    #[test]
    fn test_day_bucket_floors_to_utc_midnight() {
        // 2023-11-14T22:13:20Z
        assert_eq!(day_bucket(1_700_000_000, 86_400), 1_699_920_000);
        assert_eq!(day_bucket(1_699_920_000, 86_400), 1_699_920_000);
        assert_eq!(day_bucket(-1, 86_400), -86_400);
    }

    #[test]
    fn test_address_display_and_serde() {
        let addr = Address::new("0x123abc");
        assert_eq!(addr.to_string(), "0x123abc");
        assert_eq!(serde_json::to_string(&addr).unwrap(), "\"0x123abc\"");
    }
}
