//! Network time.
//!
//! Deadlines on the wire are milliseconds since the network's nemesis block,
//! not since the unix epoch. Mixing the two up gives you a transaction that
//! expired fifty years ago.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds elapsed since a network epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct NetworkTimestamp(u64);

impl NetworkTimestamp {
    /// Wrap a raw millisecond count.
    pub const fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Raw millisecond count.
    pub fn timestamp(&self) -> u64 {
        self.0
    }

    /// `true` for the epoch itself.
    pub fn is_epochal(&self) -> bool {
        self.0 == 0
    }

    /// Later by `count` milliseconds. Saturates instead of wrapping.
    pub fn add_milliseconds(&self, count: u64) -> Self {
        Self(self.0.saturating_add(count))
    }

    /// Later by `count` seconds.
    pub fn add_seconds(&self, count: u64) -> Self {
        self.add_milliseconds(count.saturating_mul(1_000))
    }

    /// Later by `count` minutes.
    pub fn add_minutes(&self, count: u64) -> Self {
        self.add_seconds(count.saturating_mul(60))
    }

    /// Later by `count` hours.
    pub fn add_hours(&self, count: u64) -> Self {
        self.add_minutes(count.saturating_mul(60))
    }
}

impl fmt::Display for NetworkTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochal_only_at_zero() {
        assert!(NetworkTimestamp::new(0).is_epochal());
        assert!(!NetworkTimestamp::new(1).is_epochal());
    }

    #[test]
    fn adds_units() {
        let base = NetworkTimestamp::new(100);
        assert_eq!(base.add_milliseconds(5).timestamp(), 105);
        assert_eq!(base.add_seconds(2).timestamp(), 2_100);
        assert_eq!(base.add_minutes(1).timestamp(), 60_100);
        assert_eq!(base.add_hours(2).timestamp(), 7_200_100);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        assert_eq!(NetworkTimestamp::new(u64::MAX).add_seconds(1).timestamp(), u64::MAX);
    }
}
