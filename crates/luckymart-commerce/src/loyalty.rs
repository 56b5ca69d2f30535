//! Loyalty points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Running loyalty point balance. Only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct LoyaltyPoints(u64);

impl LoyaltyPoints {
    pub fn new(points: u64) -> Self {
        Self(points)
    }

    pub fn balance(&self) -> u64 {
        self.0
    }

    /// Add `delta` points, returning the new balance.
    pub fn accrue(&mut self, delta: u64) -> u64 {
        self.0 = self.0.saturating_add(delta);
        self.0
    }
}

impl fmt::Display for LoyaltyPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(포인트: {})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrue_accumulates() {
        let mut points = LoyaltyPoints::default();
        assert_eq!(points.accrue(10), 10);
        assert_eq!(points.accrue(0), 10);
        assert_eq!(points.accrue(90), 100);
        assert_eq!(points.to_string(), "(포인트: 100)");
    }

    #[test]
    fn test_accrue_saturates() {
        let mut points = LoyaltyPoints::new(u64::MAX - 1);
        assert_eq!(points.accrue(5), u64::MAX);
    }
}
