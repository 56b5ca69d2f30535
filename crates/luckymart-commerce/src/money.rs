//! Currency amounts.
//!
//! The storefront prices everything in whole won. Amounts are integers at
//! rest; fractional values only exist transiently inside the pricing engine
//! and are rounded once when converted back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An amount in won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Won(u64);

impl Won {
    pub const ZERO: Won = Won(0);

    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Round a fractional amount to the nearest won (half up).
    ///
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_rounded(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::ZERO;
        }
        Self(amount.round() as u64)
    }

    pub fn amount(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Multiply by a quantity, `None` on overflow.
    pub fn checked_times(&self, quantity: u32) -> Option<Won> {
        self.0.checked_mul(u64::from(quantity)).map(Won)
    }

    /// Take `fraction` off and round: `round(amount * (1 - fraction))`.
    pub fn discounted(&self, fraction: f64) -> Won {
        Won::from_rounded(self.as_f64() * (1.0 - fraction))
    }
}

impl Add for Won {
    type Output = Won;

    fn add(self, other: Won) -> Won {
        Won(self.0.saturating_add(other.0))
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Won {
        iter.fold(Won::ZERO, |acc, w| acc + w)
    }
}

impl From<u64> for Won {
    fn from(amount: u64) -> Self {
        Won(amount)
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", self.0)
    }
}
