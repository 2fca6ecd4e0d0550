//! Share count value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A non-negative number of shares of one instrument.
///
/// Ordinary trades move share counts in whole lots; corporate actions may
/// double a count (split) or wipe it to zero (delisting), which are the only
/// paths that bypass the lot rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u64);

impl Shares {
    /// Zero shares.
    pub const ZERO: Self = Self(0);

    /// Create a share count.
    #[must_use]
    pub const fn from_count(count: u64) -> Self {
        Self(count)
    }

    /// Get the raw count.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.0
    }

    /// Returns true if the count is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the count is a whole number of lots.
    ///
    /// A zero lot size never matches; configuration validation rejects it
    /// before a game starts.
    #[must_use]
    pub const fn is_whole_lots(&self, lot_size: u64) -> bool {
        lot_size > 0 && self.0 % lot_size == 0
    }

    /// The count after a split doubles it. Saturates at `u64::MAX`.
    #[must_use]
    pub const fn doubled(&self) -> Self {
        Self(self.0.saturating_mul(2))
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Shares {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Saturating subtraction: selling can never drive a holding below zero,
/// the trade validator rejects the request first.
impl Sub for Shares {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Shares {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Shares {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl From<u64> for Shares {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Shares> for u64 {
    fn from(value: Shares) -> Self {
        value.0
    }
}
