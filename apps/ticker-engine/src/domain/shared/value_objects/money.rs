//! Money value object for cash balances and share prices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::Shares;

/// A monetary amount in hundredths of the display currency.
///
/// The whole engine works in integer hundredths: a stored value of `100`
/// displays as `$1.00`. Keeping the representation integral makes every
/// price movement, trade cost, and dividend payout exact. All arithmetic
/// saturates at the `i64` range, so a balance near the limit pins there
/// rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a Money value from hundredths (cents).
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the raw value in hundredths.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Get the absolute value. Saturates at `i64::MAX`.
    #[must_use]
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.saturating_neg())
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

/// Price times share count gives a cash amount.
///
/// A price of `100` hundredths ($1.00) times 500 shares is `50_000`
/// hundredths ($500.00). The product is computed in 128 bits and saturates
/// at the `i64` range, so an absurd share count can never wrap into a
/// negative cost; a saturated buy cost simply fails the affordability check.
impl Mul<Shares> for Money {
    type Output = Self;

    fn mul(self, rhs: Shares) -> Self::Output {
        let product = i128::from(self.0) * i128::from(rhs.count());
        Self(i64::try_from(product).unwrap_or(if product < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_from_cents_and_display() {
        let m = Money::from_cents(15050);
        assert_eq!(m.as_cents(), 15050);
        assert_eq!(format!("{m}"), "$150.50");
    }

    #[test]
    fn money_display_pads_cents() {
        assert_eq!(format!("{}", Money::from_cents(100)), "$1.00");
        assert_eq!(format!("{}", Money::from_cents(105)), "$1.05");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{}", Money::from_cents(500_000)), "$5000.00");
    }

    #[test]
    fn money_display_negative() {
        assert_eq!(format!("{}", Money::from_cents(-250)), "-$2.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-$0.05");
    }

    #[test]
    fn money_zero() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert_eq!(Money::default(), Money::ZERO);
    }

    #[test]
    fn money_positive_negative() {
        let pos = Money::from_cents(100);
        let neg = Money::from_cents(-50);

        assert!(pos.is_positive());
        assert!(!pos.is_negative());

        assert!(!neg.is_positive());
        assert!(neg.is_negative());
    }

    #[test]
    fn money_abs() {
        assert_eq!(Money::from_cents(-100).abs(), Money::from_cents(100));
        assert_eq!(Money::from_cents(50).abs(), Money::from_cents(50));
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::from_cents(10_000);
        let b = Money::from_cents(5_000);

        assert_eq!(a + b, Money::from_cents(15_000));
        assert_eq!(a - b, Money::from_cents(5_000));
        assert_eq!(-a, Money::from_cents(-10_000));
    }

    #[test]
    fn money_assign_ops() {
        let mut m = Money::from_cents(1_000);
        m += Money::from_cents(250);
        assert_eq!(m, Money::from_cents(1_250));
        m -= Money::from_cents(2_000);
        assert_eq!(m, Money::from_cents(-750));
    }

    #[test]
    fn money_multiply_scalar() {
        assert_eq!(Money::from_cents(100) * 3, Money::from_cents(300));
    }

    #[test]
    fn money_multiply_shares_is_trade_cost() {
        let price = Money::from_cents(100);
        let cost = price * Shares::from_count(500);
        assert_eq!(cost, Money::from_cents(50_000));
        assert_eq!(format!("{cost}"), "$500.00");
    }

    #[test]
    fn money_arithmetic_saturates_at_the_limits() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);
        assert_eq!(-min, max);
        assert_eq!(max * 2, max);

        let mut credit = max;
        credit += Money::from_cents(100);
        assert_eq!(credit, max);

        let mut debit = min;
        debit -= Money::from_cents(100);
        assert_eq!(debit, min);
    }

    #[test]
    fn money_multiply_shares_saturates_instead_of_wrapping() {
        let price = Money::from_cents(100);
        assert_eq!(price * Shares::from_count(u64::MAX), Money::from_cents(i64::MAX));
        assert_eq!(
            Money::from_cents(-100) * Shares::from_count(u64::MAX),
            Money::from_cents(i64::MIN)
        );
    }

    #[test]
    fn money_ordering() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(200);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn money_serde_is_transparent() {
        let m = Money::from_cents(12345);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12345");

        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}
