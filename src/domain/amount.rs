//! Raw asset amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Rounding;

/// A raw asset amount in the asset's smallest unit.
///
/// `Amount` never interprets decimals. Pools normalize amounts to a common
/// precision with per-asset multipliers before handing them to a curve
/// solver (see [`Decimals::multiplier_to`](super::Decimals::multiplier_to)).
///
/// Arithmetic methods are checked and return `None` on overflow, underflow
/// or division by zero.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::{Amount, Rounding};
///
/// let reserve = Amount::new(1_000_000);
/// let fee = Amount::new(400);
/// assert_eq!(reserve.checked_sub(&fee), Some(Amount::new(999_600)));
/// assert_eq!(reserve.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(333_334)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with an explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match crate::math::div_round(self.0, divisor.0, rounding) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Absolute difference between two amounts.
    pub const fn abs_diff(&self, other: &Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }

    /// The smaller of two amounts.
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
