//! Basis-point ratios.

use core::fmt;

use serde::{Deserialize, Serialize};

/// `10_000` basis points, i.e. a ratio of one.
pub const BPS: u128 = 10_000;

/// A ratio expressed in basis points (`10_000` bp = 1.0).
///
/// Unlike a percentage, values above `10_000` are meaningful: the piecewise
/// curve places its right-hand segment boundary at `w2 > 1.0` times the base
/// curve's square-root scale.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::BasisPoints;
///
/// let w1 = BasisPoints::new(5_000);
/// let w2 = BasisPoints::new(20_000);
/// assert!(w1.is_below_one());
/// assert!(w2.is_above_one());
/// assert_eq!(w1.apply_to(1_000), Some(500));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// A ratio of exactly one.
    pub const ONE: Self = Self(10_000);

    /// Wraps a raw `u32` basis-point value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the value widened to `u128`.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        self.0 as u128
    }

    /// `true` when strictly between zero and one.
    #[must_use]
    pub const fn is_below_one(&self) -> bool {
        self.0 > 0 && (self.0 as u128) < BPS
    }

    /// `true` when strictly above one.
    #[must_use]
    pub const fn is_above_one(&self) -> bool {
        (self.0 as u128) > BPS
    }

    /// `value · self / 10_000`, truncating. `None` on overflow.
    #[must_use]
    pub const fn apply_to(&self, value: u128) -> Option<u128> {
        match value.checked_mul(self.0 as u128) {
            Some(v) => Some(v / BPS),
            None => None,
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_is_neither_below_nor_above() {
        assert!(!BasisPoints::ONE.is_below_one());
        assert!(!BasisPoints::ONE.is_above_one());
    }

    #[test]
    fn zero_is_not_below_one() {
        assert!(!BasisPoints::ZERO.is_below_one());
    }

    #[test]
    fn apply_truncates() {
        assert_eq!(BasisPoints::new(3_333).apply_to(10), Some(3));
        assert_eq!(BasisPoints::new(25_000).apply_to(4), Some(10));
    }

    #[test]
    fn apply_overflow() {
        assert_eq!(BasisPoints::new(2).apply_to(u128::MAX), None);
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(30).to_string(), "30bp");
    }
}
