//! Pool share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A quantity of liquidity-provider shares.
///
/// Shares are kept apart from [`Amount`](super::Amount) because they
/// measure a claim on both reserves rather than a quantity of one asset.
/// A stable pool's first deposit mints exactly the invariant `D`; a
/// piecewise pool's first deposit mints the geometric mean of the two
/// normalized amounts.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::Liquidity;
///
/// let supply = Liquidity::new(4_000_000);
/// let burned = Liquidity::new(1_000_000);
/// assert_eq!(supply.checked_sub(&burned), Some(Liquidity::new(3_000_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u128` share count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
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
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
