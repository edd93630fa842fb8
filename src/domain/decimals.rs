//! Asset decimal places and precision multipliers.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Maximum allowed decimal places.
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of an asset's smallest unit.
///
/// Valid range is `0..=18`. Two-asset pools scale both reserves to the
/// larger of their two precisions before running the invariant math.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// let dai = Decimals::new(18).expect("18 is valid");
/// assert_eq!(usdc.multiplier_to(dai).expect("finer target"), 1_000_000_000_000);
/// assert_eq!(dai.multiplier_to(dai).expect("same"), 1);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum supported decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns the finer of two precisions.
    #[must_use]
    pub const fn finest(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }

    /// Factor that lifts an amount at this precision to `target` precision,
    /// i.e. `10^(target - self)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `target` is coarser than
    /// `self`.
    pub const fn multiplier_to(&self, target: Self) -> Result<u128, AmmError> {
        if target.0 < self.0 {
            return Err(AmmError::InvalidPrecision(
                "target precision is coarser than the asset precision",
            ));
        }
        Ok(10u128.pow((target.0 - self.0) as u32))
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
