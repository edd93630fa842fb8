//! Configuration for StableSwap pools.

use serde::{Deserialize, Serialize};

use crate::domain::FeeSchedule;
use crate::error::AmmError;

/// Exclusive upper bound of the amplification coefficient `A`.
pub const MAX_A: u128 = 1_000_000;

/// Blueprint of a StableSwap pool.
///
/// # Amplification
///
/// `A` is given in whole units; the pool scales it by
/// [`A_PRECISION`](crate::math::A_PRECISION) internally. Valid values are
/// `0 < A < MAX_A`; pegged pairs typically use 50–2 000.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::config::StableConfig;
/// use dualcurve_amm::domain::FeeSchedule;
///
/// let fees = FeeSchedule::new(400, 5_000_000 / 10).expect("valid rates");
/// let cfg = StableConfig::new(fees, 100).expect("valid amplification");
/// assert_eq!(cfg.amplification(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableConfig {
    fees: FeeSchedule,
    amplification: u128,
}

impl StableConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for an out-of-range fee.
    /// - [`AmmError::AValueViolation`] if `amplification` is zero or not
    ///   below [`MAX_A`].
    pub fn new(fees: FeeSchedule, amplification: u128) -> Result<Self, AmmError> {
        let config = Self {
            fees,
            amplification,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fees.validate()?;
        if self.amplification == 0 || self.amplification >= MAX_A {
            return Err(AmmError::AValueViolation(
                "amplification must satisfy 0 < A < MAX_A",
            ));
        }
        Ok(())
    }

    /// Fee schedule.
    #[must_use]
    pub const fn fees(&self) -> FeeSchedule {
        self.fees
    }

    /// Initial amplification `A`.
    #[must_use]
    pub const fn amplification(&self) -> u128 {
        self.amplification
    }
}
