//! Configuration for piecewise constant-product pools.

use serde::{Deserialize, Serialize};

use crate::domain::{BasisPoints, FeeSchedule};
use crate::error::AmmError;
use crate::math::{BaseCurve, SegmentShape};

/// Blueprint of a piecewise pool.
///
/// `k` is the target invariant of the middle segment in normalized units;
/// `w1` and `w2` place the segment joins at `w1·√k` and `w2·√k` on the
/// `X` axis. The middle band `[w1, w2]` trades like a constant-product pool;
/// beyond it slippage grows faster.
///
/// # Validation
///
/// - `0 < w1 < 10_000 bp < w2 ≤ MAX_WIDTH`.
/// - `k` large enough that `w1·√k ≥ 1`.
/// - Fee rates within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecewiseConfig {
    fees: FeeSchedule,
    k: u128,
    w1: BasisPoints,
    w2: BasisPoints,
}

impl PiecewiseConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any parameter is out of
    /// range.
    pub fn new(
        fees: FeeSchedule,
        k: u128,
        w1: BasisPoints,
        w2: BasisPoints,
    ) -> Result<Self, AmmError> {
        let config = Self { fees, k, w1, w2 };
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
        let shape = self.shape()?;
        BaseCurve::new(self.k, &shape)?;
        Ok(())
    }

    /// Fee schedule.
    #[must_use]
    pub const fn fees(&self) -> FeeSchedule {
        self.fees
    }

    /// Target invariant.
    #[must_use]
    pub const fn k(&self) -> u128 {
        self.k
    }

    /// Validated segment widths.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for out-of-range widths.
    pub const fn shape(&self) -> Result<SegmentShape, AmmError> {
        SegmentShape::new(self.w1, self.w2)
    }
}
