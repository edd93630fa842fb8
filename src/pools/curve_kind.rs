//! Enum dispatch over the curve families.
//!
//! [`CurveKind`] wraps every concrete [`CurveSolver`] so a pool record can
//! hold either curve with static dispatch. Each variant is gated behind its
//! feature.

use serde::{Deserialize, Serialize};

#[cfg(feature = "piecewise")]
use super::PiecewiseCurveParams;
#[cfg(feature = "stable")]
use super::StableCurveParams;
use crate::config::CurveTag;
use crate::domain::{Amount, DepositQuote, FeeSchedule, Liquidity, Reserves, Side, WithdrawQuote};
use crate::error::AmmError;
use crate::traits::CurveSolver;

/// Curve parameters of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    /// StableSwap with ramped amplification.
    #[cfg(feature = "stable")]
    Stable(StableCurveParams),

    /// Three-segment piecewise constant product.
    #[cfg(feature = "piecewise")]
    Piecewise(PiecewiseCurveParams),
}

/// Calls the same method on whichever curve is inside.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "stable")]
            CurveKind::Stable(c) => c.$method($($arg),*),
            #[cfg(feature = "piecewise")]
            CurveKind::Piecewise(c) => c.$method($($arg),*),
        }
    };
}

impl CurveKind {
    /// Curve family tag.
    #[must_use]
    pub const fn tag(&self) -> CurveTag {
        match self {
            #[cfg(feature = "stable")]
            Self::Stable(_) => CurveTag::Stable,
            #[cfg(feature = "piecewise")]
            Self::Piecewise(_) => CurveTag::Piecewise,
        }
    }

    /// The StableSwap parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for any other curve.
    #[cfg(feature = "stable")]
    #[allow(unreachable_patterns)]
    pub const fn as_stable(&self) -> Result<&StableCurveParams, AmmError> {
        match self {
            Self::Stable(params) => Ok(params),
            _ => Err(AmmError::InvalidConfiguration(
                "amplification only exists on stable pools",
            )),
        }
    }
}

impl CurveSolver for CurveKind {
    fn fees(&self) -> FeeSchedule {
        delegate!(self, fees())
    }

    fn compute_swap_out(
        &self,
        reserves: &Reserves,
        side_in: Side,
        amount_in: Amount,
        now: u64,
    ) -> Result<Amount, AmmError> {
        delegate!(self, compute_swap_out(reserves, side_in, amount_in, now))
    }

    fn compute_add_liquidity(
        &self,
        reserves: &Reserves,
        amount_x: Amount,
        amount_y: Amount,
        now: u64,
    ) -> Result<DepositQuote, AmmError> {
        delegate!(self, compute_add_liquidity(reserves, amount_x, amount_y, now))
    }

    fn compute_remove_liquidity(
        &self,
        reserves: &Reserves,
        shares: Liquidity,
    ) -> Result<WithdrawQuote, AmmError> {
        delegate!(self, compute_remove_liquidity(reserves, shares))
    }
}
