//! Pricing abstraction shared by every curve family.
//!
//! [`CurveSolver`] turns a [`Reserves`] snapshot plus a request into a
//! priced outcome without touching any state. The pool contract owns all
//! mutation: it asks the active curve for a quote, moves balances through
//! the ledger, and only then commits.
//!
//! # Rounding Contract
//!
//! Every output a solver returns rounds against the trader:
//!
//! ```text
//! gross_out = (curve(before) − curve(after) − 1) / multiplier_out
//! shares    = floor(...)
//! ```
//!
//! so that reserves never drop below what the invariant requires.

use crate::domain::{Amount, DepositQuote, FeeSchedule, Liquidity, Reserves, Side, WithdrawQuote};
use crate::error::AmmError;

/// A two-asset bonding curve.
///
/// # Implementors
///
/// - `StableCurveParams`: StableSwap with ramped amplification
/// - `PiecewiseCurveParams`: three-segment constant product
///
/// # Errors
///
/// Common variants:
///
/// - [`AmmError::InsufficientLiquidity`]: the output side is empty
/// - [`AmmError::Overflow`]: arithmetic overflow during calculation
/// - [`AmmError::IterateEnd`]: an iterative solver did not converge
pub trait CurveSolver {
    /// Fee schedule applied on top of the curve.
    fn fees(&self) -> FeeSchedule;

    /// Gross output (before the trading fee) for `amount_in` of `side_in`,
    /// in raw units of the other asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if the output reserve is zero.
    /// - Solver errors propagated from the curve math.
    fn compute_swap_out(
        &self,
        reserves: &Reserves,
        side_in: Side,
        amount_in: Amount,
        now: u64,
    ) -> Result<Amount, AmmError>;

    /// Accepted amounts, admin fees, refunds and minted shares for a
    /// deposit of `amount_x` and `amount_y`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AddLiquidityInvalid`] if the first deposit is one-sided.
    /// - [`AmmError::InvalidDerivation`] if the deposit would not grow the
    ///   invariant.
    fn compute_add_liquidity(
        &self,
        reserves: &Reserves,
        amount_x: Amount,
        amount_y: Amount,
        now: u64,
    ) -> Result<DepositQuote, AmmError>;

    /// Pro-rata payout for burning `shares`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if `shares` exceeds the
    /// outstanding supply.
    fn compute_remove_liquidity(
        &self,
        reserves: &Reserves,
        shares: Liquidity,
    ) -> Result<WithdrawQuote, AmmError> {
        let (x, y) = crate::math::pro_rata(
            reserves.reserve_x.get(),
            reserves.reserve_y.get(),
            reserves.supply.get(),
            shares.get(),
        )?;
        Ok(WithdrawQuote {
            amount_x: Amount::new(x),
            amount_y: Amount::new(y),
            shares,
        })
    }
}
