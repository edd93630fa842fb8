//! Piecewise constant-product curve: flat middle band, steep tails.
//!
//! Swaps walk the fixed three-segment curve of [`math::piecewise`] built
//! from the configured `K`; the pool's normalized `X` balance is its position
//! on that curve. The first deposit mints the geometric mean of the
//! normalized amounts. Later deposits are strictly proportional, so they
//! carry no imbalance fee; the excess of the non-limiting asset is refunded.
//!
//! [`math::piecewise`]: crate::math::piecewise

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PiecewiseConfig;
use crate::domain::{
    Amount, DepositQuote, FeeSchedule, Liquidity, Reserves, Rounding, Side, WithdrawQuote,
};
use crate::error::AmmError;
use crate::math::piecewise::{
    add_liquidity_amounts, bootstrap_shares, remove_liquidity_amounts, swap_x_to_y, swap_y_to_x,
};
use crate::math::{BaseCurve, CheckedArithmetic, SegmentShape};
use crate::traits::{CurveSolver, FromConfig};

/// Fee schedule and the base-curve constants derived at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecewiseCurveParams {
    fees: FeeSchedule,
    base: BaseCurve,
}

impl PiecewiseCurveParams {
    /// Segment widths.
    #[must_use]
    pub const fn shape(&self) -> SegmentShape {
        self.base.shape
    }

    /// Base-curve constants `K`, `K2`, `Xa`, `Xb`, `m`, `n`. Every quote is
    /// priced from these.
    #[must_use]
    pub const fn base(&self) -> &BaseCurve {
        &self.base
    }
}

impl FromConfig<PiecewiseConfig> for PiecewiseCurveParams {
    fn from_config(config: &PiecewiseConfig, _now: u64) -> Result<Self, AmmError> {
        config.validate()?;
        let shape = config.shape()?;
        let base = BaseCurve::new(config.k(), &shape)?;
        Ok(Self {
            fees: config.fees(),
            base,
        })
    }
}

impl CurveSolver for PiecewiseCurveParams {
    fn fees(&self) -> FeeSchedule {
        self.fees
    }

    fn compute_swap_out(
        &self,
        reserves: &Reserves,
        side_in: Side,
        amount_in: Amount,
        _now: u64,
    ) -> Result<Amount, AmmError> {
        let side_out = side_in.other();
        if reserves.reserve(side_out).is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        let xp = reserves.normalized(Side::X)?;
        let yp = reserves.normalized(Side::Y)?;
        let input = amount_in.get().safe_mul(&reserves.multiplier(side_in))?;
        let out = match side_in {
            Side::X => swap_x_to_y(xp, yp, input, &self.base)?,
            Side::Y => swap_y_to_x(yp, xp, input, &self.base)?,
        };
        let gross = out.safe_div(&reserves.multiplier(side_out), Rounding::Down)?;
        debug!(?side_in, amount_in = amount_in.get(), gross, "piecewise swap quoted");
        Ok(Amount::new(gross))
    }

    fn compute_add_liquidity(
        &self,
        reserves: &Reserves,
        amount_x: Amount,
        amount_y: Amount,
        _now: u64,
    ) -> Result<DepositQuote, AmmError> {
        if reserves.supply.is_zero() {
            if amount_x.is_zero() || amount_y.is_zero() {
                return Err(AmmError::AddLiquidityInvalid(
                    "first deposit requires both assets",
                ));
            }
            let shares = bootstrap_shares(
                amount_x.get().safe_mul(&reserves.multiplier_x)?,
                amount_y.get().safe_mul(&reserves.multiplier_y)?,
            )?;
            debug!(shares, "piecewise pool bootstrapped");
            return Ok(DepositQuote {
                amount_x,
                amount_y,
                shares: Liquidity::new(shares),
                ..DepositQuote::default()
            });
        }

        let (x, y, shares) = add_liquidity_amounts(
            reserves.reserve_x.get(),
            reserves.reserve_y.get(),
            reserves.supply.get(),
            amount_x.get(),
            amount_y.get(),
        )?;
        if shares == 0 {
            return Ok(DepositQuote::refund_all(amount_x, amount_y));
        }
        let (x, y) = (Amount::new(x), Amount::new(y));
        debug!(x = x.get(), y = y.get(), shares, "piecewise deposit quoted");
        Ok(DepositQuote {
            amount_x: x,
            amount_y: y,
            refund_x: amount_x
                .checked_sub(&x)
                .ok_or(AmmError::Underflow("deposit: accepted above offered X"))?,
            refund_y: amount_y
                .checked_sub(&y)
                .ok_or(AmmError::Underflow("deposit: accepted above offered Y"))?,
            shares: Liquidity::new(shares),
            ..DepositQuote::default()
        })
    }

    fn compute_remove_liquidity(
        &self,
        reserves: &Reserves,
        shares: Liquidity,
    ) -> Result<WithdrawQuote, AmmError> {
        let (x, y) = remove_liquidity_amounts(
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

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    // -- helpers --------------------------------------------------------------

    fn params(fee: u64) -> PiecewiseCurveParams {
        params_with_k(fee, 1_000_000_000_000)
    }

    fn params_with_k(fee: u64, k: u128) -> PiecewiseCurveParams {
        let Ok(fees) = FeeSchedule::new(fee, 0) else {
            panic!("valid fees");
        };
        let Ok(cfg) = PiecewiseConfig::new(
            fees,
            k,
            BasisPoints::new(5_000),
            BasisPoints::new(20_000),
        ) else {
            panic!("valid config");
        };
        let Ok(p) = PiecewiseCurveParams::from_config(&cfg, 0) else {
            panic!("valid params");
        };
        p
    }

    fn reserves(x: u128, y: u128, supply: u128) -> Reserves {
        Reserves {
            reserve_x: Amount::new(x),
            reserve_y: Amount::new(y),
            multiplier_x: 1,
            multiplier_y: 1,
            supply: Liquidity::new(supply),
        }
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn base_constants_are_derived_once() {
        let p = params(0);
        assert_eq!(p.base().xa, 500_000);
        assert_eq!(p.base().xb, 2_000_000);
        assert_eq!(p.shape().w2(), BasisPoints::new(20_000));
    }

    // -- swaps ----------------------------------------------------------------

    #[test]
    fn middle_band_swap_matches_constant_product() {
        let p = params(0);
        let Ok(out) = p.compute_swap_out(
            &reserves(1_000_000, 1_000_000, 1_000_000),
            Side::X,
            Amount::new(10_000),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out, Amount::new(9_899));
    }

    #[test]
    fn configured_invariant_drives_quotes() {
        let r = reserves(1_000_000, 1_000_000, 1_000_000);
        let quote = |k: u128| {
            let Ok(out) = params_with_k(0, k).compute_swap_out(&r, Side::X, Amount::new(10_000), 0)
            else {
                panic!("expected Ok for K = {k}");
            };
            out
        };
        assert_eq!(quote(1_000_000_000_000), Amount::new(9_899));
        assert_eq!(quote(4_000_000_000_000), Amount::new(39_602));
    }

    #[test]
    fn deeper_input_side_quotes_less() {
        let p = params(0);
        let quote = |x: u128| {
            let Ok(out) =
                p.compute_swap_out(&reserves(x, 7_775_818, 1), Side::X, Amount::new(3_333_025), 0)
            else {
                panic!("expected Ok at x = {x}");
            };
            out
        };
        let (shallow, middle, deep) = (quote(400_000), quote(1_000_000), quote(3_000_000));
        assert_eq!(shallow, Amount::new(7_775_817));
        assert!(middle < shallow);
        assert!(deep < middle);
    }

    #[test]
    fn output_never_reaches_reserve() {
        let p = params(0);
        let r = reserves(1_000_000, 1_000_000, 1_000_000);
        let Ok(out) = p.compute_swap_out(&r, Side::Y, Amount::new(1_000_000_000_000), 0) else {
            panic!("expected Ok");
        };
        assert!(out < r.reserve_x);
    }

    #[test]
    fn swap_against_empty_side_fails() {
        let p = params(0);
        let Err(AmmError::InsufficientLiquidity) =
            p.compute_swap_out(&reserves(1_000, 0, 0), Side::X, Amount::new(10), 0)
        else {
            panic!("expected InsufficientLiquidity");
        };
    }

    // -- deposits -------------------------------------------------------------

    #[test]
    fn bootstrap_mints_geometric_mean() {
        let p = params(0);
        let Ok(q) = p.compute_add_liquidity(
            &reserves(0, 0, 0),
            Amount::new(1_000_000),
            Amount::new(1_000_000),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(q.shares, Liquidity::new(1_000_000));
        assert!(q.refund_x.is_zero() && q.refund_y.is_zero());
    }

    #[test]
    fn bootstrap_requires_both_assets() {
        let p = params(0);
        let Err(AmmError::AddLiquidityInvalid(_)) =
            p.compute_add_liquidity(&reserves(0, 0, 0), Amount::ZERO, Amount::new(5), 0)
        else {
            panic!("expected AddLiquidityInvalid");
        };
    }

    #[test]
    fn mismatched_ratio_refunds_excess() {
        let p = params(0);
        let Ok(q) = p.compute_add_liquidity(
            &reserves(1_000_000, 1_000_000, 1_000_000),
            Amount::new(100_000),
            Amount::new(300_000),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount_x, Amount::new(100_000));
        assert_eq!(q.amount_y, Amount::new(100_000));
        assert_eq!(q.refund_x, Amount::ZERO);
        assert_eq!(q.refund_y, Amount::new(200_000));
        assert_eq!(q.shares, Liquidity::new(100_000));
    }

    #[test]
    fn dust_deposit_is_noop() {
        let p = params(0);
        let Ok(q) = p.compute_add_liquidity(
            &reserves(1_000_000, 1_000_000, 10),
            Amount::new(1),
            Amount::new(1),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert!(q.is_noop());
        assert_eq!(q.refund_x, Amount::new(1));
        assert!(q.amount_x.is_zero());
    }

    // -- withdrawals ----------------------------------------------------------

    #[test]
    fn remove_everything_empties_pool() {
        let p = params(0);
        let Ok(q) =
            p.compute_remove_liquidity(&reserves(1_234, 5_678, 99), Liquidity::new(99))
        else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount_x, Amount::new(1_234));
        assert_eq!(q.amount_y, Amount::new(5_678));
    }
}
