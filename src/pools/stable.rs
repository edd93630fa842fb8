//! StableSwap curve for pegged pairs (Curve style, n = 2).
//!
//! # Invariant
//!
//! ```text
//! A·n·(x + y) + D = A·n·D + D^(n+1) / (n^n · x · y)
//! ```
//!
//! solved by [`compute_d`] and [`compute_y`] on balances normalized to a
//! common precision. `A` is stored as `A·n^(n−1)` of the textbook form, so
//! for two assets the textbook coefficient is `A / 2`. `A` interpolates
//! linearly between `initial_a` and `future_a` over the ramp window (see
//! [`ramp`](super::ramp)); the solvers see the interpolation at
//! `A_PRECISION` resolution.
//!
//! # Swap
//!
//! 1. `x_new = xp_in + amount_in · multiplier_in`.
//! 2. `y_new = compute_y(x_new)` at the current `A`.
//! 3. `gross_out = (yp_out − y_new − 1) / multiplier_out`.
//!
//! The trading fee is taken from `gross_out` by the pool.
//!
//! # Deposits
//!
//! Unbalanced deposits pay the imbalance fee `fee · n / (4·(n − 1))` on the
//! distance between each new balance and its ideal proportional value.
//!
//! | A | Curve |
//! |---|-------|
//! | 1 | close to constant product |
//! | 50–2 000 | flat near the peg |
//! | → MAX_A | constant sum |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StableConfig;
use crate::domain::{
    Amount, DepositQuote, FeeSchedule, Liquidity, Reserves, Rounding, Side, apply_rate,
};
use crate::error::AmmError;
use crate::math::{
    A_PRECISION, CheckedArithmetic, compute_d, compute_y, current_amplification, mul_div,
};
use crate::traits::{CurveSolver, FromConfig};

/// Fee schedule and amplification ramp of a StableSwap pool.
///
/// `A` values are whole units (`0 < A < MAX_A`); solvers receive
/// `A · A_PRECISION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableCurveParams {
    pub(super) fees: FeeSchedule,
    pub(super) initial_a: u128,
    pub(super) future_a: u128,
    pub(super) initial_a_time: u64,
    pub(super) future_a_time: u64,
}

impl StableCurveParams {
    /// Fee schedule.
    #[must_use]
    pub const fn fee_schedule(&self) -> FeeSchedule {
        self.fees
    }

    /// `A` at the start of the current ramp.
    #[must_use]
    pub const fn initial_a(&self) -> u128 {
        self.initial_a
    }

    /// `A` at the end of the current ramp.
    #[must_use]
    pub const fn future_a(&self) -> u128 {
        self.future_a
    }

    /// Start of the current ramp, in seconds.
    #[must_use]
    pub const fn initial_a_time(&self) -> u64 {
        self.initial_a_time
    }

    /// End of the current ramp, in seconds.
    #[must_use]
    pub const fn future_a_time(&self) -> u64 {
        self.future_a_time
    }

    /// `A` at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only for corrupted ramp values.
    pub fn amplification(&self, now: u64) -> Result<u128, AmmError> {
        current_amplification(
            self.initial_a,
            self.future_a,
            self.initial_a_time,
            self.future_a_time,
            now,
        )
    }

    /// `A · A_PRECISION` at `now`, the value the solvers take.
    ///
    /// Interpolates between the scaled endpoints, so mid-ramp it keeps the
    /// fractional part that [`amplification`](Self::amplification) drops.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only for corrupted ramp values.
    pub fn precise_amplification(&self, now: u64) -> Result<u128, AmmError> {
        current_amplification(
            self.initial_a.safe_mul(&A_PRECISION)?,
            self.future_a.safe_mul(&A_PRECISION)?,
            self.initial_a_time,
            self.future_a_time,
            now,
        )
    }
}

impl FromConfig<StableConfig> for StableCurveParams {
    /// Starts with a frozen ramp at the configured `A`.
    fn from_config(config: &StableConfig, now: u64) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            fees: config.fees(),
            initial_a: config.amplification(),
            future_a: config.amplification(),
            initial_a_time: now,
            future_a_time: now,
        })
    }
}

/// Normalized `(xp, yp)` of a snapshot.
fn normalized(reserves: &Reserves) -> Result<(u128, u128), AmmError> {
    Ok((reserves.normalized(Side::X)?, reserves.normalized(Side::Y)?))
}

impl CurveSolver for StableCurveParams {
    fn fees(&self) -> FeeSchedule {
        self.fees
    }

    fn compute_swap_out(
        &self,
        reserves: &Reserves,
        side_in: Side,
        amount_in: Amount,
        now: u64,
    ) -> Result<Amount, AmmError> {
        let side_out = side_in.other();
        if reserves.reserve(side_out).is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        let amp = self.precise_amplification(now)?;
        let (xp, yp) = normalized(reserves)?;
        let (balance_in, balance_out) = match side_in {
            Side::X => (xp, yp),
            Side::Y => (yp, xp),
        };

        let dx = amount_in.get().safe_mul(&reserves.multiplier(side_in))?;
        let x_new = balance_in.safe_add(&dx)?;
        let y_new = compute_y(side_out, x_new, xp, yp, amp)?;

        // one unit kept back against rounding in the solver
        let dy = balance_out.saturating_sub(y_new).saturating_sub(1);
        let gross = dy.safe_div(&reserves.multiplier(side_out), Rounding::Down)?;
        debug!(?side_in, amount_in = amount_in.get(), gross, "stable swap quoted");
        Ok(Amount::new(gross))
    }

    fn compute_add_liquidity(
        &self,
        reserves: &Reserves,
        amount_x: Amount,
        amount_y: Amount,
        now: u64,
    ) -> Result<DepositQuote, AmmError> {
        let amp = self.precise_amplification(now)?;
        let bootstrap = reserves.supply.is_zero();
        if bootstrap && (amount_x.is_zero() || amount_y.is_zero()) {
            return Err(AmmError::AddLiquidityInvalid(
                "first deposit requires both assets",
            ));
        }

        let d0 = if bootstrap {
            0
        } else {
            let (xp, yp) = normalized(reserves)?;
            compute_d(xp, yp, amp)?
        };

        let old_x = reserves.reserve_x.get();
        let old_y = reserves.reserve_y.get();
        let new_x = old_x.safe_add(&amount_x.get())?;
        let new_y = old_y.safe_add(&amount_y.get())?;
        let d1 = compute_d(
            new_x.safe_mul(&reserves.multiplier_x)?,
            new_y.safe_mul(&reserves.multiplier_y)?,
            amp,
        )?;
        if d1 <= d0 {
            return Err(AmmError::InvalidDerivation("deposit does not grow D"));
        }

        if bootstrap {
            debug!(d1, "stable pool bootstrapped");
            return Ok(DepositQuote {
                amount_x,
                amount_y,
                shares: Liquidity::new(d1),
                ..DepositQuote::default()
            });
        }

        let rate = self.fees.imbalance_fee();
        let fee_x = imbalance_charge(d0, d1, old_x, new_x, rate)?;
        let fee_y = imbalance_charge(d0, d1, old_y, new_y, rate)?;
        let admin_fee_x = self.fees.admin_share(fee_x)?;
        let admin_fee_y = self.fees.admin_share(fee_y)?;

        let d2 = compute_d(
            new_x
                .safe_sub(&fee_x.get())?
                .safe_mul(&reserves.multiplier_x)?,
            new_y
                .safe_sub(&fee_y.get())?
                .safe_mul(&reserves.multiplier_y)?,
            amp,
        )?;
        if d2 <= d0 {
            return Err(AmmError::InvalidDerivation("imbalance fee consumes deposit"));
        }
        let shares = mul_div(reserves.supply.get(), d2 - d0, d0, Rounding::Down)?;
        debug!(d0, d1, d2, shares, "stable deposit quoted");

        Ok(DepositQuote {
            amount_x,
            amount_y,
            admin_fee_x,
            admin_fee_y,
            shares: Liquidity::new(shares),
            ..DepositQuote::default()
        })
    }
}

/// `rate` applied to the distance between `new` and `d1 · old / d0`.
fn imbalance_charge(
    d0: u128,
    d1: u128,
    old: u128,
    new: u128,
    rate: u64,
) -> Result<Amount, AmmError> {
    let ideal = mul_div(d1, old, d0, Rounding::Down)?;
    apply_rate(Amount::new(ideal.abs_diff(new)), rate)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- helpers --------------------------------------------------------------

    fn params(amp: u128, fee: u64, admin_fee: u64) -> StableCurveParams {
        let Ok(fees) = FeeSchedule::new(fee, admin_fee) else {
            panic!("valid fees");
        };
        let Ok(cfg) = StableConfig::new(fees, amp) else {
            panic!("valid config");
        };
        let Ok(p) = StableCurveParams::from_config(&cfg, 0) else {
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

    // -- FromConfig -----------------------------------------------------------

    #[test]
    fn from_config_freezes_ramp() {
        let p = params(100, 0, 0);
        assert_eq!(p.initial_a(), 100);
        assert_eq!(p.future_a(), 100);
        assert_eq!(p.amplification(1_000_000), Ok(100));
        assert_eq!(p.precise_amplification(0), Ok(10_000));
    }

    #[test]
    fn precise_amplification_keeps_sub_unit_steps() {
        let p = StableCurveParams {
            initial_a: 100,
            future_a: 101,
            initial_a_time: 0,
            future_a_time: 100,
            ..params(100, 0, 0)
        };
        assert_eq!(p.amplification(50), Ok(100));
        assert_eq!(p.precise_amplification(50), Ok(10_050));
        assert_eq!(p.precise_amplification(99), Ok(10_099));
        assert_eq!(p.precise_amplification(100), Ok(10_100));

        let down = StableCurveParams {
            initial_a: 101,
            future_a: 100,
            ..p
        };
        assert_eq!(down.precise_amplification(25), Ok(10_075));
    }

    // -- swap -----------------------------------------------------------------

    #[test]
    fn swap_near_peg_is_almost_one_to_one() {
        let p = params(100, 0, 0);
        let Ok(out) = p.compute_swap_out(
            &reserves(2_000_000, 2_000_000, 4_000_000),
            Side::X,
            Amount::new(10_000),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert!(out.get() < 10_000);
        assert!(out.get() > 9_990);
    }

    #[test]
    fn swap_is_symmetric_at_peg() {
        let p = params(200, 0, 0);
        let r = reserves(1_000_000, 1_000_000, 2_000_000);
        let Ok(a) = p.compute_swap_out(&r, Side::X, Amount::new(50_000), 0) else {
            panic!("expected Ok");
        };
        let Ok(b) = p.compute_swap_out(&r, Side::Y, Amount::new(50_000), 0) else {
            panic!("expected Ok");
        };
        assert_eq!(a, b);
    }

    #[test]
    fn swap_against_empty_side_fails() {
        let p = params(100, 0, 0);
        let Err(AmmError::InsufficientLiquidity) =
            p.compute_swap_out(&reserves(1_000, 0, 0), Side::X, Amount::new(10), 0)
        else {
            panic!("expected InsufficientLiquidity");
        };
    }

    #[test]
    fn swap_respects_multipliers() {
        let p = params(100, 0, 0);
        // X has 3 fewer decimals than Y
        let r = Reserves {
            multiplier_x: 1_000,
            ..reserves(2_000, 2_000_000, 4_000_000)
        };
        let Ok(out) = p.compute_swap_out(&r, Side::X, Amount::new(10), 0) else {
            panic!("expected Ok");
        };
        assert!(out.get() > 9_990 && out.get() < 10_000);
        let Ok(back) = p.compute_swap_out(&r, Side::Y, Amount::new(10_000), 0) else {
            panic!("expected Ok");
        };
        assert_eq!(back, Amount::new(9));
    }

    #[test]
    fn higher_amplification_means_less_slippage() {
        let r = reserves(1_000_000, 1_000_000, 2_000_000);
        let Ok(low) = params(1, 0, 0).compute_swap_out(&r, Side::X, Amount::new(200_000), 0) else {
            panic!("expected Ok");
        };
        let Ok(high) = params(1_000, 0, 0).compute_swap_out(&r, Side::X, Amount::new(200_000), 0)
        else {
            panic!("expected Ok");
        };
        assert!(high > low);
    }

    // -- deposits -------------------------------------------------------------

    #[test]
    fn bootstrap_mints_d1() {
        let p = params(100, 4_000, 0);
        let Ok(q) = p.compute_add_liquidity(
            &reserves(0, 0, 0),
            Amount::new(2_000_000),
            Amount::new(2_000_000),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(q.shares, Liquidity::new(4_000_000));
        assert!(q.refund_x.is_zero() && q.refund_y.is_zero());
        assert!(q.admin_fee_x.is_zero() && q.admin_fee_y.is_zero());
    }

    #[test]
    fn bootstrap_requires_both_assets() {
        let p = params(100, 0, 0);
        let Err(AmmError::AddLiquidityInvalid(_)) =
            p.compute_add_liquidity(&reserves(0, 0, 0), Amount::new(1_000), Amount::ZERO, 0)
        else {
            panic!("expected AddLiquidityInvalid");
        };
    }

    #[test]
    fn balanced_deposit_pays_no_fee() {
        let p = params(100, 4_000, 500_000);
        let Ok(q) = p.compute_add_liquidity(
            &reserves(2_000_000, 2_000_000, 4_000_000),
            Amount::new(2_000_000),
            Amount::new(2_000_000),
            0,
        ) else {
            panic!("expected Ok");
        };
        assert!(q.admin_fee_x.is_zero() && q.admin_fee_y.is_zero());
        assert_eq!(q.shares, Liquidity::new(4_000_000));
    }

    #[test]
    fn one_sided_deposit_pays_imbalance_fee() {
        let p = params(100, 4_000, 1_000_000);
        let Ok(q) = p.compute_add_liquidity(
            &reserves(2_000_000, 2_000_000, 4_000_000),
            Amount::new(1_000_000),
            Amount::ZERO,
            0,
        ) else {
            panic!("expected Ok");
        };
        assert!(!q.admin_fee_x.is_zero());
        assert!(!q.admin_fee_y.is_zero());
        // fewer shares than a fee-free deposit of the same value
        assert!(q.shares.get() < 1_000_000);
        assert!(q.shares.get() > 900_000);
    }

    #[test]
    fn empty_deposit_into_funded_pool_is_invalid_derivation() {
        let p = params(100, 0, 0);
        let Err(AmmError::InvalidDerivation(_)) = p.compute_add_liquidity(
            &reserves(1_000, 1_000, 2_000),
            Amount::ZERO,
            Amount::ZERO,
            0,
        ) else {
            panic!("expected InvalidDerivation");
        };
    }

    // -- withdrawals ----------------------------------------------------------

    #[test]
    fn remove_is_pro_rata() {
        let p = params(100, 0, 0);
        let Ok(q) = p.compute_remove_liquidity(&reserves(3_000, 1_500, 3_000), Liquidity::new(1_000))
        else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount_x, Amount::new(1_000));
        assert_eq!(q.amount_y, Amount::new(500));
    }

    #[test]
    fn remove_more_than_supply_fails() {
        let p = params(100, 0, 0);
        let Err(AmmError::InsufficientLiquidity) =
            p.compute_remove_liquidity(&reserves(3_000, 1_500, 3_000), Liquidity::new(3_001))
        else {
            panic!("expected InsufficientLiquidity");
        };
    }
}
