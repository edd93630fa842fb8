//! Property-based tests using `proptest` for curve and accounting
//! invariants.
//!
//! 1. **Invariant symmetry and bounds**: `D(x, y) = D(y, x)`,
//!    `2·√(x·y) ≤ D ≤ x + y`, and `D` solves the invariant equation with
//!    `Ann = A·n`.
//! 2. **Swap monotonicity**: more input never yields less output; a
//!    deeper input reserve never yields more, on either curve.
//! 3. **Liquidity round trip**: add then remove returns no more than was
//!    deposited.
//! 4. **Invariant growth**: every accepted deposit grows `D`; removals
//!    shrink it pro rata.
//! 5. **Amplification bounds**: `A` stays between the ramp endpoints.
//! 6. **Piecewise solvency**: swap output stays below the reserve.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{PiecewiseCurveParams, StableCurveParams};
use crate::config::{PiecewiseConfig, StableConfig};
use crate::domain::{Amount, BasisPoints, FeeSchedule, Liquidity, Reserves, Side};
use crate::math::{A_PRECISION, U256, compute_d, current_amplification, isqrt};
use crate::traits::{CurveSolver, FromConfig};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn stable(amp: u128, fee: u64) -> StableCurveParams {
    let Ok(fees) = FeeSchedule::new(fee, 500_000) else {
        panic!("valid fees");
    };
    let Ok(cfg) = StableConfig::new(fees, amp) else {
        panic!("valid stable config");
    };
    let Ok(p) = StableCurveParams::from_config(&cfg, 0) else {
        panic!("valid stable params");
    };
    p
}

fn piecewise() -> PiecewiseCurveParams {
    let Ok(cfg) = PiecewiseConfig::new(
        FeeSchedule::default(),
        1_000_000_000_000,
        BasisPoints::new(5_000),
        BasisPoints::new(20_000),
    ) else {
        panic!("valid piecewise config");
    };
    let Ok(p) = PiecewiseCurveParams::from_config(&cfg, 0) else {
        panic!("valid piecewise params");
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

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..1_000_000_000_000
}

/// Second reserve as a percentage of the first, 10%..1000%.
fn ratio_strategy() -> impl Strategy<Value = u128> {
    10u128..1_000
}

fn amplification_strategy() -> impl Strategy<Value = u128> {
    1u128..5_000
}

// ---------------------------------------------------------------------------
// Property 1: Invariant symmetry and bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_d_symmetric_and_bounded(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        amp in amplification_strategy(),
    ) {
        let y = x * pct / 100;
        let precise = amp * A_PRECISION;
        let Ok(d_xy) = compute_d(x, y, precise) else {
            return Ok(());
        };
        let Ok(d_yx) = compute_d(y, x, precise) else {
            return Ok(());
        };
        prop_assert_eq!(d_xy, d_yx);

        let product = U256::from(x) * U256::from(y);
        let geometric = isqrt(product).low_u128() * 2;
        prop_assert!(d_xy <= x + y, "D={} above sum={}", d_xy, x + y);
        prop_assert!(
            d_xy + 1 >= geometric,
            "D={} below constant-product bound={}",
            d_xy, geometric
        );
    }

    #[test]
    fn prop_d_solves_invariant_equation(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        amp in amplification_strategy(),
    ) {
        let y = x * pct / 100;
        let Ok(d) = compute_d(x, y, amp * A_PRECISION) else {
            return Ok(());
        };
        let (xw, yw, dw) = (U256::from(x), U256::from(y), U256::from(d));
        let ann = U256::from(amp * 2);
        let four_p = U256::from(4u8) * xw * yw;
        let lhs = ann * (xw + yw) + dw;
        let rhs = ann * dw + dw * dw * dw / four_p;
        // |∂/∂D| is at most Ann + 3D²/(4P); allow two units of D plus the
        // truncation inside D_P
        let slope = ann + U256::from(3u8) * dw * dw / four_p + U256::one();
        let tolerance = slope * U256::from(4u8) + dw / xw + dw / yw + U256::from(8u8);
        let residual = if lhs > rhs { lhs - rhs } else { rhs - lhs };
        prop_assert!(
            residual <= tolerance,
            "D={} leaves residual {} above {}", d, residual, tolerance
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Swap monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stable_output_grows_with_input(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        amp in amplification_strategy(),
        per_mille in 1u128..100,
    ) {
        let y = x * pct / 100;
        let curve = stable(amp, 0);
        let r = reserves(x, y, x + y);
        let small = (x * per_mille / 1_000).max(1);
        let (Ok(out_small), Ok(out_large)) = (
            curve.compute_swap_out(&r, Side::X, Amount::new(small), 0),
            curve.compute_swap_out(&r, Side::X, Amount::new(small * 2), 0),
        ) else {
            return Ok(());
        };
        prop_assert!(out_small <= out_large);
        prop_assert!(out_large < r.reserve_y);
    }

    #[test]
    fn prop_stable_output_shrinks_with_input_reserve(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        amp in amplification_strategy(),
        per_mille in 1u128..100,
    ) {
        let y = x * pct / 100;
        let curve = stable(amp, 0);
        let input = Amount::new((x * per_mille / 1_000).max(1));
        let (Ok(shallow), Ok(deep)) = (
            curve.compute_swap_out(&reserves(x, y, 1), Side::X, input, 0),
            curve.compute_swap_out(&reserves(x * 2, y, 1), Side::X, input, 0),
        ) else {
            return Ok(());
        };
        prop_assert!(deep <= shallow, "deep={} shallow={}", deep, shallow);
    }

    #[test]
    fn prop_piecewise_output_grows_with_input(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        per_mille in 1u128..2_000,
    ) {
        let y = x * pct / 100;
        let curve = piecewise();
        let r = reserves(x, y, 1);
        let small = (x * per_mille / 1_000).max(1);
        let (Ok(out_small), Ok(out_large)) = (
            curve.compute_swap_out(&r, Side::X, Amount::new(small), 0),
            curve.compute_swap_out(&r, Side::X, Amount::new(small * 2), 0),
        ) else {
            return Ok(());
        };
        prop_assert!(out_small <= out_large);
    }

    #[test]
    fn prop_piecewise_output_shrinks_with_input_reserve(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        per_mille in 1u128..20_000,
    ) {
        let y = x * pct / 100;
        let curve = piecewise();
        let input = Amount::new((x * per_mille / 1_000).max(1));
        let (Ok(shallow), Ok(deep)) = (
            curve.compute_swap_out(&reserves(x, y, 1), Side::X, input, 0),
            curve.compute_swap_out(&reserves(x * 2, y, 1), Side::X, input, 0),
        ) else {
            return Ok(());
        };
        // one unit of slack for the floor/ceil at each end of the move
        prop_assert!(
            deep.get() <= shallow.get() + 1,
            "deep={} shallow={}", deep, shallow
        );

        let input = Amount::new((y * per_mille / 1_000).max(1));
        let (Ok(shallow), Ok(deep)) = (
            curve.compute_swap_out(&reserves(x, y, 1), Side::Y, input, 0),
            curve.compute_swap_out(&reserves(x, y * 2, 1), Side::Y, input, 0),
        ) else {
            return Ok(());
        };
        prop_assert!(deep <= shallow, "deep={} shallow={}", deep, shallow);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stable_round_trip_loses_value(
        r in reserve_strategy(),
        dx in 1_000u128..1_000_000_000,
        dy in 1_000u128..1_000_000_000,
        amp in amplification_strategy(),
    ) {
        let curve = stable(amp, 4_000);
        // balanced pool bootstrapped with D = 2r shares
        let before = reserves(r, r, 2 * r);
        let Ok(dep) = curve.compute_add_liquidity(&before, Amount::new(dx), Amount::new(dy), 0)
        else {
            return Ok(());
        };
        let after = reserves(
            r + dx - dep.admin_fee_x.get(),
            r + dy - dep.admin_fee_y.get(),
            2 * r + dep.shares.get(),
        );
        let Ok(back) = curve.compute_remove_liquidity(&after, dep.shares) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_x.get() + back.amount_y.get() <= dx + dy,
            "returned {}+{} > deposited {}+{}",
            back.amount_x.get(), back.amount_y.get(), dx, dy
        );
    }

    #[test]
    fn prop_piecewise_round_trip_loses_value(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        offer_x in 1_000u128..1_000_000_000,
        offer_y in 1_000u128..1_000_000_000,
    ) {
        let y = x * pct / 100;
        let curve = piecewise();
        let supply = x;
        let before = reserves(x, y, supply);
        let Ok(dep) = curve.compute_add_liquidity(
            &before,
            Amount::new(offer_x),
            Amount::new(offer_y),
            0,
        ) else {
            return Ok(());
        };
        if dep.is_noop() {
            return Ok(());
        }
        prop_assert_eq!(dep.amount_x.get() + dep.refund_x.get(), offer_x);
        prop_assert_eq!(dep.amount_y.get() + dep.refund_y.get(), offer_y);

        let after = reserves(
            x + dep.amount_x.get(),
            y + dep.amount_y.get(),
            supply + dep.shares.get(),
        );
        let Ok(back) = curve.compute_remove_liquidity(&after, dep.shares) else {
            return Ok(());
        };
        prop_assert!(back.amount_x <= dep.amount_x);
        prop_assert!(back.amount_y <= dep.amount_y);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Invariant growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_grows_d(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        dx in 0u128..1_000_000_000,
        dy in 0u128..1_000_000_000,
        amp in amplification_strategy(),
    ) {
        let y = x * pct / 100;
        let precise = amp * A_PRECISION;
        let curve = stable(amp, 4_000);
        let Ok(d0) = compute_d(x, y, precise) else {
            return Ok(());
        };
        let Ok(dep) = curve.compute_add_liquidity(
            &reserves(x, y, d0),
            Amount::new(dx),
            Amount::new(dy),
            0,
        ) else {
            return Ok(());
        };
        let Ok(d_after) = compute_d(
            x + dx - dep.admin_fee_x.get(),
            y + dy - dep.admin_fee_y.get(),
            precise,
        ) else {
            return Ok(());
        };
        prop_assert!(d_after > d0, "D did not grow: {} -> {}", d0, d_after);
    }

    #[test]
    fn prop_remove_shrinks_d_pro_rata(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        burn_pct in 1u128..100,
        amp in amplification_strategy(),
    ) {
        let y = x * pct / 100;
        let precise = amp * A_PRECISION;
        let curve = stable(amp, 0);
        let Ok(d0) = compute_d(x, y, precise) else {
            return Ok(());
        };
        let burn = d0 * burn_pct / 100;
        let Ok(out) = curve.compute_remove_liquidity(&reserves(x, y, d0), Liquidity::new(burn))
        else {
            return Ok(());
        };
        let Ok(d1) = compute_d(x - out.amount_x.get(), y - out.amount_y.get(), precise) else {
            return Ok(());
        };
        prop_assert!(d1 <= d0);
        let expected = d0 * (d0 - burn);
        let actual = d1 * d0;
        // truncation of both payouts plus solver noise
        let tolerance = 8 * d0;
        prop_assert!(
            actual.abs_diff(expected) <= tolerance,
            "D after removal {} not pro rata of {}", d1, d0
        );
    }
}

// ---------------------------------------------------------------------------
// Property 5: Amplification bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_amplification_within_endpoints(
        a0 in 1u128..1_000_000,
        a1 in 1u128..1_000_000,
        t0 in 0u64..1_000_000,
        window in 1u64..10_000_000,
        offset in 0u64..20_000_000,
    ) {
        let t1 = t0 + window;
        let now = t0.saturating_sub(5_000_000) + offset;
        let Ok(a) = current_amplification(a0, a1, t0, t1, now) else {
            return Err(TestCaseError::fail("interpolation failed"));
        };
        if now <= t0 {
            prop_assert_eq!(a, a0);
        } else if now >= t1 {
            prop_assert_eq!(a, a1);
        } else {
            prop_assert!(a >= a0.min(a1) && a <= a0.max(a1));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Piecewise solvency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_piecewise_output_below_reserve(
        x in reserve_strategy(),
        pct in ratio_strategy(),
        input in 1u128..1_000_000_000_000_000,
        sell_x in any::<bool>(),
    ) {
        let y = x * pct / 100;
        let curve = piecewise();
        let r = reserves(x, y, 1);
        let side = if sell_x { Side::X } else { Side::Y };
        let Ok(out) = curve.compute_swap_out(&r, side, Amount::new(input), 0) else {
            return Ok(());
        };
        prop_assert!(out < r.reserve(side.other()));
    }
}
