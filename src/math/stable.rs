//! StableSwap invariant solver for two assets.
//!
//! # Invariant (n = 2)
//!
//! ```text
//! Ann · S + D = Ann · D + D^(n+1) / (n^n · P),    Ann = A · n
//! ```
//!
//! where `S = x + y`, `P = x · y` and `x`, `y` are the balances normalized to
//! a common precision. `A` follows the Curve convention of storing
//! `A_textbook · n^(n−1)`, which turns the textbook `A · n^n` into `A · n`;
//! with two assets the textbook coefficient is `A / 2`.
//!
//! The amplification enters every function here as the *precise* value
//! `amp = A · A_PRECISION`; callers interpolating a ramp do so on precise
//! values so sub-unit steps are not lost.
//!
//! Both solvers run Newton-Raphson on `U256` intermediates with truncating
//! division, stop once two successive iterates differ by at most one unit and
//! give up after [`MAX_ITERATIONS`] steps with [`AmmError::IterateEnd`].
//!
//! # Amplification behaviour
//!
//! | A | Curve |
//! |---|-------|
//! | 1 | close to constant product |
//! | 50–5 000 | flat near the peg, curving out at the edges |
//! | → ∞ | constant sum |

use tracing::{debug, warn};

use super::{CheckedArithmetic, U256, narrow_u128};
use crate::domain::{Rounding, Side};
use crate::error::AmmError;

/// Number of assets in a pool.
pub const N_COINS: u128 = 2;

/// Fixed-point scale of the amplification coefficient.
pub const A_PRECISION: u128 = 100;

/// Newton-Raphson iteration cap.
pub const MAX_ITERATIONS: u32 = 255;

/// Convergence threshold between successive iterates.
const CONVERGENCE_THRESHOLD: u128 = 1;

/// Amplification at `now` for a ramp from `initial_a` at `initial_a_time`
/// to `future_a` at `future_a_time`.
///
/// Before the window the result is `initial_a`, at or after `future_a_time`
/// it is `future_a`, and in between it moves linearly with truncating
/// division. A frozen ramp (`initial_a_time == future_a_time`) always yields
/// `future_a` once `now` reaches it.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if `|future_a − initial_a| · elapsed`
/// overflows.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::math::current_amplification;
///
/// // Ramp from 100 to 200 over [1_000, 2_000].
/// assert_eq!(current_amplification(100, 200, 1_000, 2_000, 500), Ok(100));
/// assert_eq!(current_amplification(100, 200, 1_000, 2_000, 1_500), Ok(150));
/// assert_eq!(current_amplification(100, 200, 1_000, 2_000, 9_999), Ok(200));
/// ```
pub fn current_amplification(
    initial_a: u128,
    future_a: u128,
    initial_a_time: u64,
    future_a_time: u64,
    now: u64,
) -> Result<u128, AmmError> {
    if now >= future_a_time {
        return Ok(future_a);
    }
    if now <= initial_a_time {
        return Ok(initial_a);
    }
    // initial_a_time < now < future_a_time, so the window is non-empty
    let elapsed = u128::from(now - initial_a_time);
    let window = u128::from(future_a_time - initial_a_time);
    let step = initial_a
        .abs_diff(future_a)
        .checked_mul(elapsed)
        .ok_or(AmmError::Overflow("A: ramp delta overflow"))?
        / window;
    if future_a > initial_a {
        initial_a.safe_add(&step)
    } else {
        initial_a.safe_sub(&step)
    }
}

/// Computes the invariant `D` of normalized balances `xp`, `yp` at precise
/// amplification `amp`.
///
/// Iterates from `D = xp + yp`:
///
/// ```text
/// D_P    = D / (n·xp) · D / (n·yp) · D
/// D_next = (Ann·S/A_PRECISION + n·D_P) · D
///          / ((Ann − A_PRECISION)·D/A_PRECISION + (n+1)·D_P)
/// ```
///
/// with `Ann = amp · n`. An empty pool (`S = 0`) has `D = 0`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if exactly one balance is zero.
/// - [`AmmError::Overflow`] on overflow, including a `D` beyond `u128`.
/// - [`AmmError::Underflow`] if `amp · n < A_PRECISION`.
/// - [`AmmError::IterateEnd`] if the iteration does not converge.
pub fn compute_d(xp: u128, yp: u128, amp: u128) -> Result<u128, AmmError> {
    let n = U256::from(N_COINS);
    let a_precision = U256::from(A_PRECISION);
    let x = U256::from(xp);
    let y = U256::from(yp);

    let s = x.safe_add(&y)?;
    if s.is_zero() {
        return Ok(0);
    }

    let ann = U256::from(amp)
        .checked_mul(n)
        .ok_or(AmmError::Overflow("D: A·n overflow"))?;
    let ann_minus_precision = ann
        .checked_sub(a_precision)
        .ok_or(AmmError::Underflow("D: amplification below A_PRECISION / n"))?;
    let nx = x.safe_mul(&n)?;
    let ny = y.safe_mul(&n)?;
    let ann_s = ann
        .checked_mul(s)
        .ok_or(AmmError::Overflow("D: ann·S overflow"))?
        .safe_div(&a_precision, Rounding::Down)?;

    let mut d = s;
    for iteration in 0..MAX_ITERATIONS {
        let mut d_p = d;
        d_p = d_p
            .checked_mul(d)
            .ok_or(AmmError::Overflow("D: d_p·d overflow"))?
            .safe_div(&nx, Rounding::Down)?;
        d_p = d_p
            .checked_mul(d)
            .ok_or(AmmError::Overflow("D: d_p·d overflow"))?
            .safe_div(&ny, Rounding::Down)?;

        let d_prev = d;

        let numerator = ann_s
            .checked_add(
                d_p.checked_mul(n)
                    .ok_or(AmmError::Overflow("D: n·D_P overflow"))?,
            )
            .ok_or(AmmError::Overflow("D: numerator sum overflow"))?
            .checked_mul(d)
            .ok_or(AmmError::Overflow("D: numerator overflow"))?;

        let denominator = ann_minus_precision
            .checked_mul(d)
            .ok_or(AmmError::Overflow("D: denominator left overflow"))?
            .safe_div(&a_precision, Rounding::Down)?
            .checked_add(
                n.safe_add(&U256::one())?
                    .checked_mul(d_p)
                    .ok_or(AmmError::Overflow("D: denominator right overflow"))?,
            )
            .ok_or(AmmError::Overflow("D: denominator overflow"))?;

        d = numerator.safe_div(&denominator, Rounding::Down)?;

        if abs_diff(d, d_prev) <= U256::from(CONVERGENCE_THRESHOLD) {
            debug!(iterations = iteration + 1, "stable invariant D converged");
            return narrow_u128(d, "D: invariant exceeds u128");
        }
    }

    warn!(xp, yp, amp, "stable invariant D did not converge");
    Err(AmmError::IterateEnd("stable invariant D"))
}

/// Solves for the `target` side's balance after the other side moves to
/// `new_balance_of_other`, keeping the invariant of `(xp, yp)`.
///
/// # Errors
///
/// Propagates the errors of [`compute_d`] and [`compute_y_d`].
pub fn compute_y(
    target: Side,
    new_balance_of_other: u128,
    xp: u128,
    yp: u128,
    amp: u128,
) -> Result<u128, AmmError> {
    let d = compute_d(xp, yp, amp)?;
    debug!(?target, d, "solving stable balance");
    compute_y_d(new_balance_of_other, d, amp)
}

/// Solves for one balance given the other balance `x` and a known
/// invariant `d`.
///
/// ```text
/// c = D·D/(n·x) · D·A_PRECISION/(Ann·n)
/// b = x + D·A_PRECISION/Ann
/// y_next = (y² + c) / (2y + b − D)        seeded at y = D
/// ```
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `x` is zero.
/// - [`AmmError::Underflow`] if `2y + b < D` (the point is off the curve).
/// - [`AmmError::Overflow`] on overflow.
/// - [`AmmError::IterateEnd`] if the iteration does not converge.
pub fn compute_y_d(x: u128, d: u128, amp: u128) -> Result<u128, AmmError> {
    let n = U256::from(N_COINS);
    let a_precision = U256::from(A_PRECISION);
    let x = U256::from(x);
    let d = U256::from(d);

    let ann = U256::from(amp)
        .checked_mul(n)
        .ok_or(AmmError::Overflow("y: A·n overflow"))?;

    let mut c = d
        .checked_mul(d)
        .ok_or(AmmError::Overflow("y: D² overflow"))?
        .safe_div(&x.safe_mul(&n)?, Rounding::Down)?;
    c = c
        .checked_mul(d)
        .ok_or(AmmError::Overflow("y: c·D overflow"))?
        .checked_mul(a_precision)
        .ok_or(AmmError::Overflow("y: c·A_PRECISION overflow"))?
        .safe_div(&ann.safe_mul(&n)?, Rounding::Down)?;

    let b = x
        .checked_add(
            d.checked_mul(a_precision)
                .ok_or(AmmError::Overflow("y: D·A_PRECISION overflow"))?
                .safe_div(&ann, Rounding::Down)?,
        )
        .ok_or(AmmError::Overflow("y: b overflow"))?;

    let mut y = d;
    for iteration in 0..MAX_ITERATIONS {
        let y_prev = y;
        let numerator = y
            .checked_mul(y)
            .ok_or(AmmError::Overflow("y: y² overflow"))?
            .checked_add(c)
            .ok_or(AmmError::Overflow("y: numerator overflow"))?;
        let denominator = y
            .checked_mul(U256::from(2u8))
            .ok_or(AmmError::Overflow("y: 2y overflow"))?
            .checked_add(b)
            .ok_or(AmmError::Overflow("y: denominator sum overflow"))?
            .checked_sub(d)
            .ok_or(AmmError::Underflow("y: 2y + b below D"))?;
        y = numerator.safe_div(&denominator, Rounding::Down)?;

        if abs_diff(y, y_prev) <= U256::from(CONVERGENCE_THRESHOLD) {
            debug!(iterations = iteration + 1, "stable balance y converged");
            return narrow_u128(y, "y: balance exceeds u128");
        }
    }

    warn!("stable balance y did not converge");
    Err(AmmError::IterateEnd("stable balance y"))
}

fn abs_diff(a: U256, b: U256) -> U256 {
    if a >= b { a - b } else { b - a }
}
