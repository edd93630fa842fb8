//! Three-segment piecewise constant-product curve.
//!
//! # Base curve
//!
//! With `s0 = isqrt(K)` and widths `w1 < 1 < w2` in basis points:
//!
//! | Segment | Range | Equation |
//! |---------|-------|----------|
//! | left | `x < Xa` | `(x − m) · y = K2` |
//! | middle | `Xa ≤ x ≤ Xb` | `x · y = K` |
//! | right | `x > Xb` | `x · (y − n) = K2` |
//!
//! where `Xa = s0·w1`, `Xb = s0·w2`, `Ya = K/Xa`, `Yb = K/Xb`, `K2 = Xa·Yb`,
//! `m = Xa·(Xb − Xa)/Xb` and `n = Yb·(Xb − Xa)/Xb`. The segments meet
//! continuously at `(Xa, Ya)` and `(Xb, Yb)` and the marginal price drops at
//! each join, so the composite curve is convex.
//!
//! # Pricing
//!
//! The curve is fixed when the pool is configured. A pool's position on it
//! is its normalized `X` balance: a swap moves that position right (X in)
//! or left (Y in), and the segment is chosen by where the position lies
//! before and after the trade. The `Y` reserve only bounds what can be paid
//! out. Convexity makes the output grow with the input and shrink as the
//! position moves right.
//!
//! Every evaluation uses the exact rational form of the constants in
//! `U256` and rounds once, so the segments meet without a rounding step at
//! the joins. The positions `x ≤ m` (and `y ≤ n` for the inverse) lie beyond
//! the asymptotes and cannot be priced.

use serde::{Deserialize, Serialize};

use super::{CheckedArithmetic, U256, isqrt, mul_div, narrow_u128, pro_rata};
use crate::domain::{BPS, BasisPoints, Rounding};
use crate::error::AmmError;

/// Largest accepted right-hand width (100x the base scale).
pub const MAX_WIDTH: u32 = 1_000_000;

/// Segment widths of a piecewise curve relative to its square-root scale.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::BasisPoints;
/// use dualcurve_amm::math::SegmentShape;
///
/// assert!(SegmentShape::new(BasisPoints::new(5_000), BasisPoints::new(20_000)).is_ok());
/// assert!(SegmentShape::new(BasisPoints::new(10_000), BasisPoints::new(20_000)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentShape {
    w1: BasisPoints,
    w2: BasisPoints,
}

impl SegmentShape {
    /// Validates `0 < w1 < BPS < w2 ≤ MAX_WIDTH`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] otherwise.
    pub const fn new(w1: BasisPoints, w2: BasisPoints) -> Result<Self, AmmError> {
        if !w1.is_below_one() {
            return Err(AmmError::InvalidConfiguration(
                "w1 must lie strictly between 0 and 10_000 bp",
            ));
        }
        if !w2.is_above_one() || w2.get() > MAX_WIDTH {
            return Err(AmmError::InvalidConfiguration(
                "w2 must lie above 10_000 bp and within MAX_WIDTH",
            ));
        }
        Ok(Self { w1, w2 })
    }

    /// Left boundary width.
    #[must_use]
    pub const fn w1(&self) -> BasisPoints {
        self.w1
    }

    /// Right boundary width.
    #[must_use]
    pub const fn w2(&self) -> BasisPoints {
        self.w2
    }

    fn widths(&self) -> (U256, U256) {
        (U256::from(self.w1.as_u128()), U256::from(self.w2.as_u128()))
    }
}

/// Constants of the base curve for a target invariant `K`.
///
/// Computed once when a piecewise pool is configured and never changed. The
/// integer fields are the floors of the exact joins and shifts; pricing
/// evaluates the same constants as exact fractions of `K`, `s0` and the
/// widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseCurve {
    /// Target invariant of the middle segment.
    pub k: u128,
    /// Invariant shared by both outer segments, `Xa · Yb`.
    pub k2: u128,
    /// Left join abscissa.
    pub xa: u128,
    /// Right join abscissa.
    pub xb: u128,
    /// Left join ordinate, `K / Xa`.
    pub ya: u128,
    /// Right join ordinate, `K / Xb`.
    pub yb: u128,
    /// Horizontal shift of the left segment.
    pub m: u128,
    /// Vertical shift of the right segment.
    pub n: u128,
    /// `isqrt(K)`.
    pub s0: u128,
    /// Segment widths the joins were placed with.
    pub shape: SegmentShape,
}

/// Which segment a position lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// `x` below the left join.
    Left,
    /// Between the joins.
    Middle,
    /// `x` above the right join.
    Right,
}

impl BaseCurve {
    /// Derives the base-curve constants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `K` is too small for
    /// the left boundary to be positive.
    pub fn new(k: u128, shape: &SegmentShape) -> Result<Self, AmmError> {
        let s0 = narrow_u128(isqrt(U256::from(k)), "piecewise: s0")?;
        let xa = shape
            .w1
            .apply_to(s0)
            .ok_or(AmmError::Overflow("piecewise: Xa"))?;
        let xb = shape
            .w2
            .apply_to(s0)
            .ok_or(AmmError::Overflow("piecewise: Xb"))?;
        if xa == 0 {
            return Err(AmmError::InvalidConfiguration(
                "K too small for the left segment width",
            ));
        }
        let ya = k / xa;
        let yb = k / xb;
        let k2 = xa.safe_mul(&yb)?;
        let gap = xb - xa;
        let m = mul_div(xa, gap, xb, Rounding::Down)?;
        let n = mul_div(yb, gap, xb, Rounding::Down)?;
        Ok(Self {
            k,
            k2,
            xa,
            xb,
            ya,
            yb,
            m,
            n,
            s0,
            shape: *shape,
        })
    }

    /// Segment of position `x`: left of `s0·w1`, right of `s0·w2`, or
    /// between them.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on overflow.
    pub fn segment(&self, x: u128) -> Result<Segment, AmmError> {
        self.segment_wide(U256::from(x))
    }

    /// `y` on the curve at `x`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if `x ≤ m`, the left asymptote.
    /// - [`AmmError::Overflow`] if the value exceeds `u128`.
    pub fn y_at(&self, x: u128, rounding: Rounding) -> Result<u128, AmmError> {
        narrow_u128(self.y_wide(U256::from(x), rounding)?, "piecewise: y")
    }

    /// `x` on the curve at `y`, the inverse of [`y_at`](Self::y_at).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if `y ≤ n`, the right asymptote.
    /// - [`AmmError::Overflow`] if the value exceeds `u128`.
    pub fn x_at(&self, y: u128, rounding: Rounding) -> Result<u128, AmmError> {
        narrow_u128(self.x_wide(U256::from(y), rounding)?, "piecewise: x")
    }

    fn wide_constants(&self) -> (U256, U256, U256, U256, U256) {
        let (w1, w2) = self.shape.widths();
        (U256::from(self.k), U256::from(self.s0), w1, w2, w2.saturating_sub(w1))
    }

    fn segment_wide(&self, x: U256) -> Result<Segment, AmmError> {
        let (_, s, w1, w2, _) = self.wide_constants();
        let x_bps = x.safe_mul(&U256::from(BPS))?;
        if x_bps < s.safe_mul(&w1)? {
            Ok(Segment::Left)
        } else if x_bps <= s.safe_mul(&w2)? {
            Ok(Segment::Middle)
        } else {
            Ok(Segment::Right)
        }
    }

    fn y_wide(&self, x: U256, rounding: Rounding) -> Result<U256, AmmError> {
        let (k, s, w1, w2, gap) = self.wide_constants();
        let bps = U256::from(BPS);
        match self.segment_wide(x)? {
            Segment::Left => {
                // K2 / (x − m) = K·w1·BPS / (w2·BPS·x − s0·w1·(w2 − w1))
                let numerator = k.safe_mul(&w1)?.safe_mul(&bps)?;
                let denominator = w2
                    .safe_mul(&bps)?
                    .safe_mul(&x)?
                    .checked_sub(s.safe_mul(&w1)?.safe_mul(&gap)?)
                    .filter(|v| !v.is_zero())
                    .ok_or(AmmError::InsufficientLiquidity)?;
                numerator.safe_div(&denominator, rounding)
            }
            Segment::Middle => k.safe_div(&x, rounding),
            Segment::Right => {
                // K2 / x + n = K·(s0·w1·w2 + BPS·(w2 − w1)·x) / (s0·w2²·x)
                let numerator = k.safe_mul(
                    &s.safe_mul(&w1)?
                        .safe_mul(&w2)?
                        .safe_add(&bps.safe_mul(&gap)?.safe_mul(&x)?)?,
                )?;
                let denominator = s.safe_mul(&w2)?.safe_mul(&w2)?.safe_mul(&x)?;
                numerator.safe_div(&denominator, rounding)
            }
        }
    }

    fn x_wide(&self, y: U256, rounding: Rounding) -> Result<U256, AmmError> {
        let (k, s, w1, w2, gap) = self.wide_constants();
        let bps = U256::from(BPS);
        let k_bps = k.safe_mul(&bps)?;
        if y.safe_mul(&s)?.safe_mul(&w1)? > k_bps {
            // K2 / y + m = (K·w1·BPS + s0·w1·(w2 − w1)·y) / (w2·BPS·y)
            let numerator = k_bps
                .safe_mul(&w1)?
                .safe_add(&s.safe_mul(&w1)?.safe_mul(&gap)?.safe_mul(&y)?)?;
            let denominator = w2.safe_mul(&bps)?.safe_mul(&y)?;
            numerator.safe_div(&denominator, rounding)
        } else if y.safe_mul(&s)?.safe_mul(&w2)? >= k_bps {
            k.safe_div(&y, rounding)
        } else {
            // K2 / (y − n) = K·s0·w1·w2 / (s0·w2²·y − K·BPS·(w2 − w1))
            let numerator = k.safe_mul(&s)?.safe_mul(&w1)?.safe_mul(&w2)?;
            let denominator = s
                .safe_mul(&w2)?
                .safe_mul(&w2)?
                .safe_mul(&y)?
                .checked_sub(k_bps.safe_mul(&gap)?)
                .filter(|v| !v.is_zero())
                .ok_or(AmmError::InsufficientLiquidity)?;
            numerator.safe_div(&denominator, rounding)
        }
    }
}

/// Output `Y` for `input_x` of `X` against normalized reserves.
///
/// `floor(y(x)) − ceil(y(x + input)) − 1` on the base curve, never more
/// than `current_y − 1`. Tiny inputs may produce zero.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `current_x` lies beyond the left asymptote.
/// - [`AmmError::Overflow`] on overflow.
pub fn swap_x_to_y(
    current_x: u128,
    current_y: u128,
    input_x: u128,
    curve: &BaseCurve,
) -> Result<u128, AmmError> {
    if current_x == 0 || current_y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let x_after = current_x.safe_add(&input_x)?;
    let y_before = curve.y_wide(U256::from(current_x), Rounding::Down)?;
    let y_after = curve.y_wide(U256::from(x_after), Rounding::Up)?;
    Ok(conservative_output(y_before, y_after)?.min(current_y - 1))
}

/// Output `X` for `input_y` of `Y` against normalized reserves.
///
/// The position `x` moves left to the point whose `y` is `y(x) + input`;
/// the output is `current_x − ceil(x_after) − 1`. The `Y` reserve plays no
/// part beyond the emptiness check.
///
/// # Errors
///
/// Same as [`swap_x_to_y`].
pub fn swap_y_to_x(
    current_y: u128,
    current_x: u128,
    input_y: u128,
    curve: &BaseCurve,
) -> Result<u128, AmmError> {
    if current_x == 0 || current_y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let position = curve.y_wide(U256::from(current_x), Rounding::Down)?;
    let y_after = position.safe_add(&U256::from(input_y))?;
    let x_after = curve.x_wide(y_after, Rounding::Up)?;
    Ok(conservative_output(U256::from(current_x), x_after)?.min(current_x - 1))
}

fn conservative_output(before: U256, after: U256) -> Result<u128, AmmError> {
    let out = before
        .checked_sub(after)
        .and_then(|v| v.checked_sub(U256::one()))
        .unwrap_or_default();
    narrow_u128(out, "piecewise: output exceeds u128")
}

/// Shares minted by the first deposit into an empty pool: the geometric
/// mean `isqrt(x·y)` of the normalized deposit.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientLiquidity`] if either amount is zero.
pub fn bootstrap_shares(x: u128, y: u128) -> Result<u128, AmmError> {
    if x == 0 || y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let product = U256::from(x).safe_mul(&U256::from(y))?;
    narrow_u128(isqrt(product), "piecewise: bootstrap shares")
}

/// Amounts accepted from a deposit into a funded pool and the shares they
/// mint.
///
/// Keeps the pool's `X:Y` ratio by scaling the offer down to its limiting
/// asset. `shares = min(x·T/X, y·T/Y)`; when that rounds to zero nothing is
/// accepted and `(0, 0, 0)` is returned.
///
/// # Errors
///
/// - [`AmmError::AddLiquidityInvalid`] if `total_shares` is zero (the
///   bootstrap path is [`bootstrap_shares`]).
/// - [`AmmError::InsufficientLiquidity`] if a reserve is zero.
pub fn add_liquidity_amounts(
    current_x: u128,
    current_y: u128,
    total_shares: u128,
    desired_x: u128,
    desired_y: u128,
) -> Result<(u128, u128, u128), AmmError> {
    if total_shares == 0 {
        return Err(AmmError::AddLiquidityInvalid(
            "pool without shares has no ratio to follow",
        ));
    }
    if current_x == 0 || current_y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let y_optimal = mul_div(desired_x, current_y, current_x, Rounding::Down)?;
    let (x, y) = if y_optimal <= desired_y {
        (desired_x, y_optimal)
    } else {
        (
            mul_div(desired_y, current_x, current_y, Rounding::Down)?,
            desired_y,
        )
    };

    let shares = mul_div(x, total_shares, current_x, Rounding::Down)?.min(mul_div(
        y,
        total_shares,
        current_y,
        Rounding::Down,
    )?);
    if shares == 0 {
        return Ok((0, 0, 0));
    }
    Ok((x, y, shares))
}

/// Pro-rata reserves released by burning `burn` of `total_shares`,
/// truncating.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientLiquidity`] if `burn` exceeds the
/// supply or the supply is zero.
pub fn remove_liquidity_amounts(
    current_x: u128,
    current_y: u128,
    total_shares: u128,
    burn: u128,
) -> Result<(u128, u128), AmmError> {
    pro_rata(current_x, current_y, total_shares, burn)
}
