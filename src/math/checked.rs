//! Overflow-safe integer arithmetic.
//!
//! The [`CheckedArithmetic`] trait turns every overflow, underflow or zero
//! divisor into an [`AmmError`] instead of a panic or a silent wrap. It is
//! implemented for the raw integer widths the solvers use and for the
//! domain wrappers:
//!
//! | Type | Use |
//! |------|-----|
//! | `u128` | raw and normalized reserves |
//! | [`U256`] | solver intermediates (`D²`, `x·y`, quadratic discriminants) |
//! | [`Amount`] | asset quantities |
//! | [`Liquidity`] | share quantities |
//!
//! Narrowing from `U256` back to `u128` goes through [`narrow_u128`] only.
//!
//! # Examples
//!
//! ```
//! use dualcurve_amm::domain::Rounding;
//! use dualcurve_amm::math::{CheckedArithmetic, U256, narrow_u128};
//!
//! let d = U256::from(4_000_000u128);
//! let sq = d.safe_mul(&d).expect("fits");
//! let back = narrow_u128(sq.safe_div(&d, Rounding::Down).expect("non-zero"), "demo")
//!     .expect("fits u128");
//! assert_eq!(back, 4_000_000);
//! ```

pub use primitive_types::U256;

use crate::domain::{Amount, Liquidity, Rounding};
use crate::error::AmmError;

/// Fallible arithmetic.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the type width.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the type width.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

// ---------------------------------------------------------------------------
// u128
// ---------------------------------------------------------------------------

impl CheckedArithmetic for u128 {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(*other)
            .ok_or(AmmError::Overflow("u128 addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(*other)
            .ok_or(AmmError::Underflow("u128 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(*other)
            .ok_or(AmmError::Overflow("u128 multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        super::div_round(*self, *other, rounding).ok_or(AmmError::DivisionByZero)
    }
}

// ---------------------------------------------------------------------------
// U256
// ---------------------------------------------------------------------------

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(*other)
            .ok_or(AmmError::Overflow("u256 addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(*other)
            .ok_or(AmmError::Underflow("u256 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(*other)
            .ok_or(AmmError::Overflow("u256 multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        if other.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let q = *self / *other;
        match rounding {
            Rounding::Down => Ok(q),
            Rounding::Up => {
                if (*self % *other).is_zero() {
                    Ok(q)
                } else {
                    // q < self when other > 1, and the remainder is zero when other == 1
                    Ok(q + U256::one())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Amount / Liquidity
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::DivisionByZero)
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("liquidity subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .safe_mul(&other.get())
            .map(Liquidity::new)
            .map_err(|_| AmmError::Overflow("liquidity multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.get().safe_div(&other.get(), rounding).map(Liquidity::new)
    }
}

// ---------------------------------------------------------------------------
// Free helpers
// ---------------------------------------------------------------------------

/// Narrows a `U256` to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] carrying `context` if the value needs
/// more than 128 bits.
pub fn narrow_u128(value: U256, context: &'static str) -> Result<u128, AmmError> {
    if value.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Floor of the square root of a `U256`.
#[must_use]
pub fn isqrt(value: U256) -> U256 {
    value.integer_sqrt()
}

/// `a · b / denominator` with a 256-bit intermediate.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] for a zero denominator and
/// [`AmmError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    let product = U256::from(a).safe_mul(&U256::from(b))?;
    let quotient = product.safe_div(&U256::from(denominator), rounding)?;
    narrow_u128(quotient, "mul_div: quotient exceeds u128")
}

/// Pro-rata share of two reserves released by burning `burn` of `total`
/// shares, truncating.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientLiquidity`] if `total` is zero or
/// `burn` exceeds it.
pub fn pro_rata(
    reserve_x: u128,
    reserve_y: u128,
    total: u128,
    burn: u128,
) -> Result<(u128, u128), AmmError> {
    if total == 0 || burn > total {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok((
        mul_div(reserve_x, burn, total, Rounding::Down)?,
        mul_div(reserve_y, burn, total, Rounding::Down)?,
    ))
}
