//! Rounding-aware `u128` division.
//!
//! # Convention
//!
//! Round against the party leaving the pool:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Amount paid out (swap output, withdrawal) | [`Rounding::Down`] |
//! | Reserve the pool must retain after a trade | [`Rounding::Up`] |
//! | Shares minted | [`Rounding::Down`] |
//!
//! # Examples
//!
//! ```
//! use dualcurve_amm::domain::Rounding;
//! use dualcurve_amm::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Integer division with an explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a non-zero remainder implies denominator > 1
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_returns_none() {
        assert_eq!(div_round(100, 0, Rounding::Down), None);
        assert_eq!(div_round(0, 0, Rounding::Up), None);
    }

    #[test]
    fn exact_division_agrees() {
        assert_eq!(div_round(100, 10, Rounding::Down), Some(10));
        assert_eq!(div_round(100, 10, Rounding::Up), Some(10));
        assert_eq!(div_round(0, 5, Rounding::Up), Some(0));
    }

    #[test]
    fn remainder_rounds_by_direction() {
        assert_eq!(div_round(9, 10, Rounding::Down), Some(0));
        assert_eq!(div_round(9, 10, Rounding::Up), Some(1));
        assert_eq!(div_round(1, u128::MAX, Rounding::Up), Some(1));
    }

    #[test]
    fn max_numerator() {
        assert_eq!(div_round(u128::MAX, 1, Rounding::Up), Some(u128::MAX));
        assert_eq!(div_round(u128::MAX, 2, Rounding::Up), Some(u128::MAX / 2 + 1));
        assert_eq!(div_round(u128::MAX, u128::MAX - 1, Rounding::Up), Some(2));
    }
}
