//! Read-only snapshot of a pool's balances handed to curve solvers.

use serde::{Deserialize, Serialize};

use super::{Amount, Liquidity, Side};
use crate::error::AmmError;

/// Raw reserves, decimal multipliers and share supply of a pool at one
/// instant.
///
/// Reserves are in each asset's own units. [`normalized`](Self::normalized)
/// scales them to the common precision the invariants are computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reserves {
    /// Raw reserve of asset X.
    pub reserve_x: Amount,
    /// Raw reserve of asset Y.
    pub reserve_y: Amount,
    /// `10^(finest − decimals_x)`.
    pub multiplier_x: u128,
    /// `10^(finest − decimals_y)`.
    pub multiplier_y: u128,
    /// Outstanding liquidity shares.
    pub supply: Liquidity,
}

impl Reserves {
    /// Raw reserve of `side`.
    pub const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::X => self.reserve_x,
            Side::Y => self.reserve_y,
        }
    }

    /// Decimal multiplier of `side`.
    #[must_use]
    pub const fn multiplier(&self, side: Side) -> u128 {
        match side {
            Side::X => self.multiplier_x,
            Side::Y => self.multiplier_y,
        }
    }

    /// Reserve of `side` scaled to the common precision.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the scaled value exceeds `u128`.
    pub fn normalized(&self, side: Side) -> Result<u128, AmmError> {
        self.reserve(side)
            .get()
            .checked_mul(self.multiplier(side))
            .ok_or(AmmError::Overflow("reserves: normalization"))
    }

    /// Whether both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_x.is_zero() && self.reserve_y.is_zero()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn snapshot() -> Reserves {
        Reserves {
            reserve_x: Amount::new(5),
            reserve_y: Amount::new(7),
            multiplier_x: 1_000,
            multiplier_y: 1,
            supply: Liquidity::ZERO,
        }
    }

    #[test]
    fn normalizes_each_side() {
        let r = snapshot();
        assert_eq!(r.normalized(Side::X), Ok(5_000));
        assert_eq!(r.normalized(Side::Y), Ok(7));
        assert_eq!(r.reserve(Side::Y), Amount::new(7));
    }

    #[test]
    fn normalization_overflow() {
        let r = Reserves {
            reserve_x: Amount::MAX,
            multiplier_x: 10,
            ..snapshot()
        };
        let Err(AmmError::Overflow(_)) = r.normalized(Side::X) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn emptiness() {
        assert!(!snapshot().is_empty());
        let r = Reserves {
            reserve_x: Amount::ZERO,
            reserve_y: Amount::ZERO,
            ..snapshot()
        };
        assert!(r.is_empty());
    }
}
