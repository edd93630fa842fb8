//! Explicit rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Rounding direction for every division in the crate.
///
/// Curve solvers round amounts leaving the pool [`Down`](Self::Down) and
/// the reserve a pool must keep after a trade [`Up`](Self::Up), so that
/// truncation never drains value from liquidity providers.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::Down.flip(), Rounding::Up);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// The opposite direction.
    #[must_use]
    pub const fn flip(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Rounding::Up.is_up());
        assert!(!Rounding::Up.is_down());
        assert!(Rounding::Down.is_down());
    }

    #[test]
    fn flip_is_involutive() {
        assert_eq!(Rounding::Up.flip(), Rounding::Down);
        assert_eq!(Rounding::Up.flip().flip(), Rounding::Up);
    }
}
