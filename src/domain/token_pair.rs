//! Strictly ordered asset pair and side selection.

use serde::{Deserialize, Serialize};

use super::Token;
use crate::error::AmmError;

/// One of the two sides of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The asset with the lower address.
    X,
    /// The asset with the higher address.
    Y,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// The `(X, Y)` assets of a pool.
///
/// Unlike a sorted set, the pair is *not* reordered on construction: the
/// caller must already supply `X` with the strictly lower address. This
/// keeps a pool's `X`/`Y` orientation unambiguous for every caller that
/// refers to it.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::{Decimals, Token, TokenAddress, TokenPair};
///
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// let usdt = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(6).expect("valid"));
///
/// assert!(TokenPair::new(usdc, usdt).is_ok());
/// assert!(TokenPair::new(usdt, usdc).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    x: Token,
    y: Token,
}

impl TokenPair {
    /// Creates a pair with `x` strictly below `y` by address.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTokenPair`] if both assets share an
    /// address or if `x` sorts above `y`.
    pub fn new(x: Token, y: Token) -> Result<Self, AmmError> {
        if x.address() == y.address() {
            return Err(AmmError::InvalidTokenPair("pair requires two distinct assets"));
        }
        if x.address() > y.address() {
            return Err(AmmError::InvalidTokenPair(
                "X asset must sort below Y asset",
            ));
        }
        Ok(Self { x, y })
    }

    /// The `X` asset.
    #[must_use]
    pub const fn x(&self) -> Token {
        self.x
    }

    /// The `Y` asset.
    #[must_use]
    pub const fn y(&self) -> Token {
        self.y
    }

    /// The asset on `side`.
    #[must_use]
    pub const fn token(&self, side: Side) -> Token {
        match side {
            Side::X => self.x,
            Side::Y => self.y,
        }
    }

    /// Which side `token` sits on.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn side_of(&self, token: &Token) -> Result<Side, AmmError> {
        if *token == self.x {
            Ok(Side::X)
        } else if *token == self.y {
            Ok(Side::Y)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, TokenAddress};

    fn tok(addr_byte: u8, dec: u8) -> Token {
        let Ok(d) = Decimals::new(dec) else {
            panic!("invalid decimals in test: {dec}");
        };
        Token::new(TokenAddress::from_bytes([addr_byte; 32]), d)
    }

    #[test]
    fn ordered_pair_is_accepted() {
        let Ok(pair) = TokenPair::new(tok(1, 6), tok(2, 18)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.x(), tok(1, 6));
        assert_eq!(pair.y(), tok(2, 18));
    }

    #[test]
    fn reversed_pair_is_rejected() {
        let Err(AmmError::InvalidTokenPair(_)) = TokenPair::new(tok(2, 6), tok(1, 6)) else {
            panic!("expected InvalidTokenPair");
        };
    }

    #[test]
    fn same_asset_is_rejected() {
        let Err(AmmError::InvalidTokenPair(_)) = TokenPair::new(tok(1, 6), tok(1, 18)) else {
            panic!("expected InvalidTokenPair");
        };
    }

    #[test]
    fn side_lookup() {
        let Ok(pair) = TokenPair::new(tok(1, 6), tok(2, 6)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.side_of(&tok(1, 6)), Ok(Side::X));
        assert_eq!(pair.side_of(&tok(2, 6)), Ok(Side::Y));
        assert_eq!(pair.token(Side::Y), tok(2, 6));
        let Err(AmmError::InvalidToken(_)) = pair.side_of(&tok(3, 6)) else {
            panic!("expected InvalidToken");
        };
    }

    #[test]
    fn other_side() {
        assert_eq!(Side::X.other(), Side::Y);
        assert_eq!(Side::Y.other(), Side::X);
    }
}
