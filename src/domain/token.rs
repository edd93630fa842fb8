//! Asset identity.

use serde::{Deserialize, Serialize};

use super::{Decimals, TokenAddress};

/// An asset held by a pool: its ledger address and decimal precision.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::{Decimals, Token, TokenAddress};
///
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// assert_eq!(usdc.decimals().get(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(address: TokenAddress, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the asset address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the asset precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}
