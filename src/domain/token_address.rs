//! Opaque 32-byte identifiers for assets and accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Address of an asset in the host ledger.
///
/// Addresses are totally ordered byte-wise; a [`TokenPair`](super::TokenPair)
/// requires its `X` asset to sort strictly below its `Y` asset.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::TokenAddress;
///
/// let usdc = TokenAddress::from_bytes([1u8; 32]);
/// let usdt = TokenAddress::from_bytes([2u8; 32]);
/// assert!(usdc < usdt);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAddress([u8; 32]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Derives an address from a one-byte tag, a namespace salt and a
    /// sequence number.
    ///
    /// Used by the registry to assign share-token and custody addresses.
    /// Distinct `(tag, salt, index)` triples give distinct addresses.
    #[must_use]
    pub const fn derived(tag: u8, salt: u64, index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = tag;
        let salt = salt.to_be_bytes();
        let idx = index.to_be_bytes();
        let mut i = 0;
        while i < idx.len() {
            bytes[8 + i] = salt[i];
            bytes[24 + i] = idx[i];
            i += 1;
        }
        Self(bytes)
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…")
    }
}

/// Identity of an account holding balances in the host ledger.
///
/// Pools own a custody account; traders, liquidity providers and the pool
/// administrator are all plain accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}
