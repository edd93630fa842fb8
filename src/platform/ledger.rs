//! Custody boundary: the host ledger that actually holds balances.

use crate::domain::{AccountId, Amount, Balance, TokenAddress};
use crate::error::AmmError;

/// Capability to mint one asset, the share token of a pool.
///
/// Only the registry can create one, when it creates the pool; the pool
/// keeps it private.
#[derive(Debug, PartialEq, Eq)]
pub struct MintAuthority {
    asset: TokenAddress,
}

impl MintAuthority {
    pub(crate) const fn new(asset: TokenAddress) -> Self {
        Self { asset }
    }

    /// Asset this authority can mint.
    #[must_use]
    pub const fn asset(&self) -> TokenAddress {
        self.asset
    }
}

/// Capability to burn one asset, the share token of a pool.
#[derive(Debug, PartialEq, Eq)]
pub struct BurnAuthority {
    asset: TokenAddress,
}

impl BurnAuthority {
    pub(crate) const fn new(asset: TokenAddress) -> Self {
        Self { asset }
    }

    /// Asset this authority can burn.
    #[must_use]
    pub const fn asset(&self) -> TokenAddress {
        self.asset
    }
}

/// Fungible-balance custody.
///
/// Pools never hold funds themselves: reserves and admin-fee accruals live
/// in the pool's custody account, and every movement goes through a
/// [`Balance`] obtained from this trait.
///
/// # Contract
///
/// - [`withdraw`](Self::withdraw) and [`mint`](Self::mint) are the only
///   fallible movements; on error nothing changes.
/// - [`deposit`](Self::deposit) always succeeds.
/// - [`burn`](Self::burn) fails only when the balance's asset is not the
///   authority's, and callers check that beforehand.
pub trait Ledger {
    /// Debits `amount` of `asset` from `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if the account holds less.
    fn withdraw(
        &mut self,
        account: &AccountId,
        asset: &TokenAddress,
        amount: Amount,
    ) -> Result<Balance, AmmError>;

    /// Credits `balance` to `account`.
    fn deposit(&mut self, account: &AccountId, balance: Balance);

    /// Creates `amount` of the authority's asset.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if total supply would overflow.
    fn mint(&mut self, authority: &MintAuthority, amount: Amount) -> Result<Balance, AmmError>;

    /// Destroys `balance`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] if the balance is not of the
    /// authority's asset.
    fn burn(&mut self, authority: &BurnAuthority, balance: Balance) -> Result<(), AmmError>;

    /// Amount of `asset` held by `account`.
    fn balance_of(&self, account: &AccountId, asset: &TokenAddress) -> Amount;
}
