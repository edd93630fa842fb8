//! In-memory ledger for tests, demos and off-chain simulation.

use std::collections::HashMap;

use tracing::trace;

use super::{BurnAuthority, Ledger, MintAuthority};
use crate::domain::{AccountId, Amount, Balance, TokenAddress};
use crate::error::AmmError;

/// A [`Ledger`] backed by hash maps.
///
/// Tracks per-account balances and per-asset total supply. Funds enter
/// through [`credit`](Self::credit) (a faucet) or share minting.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::{AccountId, Amount, TokenAddress};
/// use dualcurve_amm::platform::{Ledger, MemoryLedger};
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let usdc = TokenAddress::from_bytes([9u8; 32]);
/// let mut ledger = MemoryLedger::new();
/// ledger.credit(&alice, &usdc, Amount::new(100)).expect("fresh supply");
///
/// let coin = ledger.withdraw(&alice, &usdc, Amount::new(40)).expect("funded");
/// assert_eq!(ledger.balance_of(&alice, &usdc), Amount::new(60));
/// ledger.deposit(&alice, coin);
/// assert_eq!(ledger.balance_of(&alice, &usdc), Amount::new(100));
/// ```
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: HashMap<(AccountId, TokenAddress), Amount>,
    supply: HashMap<TokenAddress, Amount>,
}

impl MemoryLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `asset` out of thin air in `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the asset's supply would overflow.
    pub fn credit(
        &mut self,
        account: &AccountId,
        asset: &TokenAddress,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.grow_supply(asset, amount)?;
        self.deposit(account, Balance::new(*asset, amount));
        Ok(())
    }

    /// Total amount of `asset` in existence.
    pub fn total_supply(&self, asset: &TokenAddress) -> Amount {
        self.supply.get(asset).copied().unwrap_or_default()
    }

    fn grow_supply(&mut self, asset: &TokenAddress, amount: Amount) -> Result<(), AmmError> {
        let supply = self.supply.entry(*asset).or_default();
        *supply = supply
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("ledger: total supply"))?;
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    fn withdraw(
        &mut self,
        account: &AccountId,
        asset: &TokenAddress,
        amount: Amount,
    ) -> Result<Balance, AmmError> {
        if amount.is_zero() {
            return Ok(Balance::new(*asset, amount));
        }
        let held = self
            .balances
            .get_mut(&(*account, *asset))
            .ok_or(AmmError::InsufficientBalance)?;
        *held = held
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        trace!(%asset, %amount, "ledger withdraw");
        Ok(Balance::new(*asset, amount))
    }

    fn deposit(&mut self, account: &AccountId, balance: Balance) {
        let asset = balance.asset();
        let held = self.balances.entry((*account, asset)).or_default();
        // Bounded by the asset's total supply, which is checked on creation.
        *held = Amount::new(held.get().saturating_add(balance.into_value().get()));
    }

    fn mint(&mut self, authority: &MintAuthority, amount: Amount) -> Result<Balance, AmmError> {
        let asset = authority.asset();
        self.grow_supply(&asset, amount)?;
        trace!(%asset, %amount, "ledger mint");
        Ok(Balance::new(asset, amount))
    }

    fn burn(&mut self, authority: &BurnAuthority, balance: Balance) -> Result<(), AmmError> {
        if balance.asset() != authority.asset() {
            return Err(AmmError::Unauthorized);
        }
        let asset = balance.asset();
        let amount = balance.into_value();
        let supply = self.supply.entry(asset).or_default();
        // A burnable balance was part of the supply.
        *supply = Amount::new(supply.get().saturating_sub(amount.get()));
        trace!(%asset, %amount, "ledger burn");
        Ok(())
    }

    fn balance_of(&self, account: &AccountId, asset: &TokenAddress) -> Amount {
        self.balances
            .get(&(*account, *asset))
            .copied()
            .unwrap_or_default()
    }
}
