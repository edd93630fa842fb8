//! Move-only asset balances in transit between ledger accounts.

use super::{Amount, TokenAddress};

/// A quantity of one asset that has left an account and not yet landed in
/// another.
///
/// `Balance` is deliberately neither `Clone` nor `Copy`: the only ways to
/// obtain one are a ledger withdrawal or mint, and the only ways to get rid
/// of one are a ledger deposit or burn. Holding a `Balance` is holding the
/// funds.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::{Amount, Balance, TokenAddress};
///
/// let usdc = TokenAddress::from_bytes([1u8; 32]);
/// let coin = Balance::new(usdc, Amount::new(500));
/// assert_eq!(coin.value(), Amount::new(500));
/// assert_eq!(coin.into_value(), Amount::new(500));
/// ```
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a Balance must be deposited or burned"]
pub struct Balance {
    asset: TokenAddress,
    value: Amount,
}

impl Balance {
    /// Materializes a balance.
    ///
    /// Intended for [`Ledger`](crate::platform::Ledger) implementations,
    /// which must debit an account or increase supply before handing one out.
    pub const fn new(asset: TokenAddress, value: Amount) -> Self {
        Self { asset, value }
    }

    /// Asset of this balance.
    #[must_use]
    pub const fn asset(&self) -> TokenAddress {
        self.asset
    }

    /// Quantity held.
    pub const fn value(&self) -> Amount {
        self.value
    }

    /// Consumes the balance, returning its quantity. Ledger implementations
    /// call this when crediting an account or retiring supply.
    pub fn into_value(self) -> Amount {
        self.value
    }
}
