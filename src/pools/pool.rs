//! Pool record: reserves, fee accruals, share supply and capabilities.
//!
//! Quoting is read-only. Every state change goes through a two-step
//! protocol: a fallible `plan_*` computes the complete next
//! `PoolBalances` from a quote, and `commit` installs it without any
//! further checks. The ledger-facing operations of the `contract` module
//! run between the two steps.

use tracing::debug;

use super::CurveKind;
use crate::domain::{
    AccountId, Amount, DepositQuote, FeeSchedule, Liquidity, Reserves, Side, SwapQuote, Token,
    TokenPair, WithdrawQuote,
};
use crate::error::AmmError;
use crate::platform::{BurnAuthority, MintAuthority};
use crate::traits::CurveSolver;

/// Mutable balances of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PoolBalances {
    pub(crate) reserve_x: Amount,
    pub(crate) reserve_y: Amount,
    pub(crate) fee_x: Amount,
    pub(crate) fee_y: Amount,
    pub(crate) lp_supply: Liquidity,
}

impl PoolBalances {
    fn reserve_mut(&mut self, side: Side) -> &mut Amount {
        match side {
            Side::X => &mut self.reserve_x,
            Side::Y => &mut self.reserve_y,
        }
    }

    fn fee_mut(&mut self, side: Side) -> &mut Amount {
        match side {
            Side::X => &mut self.fee_x,
            Side::Y => &mut self.fee_y,
        }
    }
}

/// One pool of an ordered asset pair.
///
/// Funds never live in the record: `reserve + fee` of each asset is held
/// by the pool's custody account in the ledger. The record tracks how that
/// custody splits between liquidity providers (`reserve`) and the admin
/// (`fee`).
///
/// Pools are created by [`PoolRegistry`](crate::factory::PoolRegistry),
/// which also issues the share token and its mint/burn authorities.
#[derive(Debug)]
pub struct Pool {
    pair: TokenPair,
    curve: CurveKind,
    balances: PoolBalances,
    multiplier_x: u128,
    multiplier_y: u128,
    lp_token: Token,
    account: AccountId,
    admin: AccountId,
    disabled: bool,
    pub(super) mint_authority: MintAuthority,
    pub(super) burn_authority: BurnAuthority,
}

impl Pool {
    /// Creates an empty pool.
    ///
    /// Both assets are normalized to the finer of the two decimal counts.
    pub(crate) fn new(
        pair: TokenPair,
        curve: CurveKind,
        lp_token: Token,
        account: AccountId,
        admin: AccountId,
    ) -> Result<Self, AmmError> {
        let finest = pair.x().decimals().finest(pair.y().decimals());
        let multiplier_x = pair.x().decimals().multiplier_to(finest)?;
        let multiplier_y = pair.y().decimals().multiplier_to(finest)?;
        let lp_address = lp_token.address();
        Ok(Self {
            pair,
            curve,
            balances: PoolBalances::default(),
            multiplier_x,
            multiplier_y,
            lp_token,
            account,
            admin,
            disabled: false,
            mint_authority: MintAuthority::new(lp_address),
            burn_authority: BurnAuthority::new(lp_address),
        })
    }

    // -- accessors ------------------------------------------------------------

    /// Ordered asset pair.
    #[must_use]
    pub const fn pair(&self) -> &TokenPair {
        &self.pair
    }

    /// Curve parameters.
    #[must_use]
    pub const fn curve(&self) -> &CurveKind {
        &self.curve
    }

    /// Fee schedule of the curve.
    #[must_use]
    pub fn fees(&self) -> FeeSchedule {
        self.curve.fees()
    }

    /// Liquidity-provider reserve of `side`, raw units.
    pub const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::X => self.balances.reserve_x,
            Side::Y => self.balances.reserve_y,
        }
    }

    /// Admin fees accrued in `side`, raw units.
    pub const fn admin_fees(&self, side: Side) -> Amount {
        match side {
            Side::X => self.balances.fee_x,
            Side::Y => self.balances.fee_y,
        }
    }

    /// Outstanding liquidity shares.
    pub const fn lp_supply(&self) -> Liquidity {
        self.balances.lp_supply
    }

    /// Share token.
    #[must_use]
    pub const fn lp_token(&self) -> Token {
        self.lp_token
    }

    /// Custody account holding reserves and admin fees.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Pool admin.
    #[must_use]
    pub const fn admin(&self) -> AccountId {
        self.admin
    }

    /// Whether swaps and deposits are suspended.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Decimal multipliers `(x, y)` to the common precision.
    #[must_use]
    pub const fn multipliers(&self) -> (u128, u128) {
        (self.multiplier_x, self.multiplier_y)
    }

    /// Snapshot handed to the curve.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        Reserves {
            reserve_x: self.balances.reserve_x,
            reserve_y: self.balances.reserve_y,
            multiplier_x: self.multiplier_x,
            multiplier_y: self.multiplier_y,
            supply: self.balances.lp_supply,
        }
    }

    /// Current amplification `A` of a stable pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for a non-stable pool.
    #[cfg(feature = "stable")]
    pub fn amplification(&self, now: u64) -> Result<u128, AmmError> {
        self.curve.as_stable()?.amplification(now)
    }

    // -- quotes ---------------------------------------------------------------

    /// Priced swap of `amount_in` of `side_in` at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolDisabled`] if the pool is disabled.
    /// - [`AmmError::InvalidQuantity`] if `amount_in` is zero or the output
    ///   rounds to zero.
    /// - [`AmmError::InsufficientLiquidity`] if the output side is empty.
    pub fn quote_swap(
        &self,
        side_in: Side,
        amount_in: Amount,
        now: u64,
    ) -> Result<SwapQuote, AmmError> {
        if self.disabled {
            return Err(AmmError::PoolDisabled);
        }
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("swap input must be non-zero"));
        }
        let gross = self
            .curve
            .compute_swap_out(&self.reserves(), side_in, amount_in, now)?;
        if gross.is_zero() {
            return Err(AmmError::InvalidQuantity("swap output rounds to zero"));
        }
        let quote = SwapQuote::from_gross(side_in, amount_in, gross, &self.curve.fees())?;
        if quote.reserve_out_debit()? > self.reserve(quote.side_out()) {
            return Err(AmmError::InsufficientLiquidity);
        }
        Ok(quote)
    }

    /// Priced deposit at `now`. A deposit too small to mint a share comes
    /// back as a full refund.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolDisabled`] if the pool is disabled.
    /// - [`AmmError::InvalidQuantity`] if both amounts are zero.
    /// - Curve errors, see [`CurveSolver::compute_add_liquidity`].
    pub fn quote_add_liquidity(
        &self,
        amount_x: Amount,
        amount_y: Amount,
        now: u64,
    ) -> Result<DepositQuote, AmmError> {
        if self.disabled {
            return Err(AmmError::PoolDisabled);
        }
        if amount_x.is_zero() && amount_y.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit must be non-zero"));
        }
        let quote = self
            .curve
            .compute_add_liquidity(&self.reserves(), amount_x, amount_y, now)?;
        if quote.is_noop() {
            debug!("deposit too small to mint shares");
            return Ok(DepositQuote::refund_all(amount_x, amount_y));
        }
        Ok(quote)
    }

    /// Pro-rata payout for burning `shares`. Allowed on disabled pools.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `shares` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `shares` exceeds the supply.
    pub fn quote_remove_liquidity(&self, shares: Liquidity) -> Result<WithdrawQuote, AmmError> {
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("burn must be non-zero"));
        }
        self.curve.compute_remove_liquidity(&self.reserves(), shares)
    }

    // -- state transitions ----------------------------------------------------

    pub(crate) fn plan_swap(&self, quote: &SwapQuote) -> Result<PoolBalances, AmmError> {
        let mut next = self.balances;
        let side_in = quote.side_in();
        let side_out = quote.side_out();

        let reserve_in = next.reserve_mut(side_in);
        *reserve_in = reserve_in
            .checked_add(&quote.amount_in())
            .ok_or(AmmError::Overflow("swap: input reserve"))?;
        let reserve_out = next.reserve_mut(side_out);
        *reserve_out = reserve_out
            .checked_sub(&quote.reserve_out_debit()?)
            .ok_or(AmmError::InsufficientLiquidity)?;
        let fee_out = next.fee_mut(side_out);
        *fee_out = fee_out
            .checked_add(&quote.admin_fee())
            .ok_or(AmmError::Overflow("swap: admin fee accrual"))?;
        Ok(next)
    }

    pub(crate) fn plan_deposit(&self, quote: &DepositQuote) -> Result<PoolBalances, AmmError> {
        let mut next = self.balances;
        for (side, amount, admin_fee) in [
            (Side::X, quote.amount_x, quote.admin_fee_x),
            (Side::Y, quote.amount_y, quote.admin_fee_y),
        ] {
            let net = amount
                .checked_sub(&admin_fee)
                .ok_or(AmmError::Underflow("deposit: admin fee above amount"))?;
            let reserve = next.reserve_mut(side);
            *reserve = reserve
                .checked_add(&net)
                .ok_or(AmmError::Overflow("deposit: reserve"))?;
            let fee = next.fee_mut(side);
            *fee = fee
                .checked_add(&admin_fee)
                .ok_or(AmmError::Overflow("deposit: admin fee accrual"))?;
        }
        next.lp_supply = next
            .lp_supply
            .checked_add(&quote.shares)
            .ok_or(AmmError::Overflow("deposit: share supply"))?;
        Ok(next)
    }

    pub(crate) fn plan_withdraw(&self, quote: &WithdrawQuote) -> Result<PoolBalances, AmmError> {
        let mut next = self.balances;
        next.reserve_x = next
            .reserve_x
            .checked_sub(&quote.amount_x)
            .ok_or(AmmError::InsufficientLiquidity)?;
        next.reserve_y = next
            .reserve_y
            .checked_sub(&quote.amount_y)
            .ok_or(AmmError::InsufficientLiquidity)?;
        next.lp_supply = next
            .lp_supply
            .checked_sub(&quote.shares)
            .ok_or(AmmError::InsufficientLiquidity)?;
        Ok(next)
    }

    pub(crate) const fn plan_fee_sweep(&self) -> PoolBalances {
        PoolBalances {
            fee_x: Amount::ZERO,
            fee_y: Amount::ZERO,
            ..self.balances
        }
    }

    pub(crate) fn commit(&mut self, next: PoolBalances) {
        self.balances = next;
    }

    pub(crate) fn commit_curve(&mut self, curve: CurveKind) {
        self.curve = curve;
    }

    pub(crate) fn set_disabled_flag(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
