//! Ledger-integrated pool operations.
//!
//! Every operation follows the same sequence:
//!
//! 1. Read the clock once.
//! 2. Quote against the current snapshot and plan the next balances.
//!    Nothing has moved yet, so any error here leaves no trace.
//! 3. Take every fallible ledger step (withdrawals and the mint) while
//!    holding the resulting [`Balance`](crate::domain::Balance) values.
//!    If one fails, the balances already taken go back where they came
//!    from.
//! 4. Deposit the balances, which cannot fail, and commit the plan.

use tracing::{info, warn};

use super::Pool;
#[cfg(feature = "stable")]
use super::CurveKind;
use crate::domain::{AccountId, Amount, DepositQuote, Liquidity, Side, SwapQuote, WithdrawQuote};
use crate::error::AmmError;
use crate::platform::{Clock, Ledger};

impl Pool {
    fn ensure_admin(&self, caller: &AccountId, action: &'static str) -> Result<(), AmmError> {
        if *caller != self.admin() {
            warn!(action, "admin action rejected: caller is not the pool admin");
            return Err(AmmError::PrivilegeInsufficient);
        }
        Ok(())
    }

    /// Sells `amount_in` of `side_in` from `trader` for the other asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Precondition`] if the net output is below `min_out`.
    /// - [`AmmError::InsufficientBalance`] if `trader` cannot pay.
    /// - Any error of [`quote_swap`](Pool::quote_swap).
    pub fn swap(
        &mut self,
        ledger: &mut impl Ledger,
        clock: &impl Clock,
        trader: &AccountId,
        side_in: Side,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<SwapQuote, AmmError> {
        let now = clock.now();
        let quote = self.quote_swap(side_in, amount_in, now)?;
        if quote.amount_out() < min_out {
            return Err(AmmError::Precondition("swap: output below minimum"));
        }
        let next = self.plan_swap(&quote)?;

        let account = self.account();
        let asset_in = self.pair().token(side_in).address();
        let asset_out = self.pair().token(quote.side_out()).address();

        let input = ledger.withdraw(trader, &asset_in, amount_in)?;
        let output = match ledger.withdraw(&account, &asset_out, quote.amount_out()) {
            Ok(balance) => balance,
            Err(e) => {
                ledger.deposit(trader, input);
                return Err(e);
            }
        };
        ledger.deposit(&account, input);
        ledger.deposit(trader, output);
        self.commit(next);

        info!(
            ?side_in,
            amount_in = amount_in.get(),
            amount_out = quote.amount_out().get(),
            fee = quote.fee().get(),
            admin_fee = quote.admin_fee().get(),
            "swap executed"
        );
        Ok(quote)
    }

    /// Deposits up to `amount_x` and `amount_y` from `provider` and mints
    /// shares to it.
    ///
    /// Only the accepted amounts leave the provider; the quote's refunds
    /// are what stays behind. A deposit too small to mint a share moves
    /// nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Precondition`] if fewer than `min_shares` would be
    ///   minted.
    /// - [`AmmError::InsufficientBalance`] if `provider` cannot pay.
    /// - Any error of [`quote_add_liquidity`](Pool::quote_add_liquidity).
    pub fn add_liquidity(
        &mut self,
        ledger: &mut impl Ledger,
        clock: &impl Clock,
        provider: &AccountId,
        amount_x: Amount,
        amount_y: Amount,
        min_shares: Liquidity,
    ) -> Result<DepositQuote, AmmError> {
        let now = clock.now();
        let quote = self.quote_add_liquidity(amount_x, amount_y, now)?;
        if quote.shares < min_shares {
            return Err(AmmError::Precondition("deposit: shares below minimum"));
        }
        if quote.is_noop() {
            return Ok(quote);
        }
        let next = self.plan_deposit(&quote)?;

        let account = self.account();
        let asset_x = self.pair().x().address();
        let asset_y = self.pair().y().address();

        let in_x = ledger.withdraw(provider, &asset_x, quote.amount_x)?;
        let in_y = match ledger.withdraw(provider, &asset_y, quote.amount_y) {
            Ok(balance) => balance,
            Err(e) => {
                ledger.deposit(provider, in_x);
                return Err(e);
            }
        };
        let minted = match ledger.mint(&self.mint_authority, Amount::new(quote.shares.get())) {
            Ok(balance) => balance,
            Err(e) => {
                ledger.deposit(provider, in_x);
                ledger.deposit(provider, in_y);
                return Err(e);
            }
        };
        ledger.deposit(&account, in_x);
        ledger.deposit(&account, in_y);
        ledger.deposit(provider, minted);
        self.commit(next);

        info!(
            amount_x = quote.amount_x.get(),
            amount_y = quote.amount_y.get(),
            refund_x = quote.refund_x.get(),
            refund_y = quote.refund_y.get(),
            shares = quote.shares.get(),
            "liquidity added"
        );
        Ok(quote)
    }

    /// Burns `shares` of `provider` for its pro-rata part of both
    /// reserves. Works on disabled pools.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Precondition`] unless each payout is strictly greater
    ///   than its minimum.
    /// - [`AmmError::InsufficientBalance`] if `provider` holds fewer shares.
    /// - Any error of [`quote_remove_liquidity`](Pool::quote_remove_liquidity).
    pub fn remove_liquidity(
        &mut self,
        ledger: &mut impl Ledger,
        provider: &AccountId,
        shares: Liquidity,
        min_x: Amount,
        min_y: Amount,
    ) -> Result<WithdrawQuote, AmmError> {
        let quote = self.quote_remove_liquidity(shares)?;
        if quote.amount_x <= min_x || quote.amount_y <= min_y {
            return Err(AmmError::Precondition(
                "withdraw: payout not above minimum",
            ));
        }
        let next = self.plan_withdraw(&quote)?;

        let account = self.account();
        let asset_x = self.pair().x().address();
        let asset_y = self.pair().y().address();
        let lp = self.lp_token().address();

        let burned = ledger.withdraw(provider, &lp, Amount::new(shares.get()))?;
        let out_x = match ledger.withdraw(&account, &asset_x, quote.amount_x) {
            Ok(balance) => balance,
            Err(e) => {
                ledger.deposit(provider, burned);
                return Err(e);
            }
        };
        let out_y = match ledger.withdraw(&account, &asset_y, quote.amount_y) {
            Ok(balance) => balance,
            Err(e) => {
                ledger.deposit(&account, out_x);
                ledger.deposit(provider, burned);
                return Err(e);
            }
        };
        // `burned` was withdrawn in the share token, so the burn cannot
        // mismatch the authority
        if let Err(e) = ledger.burn(&self.burn_authority, burned) {
            ledger.deposit(&account, out_x);
            ledger.deposit(&account, out_y);
            return Err(e);
        }
        ledger.deposit(provider, out_x);
        ledger.deposit(provider, out_y);
        self.commit(next);

        info!(
            shares = shares.get(),
            amount_x = quote.amount_x.get(),
            amount_y = quote.amount_y.get(),
            "liquidity removed"
        );
        Ok(quote)
    }

    /// Moves the accrued admin fees to the admin and returns `(x, y)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PrivilegeInsufficient`] if `caller` is not the admin.
    /// - [`AmmError::InsufficientBalance`] if custody does not cover the
    ///   accruals.
    pub fn withdraw_admin_fees(
        &mut self,
        ledger: &mut impl Ledger,
        caller: &AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        self.ensure_admin(caller, "withdraw_admin_fees")?;
        let fee_x = self.admin_fees(Side::X);
        let fee_y = self.admin_fees(Side::Y);
        let next = self.plan_fee_sweep();

        let account = self.account();
        let asset_x = self.pair().x().address();
        let asset_y = self.pair().y().address();

        let out_x = ledger.withdraw(&account, &asset_x, fee_x)?;
        let out_y = match ledger.withdraw(&account, &asset_y, fee_y) {
            Ok(balance) => balance,
            Err(e) => {
                ledger.deposit(&account, out_x);
                return Err(e);
            }
        };
        ledger.deposit(caller, out_x);
        ledger.deposit(caller, out_y);
        self.commit(next);

        info!(fee_x = fee_x.get(), fee_y = fee_y.get(), "admin fees withdrawn");
        Ok((fee_x, fee_y))
    }

    /// Suspends or resumes swaps and deposits.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PrivilegeInsufficient`] if `caller` is not the
    /// admin.
    pub fn set_disabled(&mut self, caller: &AccountId, disabled: bool) -> Result<(), AmmError> {
        self.ensure_admin(caller, "set_disabled")?;
        self.set_disabled_flag(disabled);
        info!(disabled, "pool status changed");
        Ok(())
    }

    /// Starts ramping `A` to `new_future_a`, reached at `future_time`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PrivilegeInsufficient`] if `caller` is not the admin.
    /// - [`AmmError::InvalidConfiguration`] for a non-stable pool.
    /// - [`AmmError::RampTimeViolation`] or [`AmmError::AValueViolation`],
    ///   see [`StableCurveParams::with_ramp`](super::StableCurveParams::with_ramp).
    #[cfg(feature = "stable")]
    pub fn ramp_amplification(
        &mut self,
        clock: &impl Clock,
        caller: &AccountId,
        new_future_a: u128,
        future_time: u64,
    ) -> Result<(), AmmError> {
        let now = clock.now();
        self.ensure_admin(caller, "ramp_amplification")?;
        let next = self
            .curve()
            .as_stable()?
            .with_ramp(new_future_a, future_time, now)
            .inspect_err(|e| warn!(error = %e, "amplification ramp rejected"))?;
        self.commit_curve(CurveKind::Stable(next));
        info!(
            initial_a = next.initial_a(),
            future_a = next.future_a(),
            future_time,
            "amplification ramp started"
        );
        Ok(())
    }

    /// Freezes `A` at its current value.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PrivilegeInsufficient`] if `caller` is not the admin.
    /// - [`AmmError::InvalidConfiguration`] for a non-stable pool.
    #[cfg(feature = "stable")]
    pub fn stop_ramp(&mut self, clock: &impl Clock, caller: &AccountId) -> Result<(), AmmError> {
        let now = clock.now();
        self.ensure_admin(caller, "stop_ramp")?;
        let next = self.curve().as_stable()?.stopped(now)?;
        self.commit_curve(CurveKind::Stable(next));
        info!(a = next.initial_a(), "amplification ramp stopped");
        Ok(())
    }
}
