//! Priced outcomes of swaps and liquidity changes.
//!
//! A quote is computed against a snapshot of a pool without mutating it.
//! The pool operations in [`pools::contract`](crate::pools::contract) commit
//! exactly what a quote describes, so a quote obtained from one of the
//! `quote_*` methods of [`Pool`](crate::pools::Pool) is what the matching
//! operation would do at the same instant.

use serde::{Deserialize, Serialize};

use super::{Amount, FeeSchedule, Liquidity, Side};
use crate::error::AmmError;

/// Outcome of a swap.
///
/// # Invariants
///
/// - `fee ≤ gross_out` and `admin_fee ≤ fee`.
/// - `amount_out = gross_out − fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapQuote {
    side_in: Side,
    amount_in: Amount,
    gross_out: Amount,
    fee: Amount,
    admin_fee: Amount,
    amount_out: Amount,
}

impl SwapQuote {
    /// Splits a curve's gross output into trader output, LP fee and admin
    /// accrual.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a fee product overflows.
    pub fn from_gross(
        side_in: Side,
        amount_in: Amount,
        gross_out: Amount,
        fees: &FeeSchedule,
    ) -> crate::error::Result<Self> {
        let fee = fees.trading_fee(gross_out)?;
        let admin_fee = fees.admin_share(fee)?;
        let amount_out = gross_out
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("swap: fee exceeds gross output"))?;
        Ok(Self {
            side_in,
            amount_in,
            gross_out,
            fee,
            admin_fee,
            amount_out,
        })
    }

    /// Side the trader pays in.
    #[must_use]
    pub const fn side_in(&self) -> Side {
        self.side_in
    }

    /// Side the trader receives.
    #[must_use]
    pub const fn side_out(&self) -> Side {
        self.side_in.other()
    }

    /// Amount the trader pays in.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Curve output before fees.
    pub const fn gross_out(&self) -> Amount {
        self.gross_out
    }

    /// Total fee withheld from the gross output.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Part of the fee accrued to the administrator.
    pub const fn admin_fee(&self) -> Amount {
        self.admin_fee
    }

    /// Amount the trader receives.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// How much leaves the output reserve: the trader's output plus the
    /// admin accrual. The LP part of the fee stays in the reserve.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on overflow.
    pub fn reserve_out_debit(&self) -> crate::error::Result<Amount> {
        self.amount_out
            .checked_add(&self.admin_fee)
            .ok_or(AmmError::Overflow("swap: reserve debit"))
    }
}

/// Outcome of a deposit.
///
/// `amount_*` are the amounts actually taken into the pool; `refund_*` the
/// part of the caller's offer that is handed back. `admin_fee_*` is the part
/// of the accepted amount routed to the admin accrual rather than the
/// reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DepositQuote {
    /// Accepted `X` amount.
    pub amount_x: Amount,
    /// Accepted `Y` amount.
    pub amount_y: Amount,
    /// Admin accrual carved out of `amount_x`.
    pub admin_fee_x: Amount,
    /// Admin accrual carved out of `amount_y`.
    pub admin_fee_y: Amount,
    /// Unused `X` returned to the caller.
    pub refund_x: Amount,
    /// Unused `Y` returned to the caller.
    pub refund_y: Amount,
    /// Shares minted.
    pub shares: Liquidity,
}

impl DepositQuote {
    /// A deposit that mints nothing and hands everything back.
    pub const fn refund_all(offer_x: Amount, offer_y: Amount) -> Self {
        Self {
            amount_x: Amount::ZERO,
            amount_y: Amount::ZERO,
            admin_fee_x: Amount::ZERO,
            admin_fee_y: Amount::ZERO,
            refund_x: offer_x,
            refund_y: offer_y,
            shares: Liquidity::ZERO,
        }
    }

    /// `true` when the deposit would not change the pool.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.shares.is_zero()
    }
}

/// Outcome of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WithdrawQuote {
    /// `X` paid out.
    pub amount_x: Amount,
    /// `Y` paid out.
    pub amount_y: Amount,
    /// Shares burned.
    pub shares: Liquidity,
}
