//! Trading and admin fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::mul_div;

/// Denominator of every fee rate (`10^6` = 100%).
pub const FEE_DENOMINATOR: u64 = 1_000_000;

/// Largest accepted trading fee (50%).
pub const MAX_FEE: u64 = 500_000;

/// Largest accepted admin share of the fee (100%).
pub const MAX_ADMIN_FEE: u64 = 1_000_000;

/// Fee rates of a pool.
///
/// `fee` is charged on the gross swap output; `admin_fee` is the share of
/// that fee routed to the administrator's accrual buckets instead of staying
/// in the reserves for liquidity providers. Both are parts of
/// [`FEE_DENOMINATOR`].
///
/// # Examples
///
/// ```
/// use dualcurve_amm::domain::{Amount, FeeSchedule};
///
/// // 0.04% trading fee, half of it to the admin.
/// let fees = FeeSchedule::new(400, 500_000).expect("valid rates");
/// let fee = fees.trading_fee(Amount::new(1_000_000)).expect("no overflow");
/// assert_eq!(fee, Amount::new(400));
/// assert_eq!(fees.admin_share(fee).expect("no overflow"), Amount::new(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FeeSchedule {
    fee: u64,
    admin_fee: u64,
}

impl FeeSchedule {
    /// Creates a validated fee schedule.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `fee > MAX_FEE` or
    /// `admin_fee > MAX_ADMIN_FEE`.
    pub const fn new(fee: u64, admin_fee: u64) -> Result<Self, AmmError> {
        let schedule = Self { fee, admin_fee };
        match schedule.validate() {
            Ok(()) => Ok(schedule),
            Err(e) => Err(e),
        }
    }

    /// Re-checks the rate bounds, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on an out-of-range rate.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.fee > MAX_FEE {
            return Err(AmmError::InvalidConfiguration("fee exceeds MAX_FEE"));
        }
        if self.admin_fee > MAX_ADMIN_FEE {
            return Err(AmmError::InvalidConfiguration(
                "admin fee exceeds MAX_ADMIN_FEE",
            ));
        }
        Ok(())
    }

    /// Trading fee rate.
    #[must_use]
    pub const fn fee(&self) -> u64 {
        self.fee
    }

    /// Admin share of the trading fee.
    #[must_use]
    pub const fn admin_fee(&self) -> u64 {
        self.admin_fee
    }

    /// Fee rate charged on the imbalanced part of a two-asset deposit:
    /// `fee · n / (4 · (n − 1))` with `n = 2`.
    #[must_use]
    pub const fn imbalance_fee(&self) -> u64 {
        self.fee * 2 / 4
    }

    /// `amount · fee / FEE_DENOMINATOR`, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only for a rate above
    /// [`FEE_DENOMINATOR`] on an amount near `u128::MAX`.
    pub fn trading_fee(&self, amount: Amount) -> Result<Amount, AmmError> {
        apply_rate(amount, self.fee)
    }

    /// `fee_amount · admin_fee / FEE_DENOMINATOR`, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only for a rate above
    /// [`FEE_DENOMINATOR`] on an amount near `u128::MAX`.
    pub fn admin_share(&self, fee_amount: Amount) -> Result<Amount, AmmError> {
        apply_rate(fee_amount, self.admin_fee)
    }
}

/// `amount · rate / FEE_DENOMINATOR`, truncating, with a 256-bit product.
pub(crate) fn apply_rate(amount: Amount, rate: u64) -> Result<Amount, AmmError> {
    mul_div(
        amount.get(),
        u128::from(rate),
        u128::from(FEE_DENOMINATOR),
        Rounding::Down,
    )
    .map(Amount::new)
}

impl fmt::Display for FeeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fee={}/{FEE_DENOMINATOR} admin={}/{FEE_DENOMINATOR}", self.fee, self.admin_fee)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fee_above_max() {
        let Err(AmmError::InvalidConfiguration(_)) = FeeSchedule::new(MAX_FEE + 1, 0) else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn rejects_admin_fee_above_max() {
        let Err(AmmError::InvalidConfiguration(_)) = FeeSchedule::new(0, MAX_ADMIN_FEE + 1)
        else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn accepts_bounds() {
        assert!(FeeSchedule::new(MAX_FEE, MAX_ADMIN_FEE).is_ok());
        assert!(FeeSchedule::new(0, 0).is_ok());
    }

    #[test]
    fn imbalance_fee_is_half() {
        let Ok(fees) = FeeSchedule::new(4_000, 0) else {
            panic!("valid");
        };
        assert_eq!(fees.imbalance_fee(), 2_000);
    }

    #[test]
    fn trading_fee_truncates() {
        let Ok(fees) = FeeSchedule::new(3_000, 0) else {
            panic!("valid");
        };
        // 999 * 0.003 = 2.997
        assert_eq!(fees.trading_fee(Amount::new(999)), Ok(Amount::new(2)));
    }

    #[test]
    fn admin_share_of_fee() {
        let Ok(fees) = FeeSchedule::new(3_000, 250_000) else {
            panic!("valid");
        };
        assert_eq!(fees.admin_share(Amount::new(1_000)), Ok(Amount::new(250)));
    }

    #[test]
    fn fees_on_amounts_near_u128_max() {
        let Ok(fees) = FeeSchedule::new(3_000, MAX_ADMIN_FEE) else {
            panic!("valid");
        };
        let large = Amount::new(u128::MAX / 10);
        assert_eq!(
            fees.trading_fee(large),
            Ok(Amount::new(102_084_710_076_281_539_039_012_382_229_530_463))
        );
        assert_eq!(fees.admin_share(Amount::MAX), Ok(Amount::MAX));

        let Ok(tiny) = FeeSchedule::new(2, 0) else {
            panic!("valid");
        };
        assert_eq!(
            tiny.trading_fee(Amount::MAX),
            Ok(Amount::new(680_564_733_841_876_926_926_749_214_863_536))
        );
    }
}
