//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use dualcurve_amm::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, BasisPoints, Decimals, DepositQuote, FeeSchedule, Liquidity, Reserves,
    Rounding, Side, SwapQuote, Token, TokenAddress, TokenPair, WithdrawQuote,
};

pub use crate::traits::{CurveSolver, FromConfig};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{CurveTag, PoolConfig};
#[cfg(feature = "piecewise")]
pub use crate::config::PiecewiseConfig;
#[cfg(feature = "stable")]
pub use crate::config::StableConfig;

pub use crate::error::{AmmError, Result};

pub use crate::factory::{PoolKey, PoolRegistry};

pub use crate::platform::{Clock, Ledger, ManualClock, MemoryLedger, SystemClock};

pub use crate::pools::{CurveKind, Pool};
