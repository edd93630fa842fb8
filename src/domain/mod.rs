//! Value types of the curve engine.
//!
//! Assets, amounts, share counts, fee rates and the quotes a pool produces.
//! All are newtypes or small structs with validated constructors; none of
//! them knows about a particular curve.

mod amount;
mod balance;
mod basis_points;
mod decimals;
mod fee_schedule;
mod liquidity;
mod quote;
mod reserves;
mod rounding;
mod token;
mod token_address;
mod token_pair;

pub use amount::Amount;
pub use balance::Balance;
pub use basis_points::{BPS, BasisPoints};
pub use decimals::Decimals;
pub use fee_schedule::{FEE_DENOMINATOR, FeeSchedule, MAX_ADMIN_FEE, MAX_FEE};
pub use liquidity::Liquidity;
pub use quote::{DepositQuote, SwapQuote, WithdrawQuote};
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use token::Token;
pub use token_address::{AccountId, TokenAddress};
pub use token_pair::{Side, TokenPair};

pub(crate) use fee_schedule::apply_rate;
