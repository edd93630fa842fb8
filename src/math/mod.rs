//! Integer arithmetic and curve solvers.
//!
//! Everything here is pure: no pool state, no ledger, no clock. Solvers take
//! normalized balances and return normalized balances.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `checked` | [`CheckedArithmetic`] over `u128`, [`U256`], `Amount`, `Liquidity`; [`narrow_u128`], [`isqrt`], [`mul_div`], [`pro_rata`] |
//! | `rounding` | [`div_round`] |
//! | `stable` | StableSwap `D` / `y` Newton solvers and amplification interpolation (`stable` feature) |
//! | `piecewise` | three-segment curve evaluation and liquidity amounts (`piecewise` feature) |

mod checked;
mod rounding;

#[cfg(feature = "piecewise")]
pub mod piecewise;
#[cfg(feature = "stable")]
pub mod stable;

pub use checked::{CheckedArithmetic, U256, isqrt, mul_div, narrow_u128, pro_rata};
pub use rounding::div_round;

#[cfg(feature = "piecewise")]
pub use piecewise::{BaseCurve, Segment, SegmentShape};
#[cfg(feature = "stable")]
pub use stable::{A_PRECISION, compute_d, compute_y, compute_y_d, current_amplification};
