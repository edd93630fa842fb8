//! Pool accounting and the feature-gated curve families.
//!
//! A [`Pool`] record owns reserves, admin-fee accruals and the share
//! supply; its [`CurveKind`] prices every request through
//! [`CurveSolver`](crate::traits::CurveSolver). The ledger-integrated
//! operations (`swap`, `add_liquidity`, `remove_liquidity` and the admin
//! actions) live in [`contract`].
//!
//! # Curves
//!
//! | Feature | Curve | Style |
//! |---------|-------|-------|
//! | `stable` | [`StableCurveParams`] | Curve StableSwap with ramped `A` |
//! | `piecewise` | [`PiecewiseCurveParams`] | three-segment constant product |

pub mod contract;
mod curve_kind;
mod pool;

#[cfg(feature = "piecewise")]
mod piecewise;
#[cfg(feature = "stable")]
mod ramp;
#[cfg(feature = "stable")]
mod stable;

#[cfg(all(test, feature = "stable", feature = "piecewise"))]
mod proptest_properties;

pub use curve_kind::CurveKind;
pub use pool::Pool;

#[cfg(feature = "piecewise")]
pub use piecewise::PiecewiseCurveParams;
#[cfg(feature = "stable")]
pub use ramp::{MAX_A_CHANGE, MIN_RAMP_TIME, RampState};
#[cfg(feature = "stable")]
pub use stable::StableCurveParams;
