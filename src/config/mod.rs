//! Declarative pool blueprints.
//!
//! [`PoolConfig`] wraps one per-curve configuration struct. Each struct
//! validates on construction and exposes `validate()` for values that
//! arrive through `serde`.

mod pool_config;

#[cfg(feature = "piecewise")]
mod piecewise;
#[cfg(feature = "stable")]
mod stable;

pub use pool_config::{CurveTag, PoolConfig};

#[cfg(feature = "piecewise")]
pub use piecewise::PiecewiseConfig;
#[cfg(feature = "stable")]
pub use stable::{MAX_A, StableConfig};
