//! Top-level pool configuration and the curve tag of a pool key.
//!
//! [`PoolConfig`] is the declarative blueprint handed to
//! [`PoolRegistry::create_pool`](crate::factory::PoolRegistry::create_pool),
//! which matches on it to build the pool's curve:
//!
//! ```text
//! match config {
//!     PoolConfig::Stable(cfg)    => StableCurveParams::from_config(&cfg, now),
//!     PoolConfig::Piecewise(cfg) => PiecewiseCurveParams::from_config(&cfg, now),
//! }
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "piecewise")]
use super::PiecewiseConfig;
#[cfg(feature = "stable")]
use super::StableConfig;
use crate::error::AmmError;

/// Curve family of a pool; the third component of a pool key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CurveTag {
    /// StableSwap with a ramped amplification coefficient.
    Stable,
    /// Three-segment piecewise constant product.
    Piecewise,
}

impl fmt::Display for CurveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => write!(f, "stable"),
            Self::Piecewise => write!(f, "piecewise"),
        }
    }
}

/// Blueprint of any pool.
///
/// # Validation
///
/// Call [`validate()`](PoolConfig::validate) after deserializing; the
/// registry does so before creating a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum PoolConfig {
    /// StableSwap pool.
    #[cfg(feature = "stable")]
    Stable(StableConfig),
    /// Piecewise constant-product pool.
    #[cfg(feature = "piecewise")]
    Piecewise(PiecewiseConfig),
}

impl PoolConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns whatever the variant's `validate()` returns.
    pub fn validate(&self) -> Result<(), AmmError> {
        match self {
            #[cfg(feature = "stable")]
            Self::Stable(cfg) => cfg.validate(),
            #[cfg(feature = "piecewise")]
            Self::Piecewise(cfg) => cfg.validate(),
        }
    }

    /// Curve family of this configuration.
    #[must_use]
    pub const fn tag(&self) -> CurveTag {
        match self {
            #[cfg(feature = "stable")]
            Self::Stable(_) => CurveTag::Stable,
            #[cfg(feature = "piecewise")]
            Self::Piecewise(_) => CurveTag::Piecewise,
        }
    }
}
