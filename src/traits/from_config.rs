//! Construction of curve parameters from their configuration.
//!
//! [`FromConfig`] gives every curve a uniform constructor so the registry
//! can dispatch on [`PoolConfig`](crate::config::PoolConfig) without `dyn`
//! trait objects:
//!
//! ```text
//! PoolConfig::Stable(cfg)    => StableCurveParams::from_config(&cfg, now)
//! PoolConfig::Piecewise(cfg) => PiecewiseCurveParams::from_config(&cfg, now)
//! ```
//!
//! There is no blanket implementation; each pairing is written out.

use crate::error::AmmError;

/// Builds a value from configuration `C` at time `now`.
///
/// Implementations revalidate the configuration; a successfully built
/// value is in a valid initial state. `now` anchors time-dependent state
/// such as the amplification ramp.
pub trait FromConfig<C> {
    /// Creates the value.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if a parameter is out of range.
    /// - [`AmmError::AValueViolation`] for an invalid amplification.
    fn from_config(config: &C, now: u64) -> Result<Self, AmmError>
    where
        Self: Sized;
}
