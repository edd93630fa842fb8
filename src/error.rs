//! Unified error type for the curve engine.
//!
//! Every fallible operation in the crate returns [`AmmError`]. Variants are
//! grouped by the layer that raises them:
//!
//! | Layer | Variants |
//! |-------|----------|
//! | Fixed-point arithmetic | `Overflow`, `Underflow`, `DivisionByZero` |
//! | Invariant solvers | `IterateEnd`, `InvalidDerivation`, `InsufficientLiquidity` |
//! | Pool accounting | `AddLiquidityInvalid`, `Precondition`, `InvalidQuantity`, `PoolDisabled` |
//! | Amplification ramps | `RampTimeViolation`, `AValueViolation` |
//! | Access control | `PrivilegeInsufficient`, `Unauthorized` |
//! | Registry | `AlreadyInitialized`, `InvalidTokenPair`, `PoolNotFound` |
//! | Ledger | `InsufficientBalance` |
//! | Validation | `InvalidConfiguration`, `InvalidPrecision`, `InvalidToken` |
//!
//! The static string payloads name the computation or check that failed so
//! logs stay actionable without allocating.

use thiserror::Error;

/// Errors raised by solvers, pool accounting, the registry and the ledger
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// An intermediate value exceeded its integer width.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction went below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// A divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A Newton iteration did not converge within its iteration cap.
    #[error("solver did not converge: {0}")]
    IterateEnd(&'static str),

    /// A deposit cannot be accepted in its current shape.
    #[error("invalid liquidity deposit: {0}")]
    AddLiquidityInvalid(&'static str),

    /// A deposit failed to grow the pool invariant.
    #[error("invariant did not grow: {0}")]
    InvalidDerivation(&'static str),

    /// A caller-supplied bound was not met.
    #[error("precondition failed: {0}")]
    Precondition(&'static str),

    /// A ramp was requested too early or over too short a window.
    #[error("ramp time violation: {0}")]
    RampTimeViolation(&'static str),

    /// A ramp target is out of range or changes too fast.
    #[error("amplification value violation: {0}")]
    AValueViolation(&'static str),

    /// The caller is not the pool administrator.
    #[error("caller is not the pool administrator")]
    PrivilegeInsufficient,

    /// A pool for this pair and curve already exists.
    #[error("pool already initialized for this pair and curve")]
    AlreadyInitialized,

    /// The pair is not ordered, or both sides are the same asset.
    #[error("invalid token pair: {0}")]
    InvalidTokenPair(&'static str),

    /// The pool cannot serve the request from its reserves.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// An account holds less than the requested amount.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A configuration value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A decimal precision is outside its allowed range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A quantity is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A token does not belong to the pool.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// The pool has been disabled by its administrator.
    #[error("pool is disabled")]
    PoolDisabled,

    /// No pool is registered under the requested key.
    #[error("pool not found")]
    PoolNotFound,

    /// A mint or burn authority was used on an asset it does not govern.
    #[error("authority does not govern this asset")]
    Unauthorized,
}

/// Convenience alias used by the domain layer.
pub type Result<T> = core::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = AmmError::IterateEnd("stable invariant D");
        assert_eq!(
            err.to_string(),
            "solver did not converge: stable invariant D"
        );
    }

    #[test]
    fn unit_variants_display() {
        assert_eq!(AmmError::PoolDisabled.to_string(), "pool is disabled");
        assert_eq!(
            AmmError::PrivilegeInsufficient.to_string(),
            "caller is not the pool administrator"
        );
    }

    #[test]
    fn errors_compare_by_payload() {
        assert_eq!(AmmError::Overflow("a"), AmmError::Overflow("a"));
        assert_ne!(AmmError::Overflow("a"), AmmError::Underflow("a"));
    }
}
