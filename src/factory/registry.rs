//! Keyed storage of pool records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{CurveTag, PoolConfig};
use crate::domain::{AccountId, Token, TokenAddress, TokenPair};
use crate::error::AmmError;
use crate::platform::Clock;
use crate::pools::{CurveKind, Pool};

#[cfg(any(feature = "stable", feature = "piecewise"))]
use crate::traits::FromConfig;

/// Tag byte of derived share-token addresses.
const LP_TOKEN_TAG: u8 = 0x4C;

/// Tag byte of derived custody accounts.
const CUSTODY_TAG: u8 = 0x43;

/// Identity of a pool: the ordered pair and the curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    /// Asset X, the lower address.
    pub x: TokenAddress,
    /// Asset Y.
    pub y: TokenAddress,
    /// Curve family.
    pub curve: CurveTag,
}

impl PoolKey {
    /// Key of `pair` under `curve`.
    #[must_use]
    pub const fn new(pair: &TokenPair, curve: CurveTag) -> Self {
        Self {
            x: pair.x().address(),
            y: pair.y().address(),
            curve,
        }
    }
}

/// One pool per [`PoolKey`].
///
/// Creating a pool issues its share token, custody account and the
/// mint/burn authorities for the share token; nothing else can create
/// those authorities.
///
/// Derived addresses combine the registry's salt with a per-registry
/// counter. Registries that share one ledger need distinct salts, see
/// [`with_salt`](Self::with_salt).
///
/// # Example
///
/// ```
/// use dualcurve_amm::config::{PoolConfig, StableConfig};
/// use dualcurve_amm::domain::{AccountId, Decimals, FeeSchedule, Token, TokenAddress};
/// use dualcurve_amm::factory::PoolRegistry;
/// use dualcurve_amm::platform::ManualClock;
///
/// let usd_a = Token::new(TokenAddress::from_bytes([1; 32]), Decimals::new(6).expect("ok"));
/// let usd_b = Token::new(TokenAddress::from_bytes([2; 32]), Decimals::new(18).expect("ok"));
/// let fees = FeeSchedule::new(400, 500_000).expect("valid fees");
/// let config = PoolConfig::Stable(StableConfig::new(fees, 100).expect("valid A"));
///
/// let mut registry = PoolRegistry::new();
/// let admin = AccountId::from_bytes([9; 32]);
/// let key = registry
///     .create_pool(&ManualClock::new(0), admin, usd_a, usd_b, &config)
///     .expect("pool created");
///
/// let pool = registry.get(&key).expect("registered");
/// assert_eq!(pool.lp_token().decimals().get(), 18);
/// assert!(registry.create_pool(&ManualClock::new(0), admin, usd_a, usd_b, &config).is_err());
/// ```
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: HashMap<PoolKey, Pool>,
    created: u64,
    salt: u64,
}

impl PoolRegistry {
    /// Empty registry with salt `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry whose derived share tokens and custody accounts live
    /// in the `salt` namespace.
    #[must_use]
    pub fn with_salt(salt: u64) -> Self {
        Self {
            salt,
            ..Self::default()
        }
    }

    /// Namespace of this registry's derived addresses.
    #[must_use]
    pub const fn salt(&self) -> u64 {
        self.salt
    }

    /// Creates the pool of `(token_x, token_y)` under `config`.
    ///
    /// The share token has the finer of the two assets' decimals. A stable
    /// pool's ramp starts frozen at `clock.now()`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTokenPair`] unless `token_x` has the strictly
    ///   lower address.
    /// - [`AmmError::AlreadyInitialized`] if the key is taken.
    /// - Any validation error of `config`.
    pub fn create_pool(
        &mut self,
        clock: &impl Clock,
        admin: AccountId,
        token_x: Token,
        token_y: Token,
        config: &PoolConfig,
    ) -> Result<PoolKey, AmmError> {
        let now = clock.now();
        config.validate()?;
        let pair = TokenPair::new(token_x, token_y)?;
        let key = PoolKey::new(&pair, config.tag());
        if self.pools.contains_key(&key) {
            warn!(curve = %key.curve, "pool already exists");
            return Err(AmmError::AlreadyInitialized);
        }

        let curve = match config {
            #[cfg(feature = "stable")]
            PoolConfig::Stable(cfg) => {
                CurveKind::Stable(crate::pools::StableCurveParams::from_config(cfg, now)?)
            }
            #[cfg(feature = "piecewise")]
            PoolConfig::Piecewise(cfg) => {
                CurveKind::Piecewise(crate::pools::PiecewiseCurveParams::from_config(cfg, now)?)
            }
        };

        let index = self
            .created
            .checked_add(1)
            .ok_or(AmmError::Overflow("registry: pool index"))?;
        let lp_decimals = pair.x().decimals().finest(pair.y().decimals());
        let lp_token = Token::new(
            TokenAddress::derived(LP_TOKEN_TAG, self.salt, index),
            lp_decimals,
        );
        let account = AccountId::from_bytes(
            TokenAddress::derived(CUSTODY_TAG, self.salt, index).as_bytes(),
        );

        let pool = Pool::new(pair, curve, lp_token, account, admin)?;
        self.pools.insert(key, pool);
        self.created = index;

        info!(
            curve = %key.curve,
            x = %key.x,
            y = %key.y,
            lp_token = %lp_token.address(),
            "pool created"
        );
        Ok(key)
    }

    /// The pool under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no pool has that key.
    pub fn get(&self, key: &PoolKey) -> Result<&Pool, AmmError> {
        self.pools.get(key).ok_or(AmmError::PoolNotFound)
    }

    /// The pool under `key`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no pool has that key.
    pub fn get_mut(&mut self, key: &PoolKey) -> Result<&mut Pool, AmmError> {
        self.pools.get_mut(key).ok_or(AmmError::PoolNotFound)
    }

    /// Whether a pool exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &PoolKey) -> bool {
        self.pools.contains_key(key)
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether the registry holds no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
