//! # Dual-curve AMM
//!
//! Pricing and liquidity-accounting engine for two-asset pools on one of
//! two curve families:
//!
//! - **StableSwap** (Curve style) with a time-ramped amplification
//!   coefficient, for pegged assets (`stable` feature)
//! - **Piecewise constant product**: a low-slippage middle band with
//!   steeper tails on both sides (`piecewise` feature)
//!
//! All math is integer-only. Newton iterations for `D` and `y` are bounded;
//! intermediates run in 256 bits and every narrowing is checked.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `stable` | yes | StableSwap curve and amplification ramp |
//! | `piecewise` | yes | three-segment piecewise curve |
//! | `all-curves` | yes | both of the above |
//!
//! # Quick Start
//!
//! ```rust
//! use dualcurve_amm::config::{PoolConfig, StableConfig};
//! use dualcurve_amm::domain::{
//!     AccountId, Amount, Decimals, FeeSchedule, Liquidity, Side, Token, TokenAddress,
//! };
//! use dualcurve_amm::factory::PoolRegistry;
//! use dualcurve_amm::platform::{ManualClock, MemoryLedger};
//!
//! // 1. Two pegged tokens
//! let usdc = Token::new(TokenAddress::from_bytes([1; 32]), Decimals::new(6).expect("ok"));
//! let usdt = Token::new(TokenAddress::from_bytes([2; 32]), Decimals::new(6).expect("ok"));
//!
//! // 2. A StableSwap pool with A = 100, 0.04% fee, half of it to the admin
//! let fees = FeeSchedule::new(400, 500_000).expect("valid fees");
//! let config = PoolConfig::Stable(StableConfig::new(fees, 100).expect("valid A"));
//!
//! let clock = ManualClock::new(1_700_000_000);
//! let admin = AccountId::from_bytes([0xAD; 32]);
//! let mut registry = PoolRegistry::new();
//! let key = registry
//!     .create_pool(&clock, admin, usdc, usdt, &config)
//!     .expect("pool created");
//!
//! // 3. Fund a trader and provide liquidity
//! let alice = AccountId::from_bytes([0xA1; 32]);
//! let mut ledger = MemoryLedger::new();
//! ledger.credit(&alice, &usdc.address(), Amount::new(3_000_000)).expect("credit");
//! ledger.credit(&alice, &usdt.address(), Amount::new(2_000_000)).expect("credit");
//!
//! let pool = registry.get_mut(&key).expect("registered");
//! let deposit = pool
//!     .add_liquidity(
//!         &mut ledger, &clock, &alice,
//!         Amount::new(2_000_000), Amount::new(2_000_000), Liquidity::ZERO,
//!     )
//!     .expect("deposit");
//! assert_eq!(deposit.shares, Liquidity::new(4_000_000));
//!
//! // 4. Swap close to 1:1
//! let quote = pool
//!     .swap(&mut ledger, &clock, &alice, Side::X, Amount::new(10_000), Amount::new(9_900))
//!     .expect("swap");
//! assert!(quote.amount_out().get() > 9_900);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  PoolConfig + PoolRegistry, Ledger + Clock
//! └──────┬───────┘
//!        │ create_pool / get_mut
//!        ▼
//! ┌──────────────┐
//! │    Pool       │  reserves, admin fees, share supply, ledger transfers
//! └──────┬───────┘
//!        │ CurveKind (enum dispatch) → CurveSolver
//!        ▼
//! ┌──────────────┐
//! │    Curves     │  StableCurveParams (+ ramp), PiecewiseCurveParams
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Math       │  checked u128/U256, D/y solvers, piecewise segments
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Liquidity`](domain::Liquidity), [`FeeSchedule`](domain::FeeSchedule), quotes |
//! | [`traits`] | [`CurveSolver`](traits::CurveSolver), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Declarative blueprints: [`PoolConfig`](config::PoolConfig) and per-curve structs |
//! | [`pools`] | [`Pool`](pools::Pool) accounting, curve parameters, ramp controller |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) keyed pool storage |
//! | [`platform`] | [`Ledger`](platform::Ledger) and [`Clock`](platform::Clock) boundaries with in-memory doubles |
//! | [`math`] | Checked arithmetic and curve solvers |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod platform;
pub mod pools;
pub mod prelude;
pub mod traits;
