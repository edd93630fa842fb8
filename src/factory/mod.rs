//! Pool creation and keyed storage.
//!
//! [`PoolRegistry`] holds at most one pool per [`PoolKey`] (ordered asset
//! pair plus curve family). It validates the [`PoolConfig`], builds the
//! curve through [`FromConfig`] and issues the pool's share token, custody
//! account and mint/burn authorities.
//!
//! # Feature Gating
//!
//! Each match arm on [`PoolConfig`] is gated behind its curve's feature,
//! as are the variants themselves.
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`FromConfig`]: crate::traits::FromConfig

mod registry;

pub use registry::{PoolKey, PoolRegistry};
