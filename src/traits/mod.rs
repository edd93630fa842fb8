//! Seams between pool accounting and curve math.
//!
//! [`CurveSolver`] prices swaps and liquidity changes for one curve family;
//! [`FromConfig`] builds a curve from its configuration.

mod curve_solver;
mod from_config;

pub use curve_solver::CurveSolver;
pub use from_config::FromConfig;
