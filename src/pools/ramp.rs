//! Amplification ramp controller of StableSwap pools.
//!
//! `A` moves linearly from `initial_a` at `initial_a_time` to `future_a` at
//! `future_a_time`. Admins start a ramp with
//! [`with_ramp`](StableCurveParams::with_ramp) and freeze it with
//! [`stopped`](StableCurveParams::stopped). Both return the next
//! parameters instead of mutating, so the pool commits only once every
//! check has passed.
//!
//! # Safety Bounds
//!
//! - A new ramp may start no sooner than [`MIN_RAMP_TIME`] after the
//!   previous one started, and must last at least [`MIN_RAMP_TIME`].
//! - The target moves `A` by at most a factor of [`MAX_A_CHANGE`] in
//!   either direction.

use serde::{Deserialize, Serialize};

use super::StableCurveParams;
use crate::config::MAX_A;
use crate::error::AmmError;

/// Minimum ramp duration and minimum spacing between ramp starts, seconds.
pub const MIN_RAMP_TIME: u64 = 86_400;

/// Largest factor by which one ramp may change `A`.
pub const MAX_A_CHANGE: u128 = 10;

/// Whether `A` is moving at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampState {
    /// `A` is constant.
    Stable,
    /// `A` is interpolating towards `future_a`.
    RampInProgress,
}

impl StableCurveParams {
    /// Ramp state at `now`.
    #[must_use]
    pub const fn ramp_state(&self, now: u64) -> RampState {
        if now < self.future_a_time && self.initial_a != self.future_a {
            RampState::RampInProgress
        } else {
            RampState::Stable
        }
    }

    /// Parameters ramping from the current `A` at `now` to `new_future_a`
    /// at `future_time`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::RampTimeViolation`] if the previous ramp started less
    ///   than [`MIN_RAMP_TIME`] ago or the new one is shorter than that.
    /// - [`AmmError::AValueViolation`] if `new_future_a` is outside
    ///   `(0, MAX_A)` or more than [`MAX_A_CHANGE`] times away from the
    ///   current `A`.
    pub fn with_ramp(
        &self,
        new_future_a: u128,
        future_time: u64,
        now: u64,
    ) -> Result<Self, AmmError> {
        let earliest_start = self
            .initial_a_time
            .checked_add(MIN_RAMP_TIME)
            .ok_or(AmmError::Overflow("ramp: start time"))?;
        if now < earliest_start {
            return Err(AmmError::RampTimeViolation(
                "previous ramp started less than MIN_RAMP_TIME ago",
            ));
        }
        let earliest_end = now
            .checked_add(MIN_RAMP_TIME)
            .ok_or(AmmError::Overflow("ramp: end time"))?;
        if future_time < earliest_end {
            return Err(AmmError::RampTimeViolation(
                "ramp shorter than MIN_RAMP_TIME",
            ));
        }

        if new_future_a == 0 || new_future_a >= MAX_A {
            return Err(AmmError::AValueViolation(
                "future A must satisfy 0 < A < MAX_A",
            ));
        }
        let current = self.amplification(now)?;
        let within_bounds = if new_future_a < current {
            current <= new_future_a.saturating_mul(MAX_A_CHANGE)
        } else {
            new_future_a <= current.saturating_mul(MAX_A_CHANGE)
        };
        if !within_bounds {
            return Err(AmmError::AValueViolation(
                "future A changes by more than MAX_A_CHANGE",
            ));
        }

        Ok(Self {
            initial_a: current,
            future_a: new_future_a,
            initial_a_time: now,
            future_a_time: future_time,
            ..*self
        })
    }

    /// Parameters frozen at the current `A`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only for corrupted ramp values.
    pub fn stopped(&self, now: u64) -> Result<Self, AmmError> {
        let current = self.amplification(now)?;
        Ok(Self {
            initial_a: current,
            future_a: current,
            initial_a_time: now,
            future_a_time: now,
            ..*self
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::StableConfig;
    use crate::domain::FeeSchedule;
    use crate::traits::FromConfig;

    const T0: u64 = 1_000;

    fn params(amp: u128) -> StableCurveParams {
        let Ok(cfg) = StableConfig::new(FeeSchedule::default(), amp) else {
            panic!("valid config");
        };
        let Ok(p) = StableCurveParams::from_config(&cfg, T0) else {
            panic!("valid params");
        };
        p
    }

    #[test]
    fn ramp_interpolates_from_current_value() {
        let start = T0 + MIN_RAMP_TIME;
        let Ok(p) = params(100).with_ramp(200, start + 1_000, start) else {
            panic!("expected Ok");
        };
        assert_eq!(p.ramp_state(start), RampState::RampInProgress);
        assert_eq!(p.amplification(start), Ok(100));
        assert_eq!(p.amplification(start + 500), Ok(150));
        assert_eq!(p.amplification(start + 1_000), Ok(200));
        assert_eq!(p.ramp_state(start + 1_000), RampState::Stable);
    }

    #[test]
    fn ramp_too_soon_after_creation() {
        let now = T0 + MIN_RAMP_TIME - 1;
        let Err(AmmError::RampTimeViolation(_)) =
            params(100).with_ramp(200, now + MIN_RAMP_TIME, now)
        else {
            panic!("expected RampTimeViolation");
        };
    }

    #[test]
    fn second_ramp_within_min_ramp_time_fails() {
        let start = T0 + MIN_RAMP_TIME;
        let Ok(p) = params(100).with_ramp(200, start + MIN_RAMP_TIME, start) else {
            panic!("expected Ok");
        };
        let later = start + MIN_RAMP_TIME / 2;
        let Err(AmmError::RampTimeViolation(_)) =
            p.with_ramp(300, later + MIN_RAMP_TIME, later)
        else {
            panic!("expected RampTimeViolation");
        };
    }

    #[test]
    fn ramp_too_short() {
        let start = T0 + MIN_RAMP_TIME;
        let Err(AmmError::RampTimeViolation(_)) =
            params(100).with_ramp(200, start + MIN_RAMP_TIME - 1, start)
        else {
            panic!("expected RampTimeViolation");
        };
    }

    #[test]
    fn a_change_bounds() {
        let start = T0 + MIN_RAMP_TIME;
        let end = start + MIN_RAMP_TIME;
        let p = params(100);
        assert!(p.with_ramp(1_000, end, start).is_ok());
        assert!(p.with_ramp(10, end, start).is_ok());
        let Err(AmmError::AValueViolation(_)) = p.with_ramp(1_001, end, start) else {
            panic!("expected AValueViolation");
        };
        let Err(AmmError::AValueViolation(_)) = p.with_ramp(9, end, start) else {
            panic!("expected AValueViolation");
        };
        let Err(AmmError::AValueViolation(_)) = p.with_ramp(0, end, start) else {
            panic!("expected AValueViolation");
        };
        let Err(AmmError::AValueViolation(_)) = params(500_000).with_ramp(MAX_A, end, start)
        else {
            panic!("expected AValueViolation");
        };
    }

    #[test]
    fn stop_freezes_current_value() {
        let start = T0 + MIN_RAMP_TIME;
        let Ok(p) = params(100).with_ramp(200, start + 1_000, start) else {
            panic!("expected Ok");
        };
        let Ok(frozen) = p.stopped(start + 250) else {
            panic!("expected Ok");
        };
        assert_eq!(frozen.initial_a(), 125);
        assert_eq!(frozen.future_a(), 125);
        assert_eq!(frozen.initial_a_time(), start + 250);
        assert_eq!(frozen.future_a_time(), start + 250);
        assert_eq!(frozen.amplification(start + 10_000), Ok(125));
        assert_eq!(frozen.ramp_state(start + 250), RampState::Stable);
    }
}
