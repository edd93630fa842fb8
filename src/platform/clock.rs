//! Time source.

use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic time in seconds.
///
/// Pool operations read the clock once at their start and use that instant
/// throughout.
pub trait Clock {
    /// Current time in seconds.
    fn now(&self) -> u64;
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// A clock that only moves when told to.
///
/// # Examples
///
/// ```
/// use dualcurve_amm::platform::{Clock, ManualClock};
///
/// let mut clock = ManualClock::new(1_000);
/// clock.advance(86_400);
/// assert_eq!(clock.now(), 87_400);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    /// A clock stopped at `now`.
    #[must_use]
    pub const fn new(now: u64) -> Self {
        Self { now }
    }

    /// Moves the clock to `now`.
    pub fn set(&mut self, now: u64) {
        self.now = now;
    }

    /// Moves the clock forward by `seconds`, saturating.
    pub fn advance(&mut self, seconds: u64) {
        self.now = self.now.saturating_add(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now
    }
}
