//! Time abstraction traits for platform-agnostic timing.
//!
//! Components never read a global clock. They sample an injected [`TimeSource`],
//! so every computation within one call is consistent with a single instant.

use core::fmt::Display;

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
///
/// The `Display` form is what snapshots and rendered templates show.
pub trait TimeInstant: Copy + Display {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Signed milliseconds from `earlier` to `self`. Negative when `self` is earlier.
    fn millis_since(&self, earlier: Self) -> i64;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

impl TimeDuration for core::time::Duration {
    const ZERO: Self = core::time::Duration::ZERO;

    fn as_millis(&self) -> u64 {
        u64::try_from(core::time::Duration::as_millis(self)).unwrap_or(u64::MAX)
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }
}

impl TimeInstant for chrono::DateTime<chrono::Utc> {
    type Duration = core::time::Duration;

    fn millis_since(&self, earlier: Self) -> i64 {
        self.signed_duration_since(earlier).num_milliseconds()
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        let delta = chrono::TimeDelta::from_std(duration).ok()?;
        self.checked_add_signed(delta)
    }
}

/// Wall-clock time source backed by [`chrono::Utc::now`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource<chrono::DateTime<chrono::Utc>> for SystemClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }
}
