//! Shared test infrastructure for countdown-keeper integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use chrono::{DateTime, TimeZone, Utc};
use countdown_keeper::{TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing (milliseconds on an arbitrary timeline)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub i64);

impl core::fmt::Display for TestInstant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "t+{}", self.0)
    }
}

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn millis_since(&self, earlier: Self) -> i64 {
        self.0 - earlier.0
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        let millis = i64::try_from(duration.0).ok()?;
        self.0.checked_add(millis).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Sources
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::at(0)
    }

    pub fn at(millis: i64) -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(millis)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: i64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

/// Calendar clock frozen at a chosen UTC instant
pub struct FrozenClock {
    current_time: core::cell::Cell<DateTime<Utc>>,
}

impl FrozenClock {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            current_time: core::cell::Cell::new(time),
        }
    }

    pub fn set_time(&self, time: DateTime<Utc>) {
        self.current_time.set(time);
    }
}

impl TimeSource<DateTime<Utc>> for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Midnight UTC on the given date
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}
