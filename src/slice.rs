//! A span of time between a reference instant and a focus instant.

use crate::time::TimeInstant;
use alloc::string::ToString;
use serde_json::{Value, json};

/// The span from `reference` to `focus`, measured against a caller-supplied "now".
///
/// Nothing time-dependent is stored: `elapsed` and `remaining` are pure functions of
/// the instant passed in. Both are clamped to `[0, span]`. For an inverted slice
/// (focus before reference) the upper bound is 0, so both read 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlice<I> {
    reference: I,
    focus: I,
}

impl<I: TimeInstant> TimeSlice<I> {
    pub fn new(reference: I, focus: I) -> Self {
        Self { reference, focus }
    }

    pub fn reference(&self) -> I {
        self.reference
    }

    pub fn focus(&self) -> I {
        self.focus
    }

    /// `focus - reference` in milliseconds.
    pub fn span(&self) -> i64 {
        self.focus.millis_since(self.reference)
    }

    /// Milliseconds since `reference`, clamped to `[0, span]`.
    pub fn elapsed(&self, now: I) -> i64 {
        self.clamp(now.millis_since(self.reference))
    }

    /// Milliseconds until `focus`, clamped to `[0, span]`.
    pub fn remaining(&self, now: I) -> i64 {
        self.clamp(self.focus.millis_since(now))
    }

    /// Snapshot `{reference, focus, span, elapsed, remaining}` as of `now`.
    pub fn to_json(&self, now: I) -> Value {
        json!({
            "reference": self.reference.to_string(),
            "focus": self.focus.to_string(),
            "span": self.span(),
            "elapsed": self.elapsed(now),
            "remaining": self.remaining(now),
        })
    }

    fn clamp(&self, millis: i64) -> i64 {
        millis.max(0).min(self.span().max(0))
    }
}
