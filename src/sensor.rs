//! Lightweight countdown between two anchor instants.

use crate::time::{TimeInstant, TimeSource};
use crate::tracker::ProgressTracker;
use crate::types::Label;
use alloc::string::ToString;
use serde_json::{Value, json};

/// Tracks the distance to `b` on a tracker sized to the `a`-`b` span.
///
/// Simpler than [`Timekeeper`](crate::Timekeeper): no hooks, no scheduling, and no
/// clamping. Before `a` the value exceeds `max`; after `b` it goes negative.
pub struct TimeSensor<'t, I: TimeInstant, T: TimeSource<I>> {
    focus: Label,
    a: I,
    b: I,
    tracker: ProgressTracker,
    time_source: &'t T,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> TimeSensor<'t, I, T> {
    /// Creates a sensor whose tracker spans `[0, b - a]` and starts at 0.
    pub fn new(focus: impl Into<Label>, a: I, b: I, time_source: &'t T) -> Self {
        Self {
            focus: focus.into(),
            a,
            b,
            tracker: ProgressTracker::with_max(b.millis_since(a), 0),
            time_source,
        }
    }

    /// Pushes the milliseconds from now until `b` into the tracker.
    pub fn tick(&mut self) {
        let now = self.time_source.now();
        let value = self.b.millis_since(now);
        self.tracker.set_value(value);
        log::trace!("sensor tick: {} ms to b", value);
    }

    /// Snapshot `{params: {focus, a, b}, tracker}`.
    pub fn to_json(&self) -> Value {
        json!({
            "params": {
                "focus": self.focus,
                "a": self.a.to_string(),
                "b": self.b.to_string(),
            },
            "tracker": self.tracker.to_json(),
        })
    }

    pub fn focus(&self) -> &Label {
        &self.focus
    }

    pub fn a(&self) -> I {
        self.a
    }

    pub fn b(&self) -> I {
        self.b
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }
}
