//! Bounded progress value with a derived percentage.

use alloc::boxed::Box;
use serde_json::{Value, json};

/// Where a tracker reads its current value from.
pub enum ProgressValue {
    /// A stored measurement, replaced by [`ProgressTracker::set_value`].
    Fixed(i64),
    /// Recomputed on every read.
    Computed(Box<dyn Fn() -> i64>),
}

impl core::fmt::Debug for ProgressValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProgressValue::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            ProgressValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A numeric range `[min, max]` and a current value.
///
/// The range is fixed at construction. Values outside the range are accepted
/// as-is, so `percent` may fall outside 0-100.
#[derive(Debug)]
pub struct ProgressTracker {
    min: i64,
    max: i64,
    value: ProgressValue,
}

impl ProgressTracker {
    /// Creates a tracker over `[min, max]` holding `value`.
    pub fn new(min: i64, max: i64, value: i64) -> Self {
        Self {
            min,
            max,
            value: ProgressValue::Fixed(value),
        }
    }

    /// Creates a tracker over `[0, max]`.
    pub fn with_max(max: i64, value: i64) -> Self {
        Self::new(0, max, value)
    }

    /// Creates a tracker whose value is produced by `accessor` on every read.
    pub fn with_accessor(min: i64, max: i64, accessor: impl Fn() -> i64 + 'static) -> Self {
        Self {
            min,
            max,
            value: ProgressValue::Computed(Box::new(accessor)),
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns the current value, invoking the accessor if one is installed.
    pub fn value(&self) -> i64 {
        match &self.value {
            ProgressValue::Fixed(value) => *value,
            ProgressValue::Computed(accessor) => accessor(),
        }
    }

    /// Stores `value` as the current measurement, replacing any accessor.
    pub fn set_value(&mut self, value: i64) {
        self.value = ProgressValue::Fixed(value);
    }

    /// `round(100 * (value - min) / (max - min))`, halves rounding up.
    ///
    /// A zero-width range yields 0.
    pub fn percent(&self) -> i64 {
        percent_of(self.value(), self.min, self.max)
    }

    /// Snapshot `{min, max, percent, value}`; `value` is always a plain number.
    pub fn to_json(&self) -> Value {
        let value = self.value();
        json!({
            "min": self.min,
            "max": self.max,
            "percent": percent_of(value, self.min, self.max),
            "value": value,
        })
    }
}

fn percent_of(value: i64, min: i64, max: i64) -> i64 {
    let mut numerator = 100 * (i128::from(value) - i128::from(min));
    let mut denominator = i128::from(max) - i128::from(min);
    if denominator == 0 {
        return 0;
    }
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }

    // floor(n/d + 1/2) keeps the result exact for any i64 range
    let rounded = (2 * numerator + denominator).div_euclid(2 * denominator);
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn percent_covers_range_endpoints() {
        let mut tracker = ProgressTracker::with_max(2_678_400_000, 0);
        assert_eq!(tracker.percent(), 0);

        tracker.set_value(2_678_400_000);
        assert_eq!(tracker.percent(), 100);
    }

    #[test]
    fn percent_rounds_half_up() {
        let mut tracker = ProgressTracker::new(0, 200, 1);
        assert_eq!(tracker.percent(), 1);

        tracker.set_value(3);
        assert_eq!(tracker.percent(), 2);

        tracker.set_value(-1);
        assert_eq!(tracker.percent(), 0);

        tracker.set_value(-3);
        assert_eq!(tracker.percent(), -1);
    }

    #[test]
    fn zero_width_range_reports_zero_percent() {
        let tracker = ProgressTracker::new(5, 5, 5);
        assert_eq!(tracker.percent(), 0);
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let tracker = ProgressTracker::new(0, 10, 25);
        assert_eq!(tracker.value(), 25);
        assert_eq!(tracker.percent(), 250);
    }

    #[test]
    fn accessor_is_read_on_every_call_until_overwritten() {
        let source = Rc::new(Cell::new(10));
        let reader = Rc::clone(&source);
        let mut tracker = ProgressTracker::with_accessor(0, 100, move || reader.get());

        assert_eq!(tracker.value(), 10);
        source.set(40);
        assert_eq!(tracker.value(), 40);
        assert_eq!(tracker.percent(), 40);

        tracker.set_value(75);
        source.set(0);
        assert_eq!(tracker.value(), 75);
    }

    #[test]
    fn snapshot_reports_current_value_as_number() {
        let tracker = ProgressTracker::with_accessor(0, 4, || 1);

        assert_eq!(
            tracker.to_json(),
            json!({"min": 0, "max": 4, "percent": 25, "value": 1})
        );
    }
}
