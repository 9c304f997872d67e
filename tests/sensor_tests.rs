//! Integration tests for TimeSensor

mod common;
use common::*;

use countdown_keeper::TimeSensor;
use serde_json::json;

#[test]
fn keeps_focus_and_anchor_instants() {
    let clock = FrozenClock::at(date(2011, 12, 26));
    let sensor = TimeSensor::new("New year!", date(2011, 12, 30), date(2012, 1, 1), &clock);

    assert_eq!(sensor.focus(), &json!("New year!"));
    assert_eq!(sensor.a(), date(2011, 12, 30));
    assert_eq!(sensor.b(), date(2012, 1, 1));
}

#[test]
fn tracker_max_is_the_span_between_anchors() {
    let clock = FrozenClock::at(date(2011, 1, 1));
    let sensor = TimeSensor::new(json!(null), date(2011, 1, 1), date(2011, 1, 30), &clock);

    assert_eq!(sensor.tracker().max(), 2_505_600_000);
    assert_eq!(sensor.tracker().value(), 0);
}

#[test]
fn tick_stores_millis_until_b() {
    let clock = FrozenClock::at(date(2011, 12, 26));
    let mut sensor = TimeSensor::new(json!(null), date(2011, 12, 1), date(2012, 1, 1), &clock);

    sensor.tick();

    assert_eq!(sensor.tracker().value(), 518_400_000);
}

#[test]
fn tick_does_not_clamp_outside_the_anchors() {
    let timer = MockTimeSource::at(-500);
    let mut sensor = TimeSensor::new("raw", TestInstant(0), TestInstant(1_000), &timer);

    sensor.tick();
    assert_eq!(sensor.tracker().value(), 1_500);
    assert_eq!(sensor.tracker().percent(), 150);

    timer.set_time(TestInstant(1_250));
    sensor.tick();
    assert_eq!(sensor.tracker().value(), -250);
    assert_eq!(sensor.tracker().percent(), -25);
}

#[test]
fn to_json_snapshots_params_and_tracker() {
    let clock = FrozenClock::at(date(2011, 12, 26));
    let mut sensor = TimeSensor::new("New year!", date(2011, 12, 1), date(2012, 1, 1), &clock);

    sensor.tick();

    assert_eq!(
        sensor.to_json(),
        json!({
            "params": {
                "focus": "New year!",
                "a": date(2011, 12, 1).to_string(),
                "b": date(2012, 1, 1).to_string(),
            },
            "tracker": {
                "min": 0,
                "max": 2_678_400_000_i64,
                // round(19.35) under the tracker's rounding rule, not a ceiling
                "percent": 19,
                "value": 518_400_000,
            },
        })
    );
}
