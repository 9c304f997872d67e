#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ProgressTracker`**: A value within `[min, max]` with a derived percentage
//! - **`TimeSlice`**: The span from a reference instant to a focus instant, with elapsed/remaining
//! - **`TimeSensor`**: A minimal countdown between two anchors, ticked by hand
//! - **`Timekeeper`**: Owns a slice and a tracker, ticks periodically and renders templates
//! - **`TimekeeperCollection`**: Several keepers serviced together
//! - **`TimeSource`**: Trait to implement for your clock
//! - **`template::render`**: `{key}` / `{key.subkey}` substitution over a JSON snapshot
//!
//! All durations are whole milliseconds (`i64`). Labels such as the event name are
//! arbitrary JSON values and pass through to snapshots unchanged.

extern crate alloc;

pub mod time;
pub mod types;
pub mod tracker;
pub mod slice;
pub mod sensor;
pub mod template;
pub mod timekeeper;
pub mod command;
pub mod collection;

pub use collection::{CollectionError, KeeperId, TimekeeperCollection};
pub use command::{TimekeeperAction, TimekeeperCommand};
pub use sensor::TimeSensor;
pub use slice::TimeSlice;
#[cfg(feature = "std")]
pub use time::SystemClock;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use timekeeper::{
    ServiceTiming, TickHandler, Timekeeper, TimekeeperBuilder, TimekeeperError, TimekeeperState,
    ViewModel,
};
pub use tracker::{ProgressTracker, ProgressValue};
pub use types::{BuildError, DEFAULT_INTERVAL_MILLIS, Label};
