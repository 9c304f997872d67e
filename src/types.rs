//! Core types shared by keepers and sensors.

/// Application-defined display payload (event name, rendering hint, sensor focus).
///
/// Passed through to snapshots untouched; never interpreted.
pub type Label = serde_json::Value;

/// Interval used when a keeper is built without one.
pub const DEFAULT_INTERVAL_MILLIS: u64 = 1000;

/// Timekeeper configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuildError {
    /// No reference instant provided.
    MissingReference,

    /// No focus instant provided.
    MissingFocus,

    /// Focus lies before reference.
    InvertedSpan {
        /// The (negative) span in milliseconds.
        span: i64,
    },

    /// Tick interval of zero.
    ZeroInterval,
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuildError::MissingReference => {
                write!(f, "timekeeper requires a reference instant")
            }
            BuildError::MissingFocus => {
                write!(f, "timekeeper requires a focus instant")
            }
            BuildError::InvertedSpan { span } => {
                write!(
                    f,
                    "focus must not precede reference (span is {} ms)",
                    span
                )
            }
            BuildError::ZeroInterval => {
                write!(f, "tick interval must be greater than zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}
