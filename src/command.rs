//! Command-based control for timekeepers.

use crate::collection::KeeperId;

/// Actions for controlling timekeepers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimekeeperAction {
    /// Start periodic ticking.
    Start,
    /// Stop periodic ticking.
    Stop,
    /// Recompute immediately.
    Tick,
}

/// Command targeting a specific keeper in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimekeeperCommand {
    pub keeper_id: KeeperId,
    pub action: TimekeeperAction,
}

impl TimekeeperCommand {
    /// Creates command.
    pub fn new(keeper_id: KeeperId, action: TimekeeperAction) -> Self {
        Self { keeper_id, action }
    }
}
