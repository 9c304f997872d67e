use crate::command::{TimekeeperAction, TimekeeperCommand};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::timekeeper::{ServiceTiming, Timekeeper, TimekeeperError, TimekeeperState};
use alloc::string::String;

/// An identifier for a keeper within a collection.
///
/// Users pick the ID when adding a keeper and use it to target commands and
/// render calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeeperId(pub usize);

impl From<usize> for KeeperId {
    fn from(id: usize) -> Self {
        KeeperId(id)
    }
}

impl From<KeeperId> for usize {
    fn from(id: KeeperId) -> Self {
        id.0
    }
}

/// Errors that can occur during collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionError {
    /// The specified ID does not exist in the collection.
    InvalidId(KeeperId),

    /// Attempted to add a keeper with an ID that already exists.
    DuplicateId(KeeperId),

    /// The ID exceeds the collection's capacity.
    IdOutOfBounds { id: KeeperId, capacity: usize },

    /// A keeper operation failed.
    Timekeeper(TimekeeperError),
}

impl core::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CollectionError::InvalidId(id) => {
                write!(f, "keeper ID {} does not exist in collection", id.0)
            }
            CollectionError::DuplicateId(id) => {
                write!(f, "keeper ID {} already exists in collection", id.0)
            }
            CollectionError::IdOutOfBounds { id, capacity } => {
                write!(
                    f,
                    "keeper ID {} exceeds collection capacity of {}",
                    id.0, capacity
                )
            }
            CollectionError::Timekeeper(err) => {
                write!(f, "timekeeper error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollectionError {}

impl From<TimekeeperError> for CollectionError {
    fn from(err: TimekeeperError) -> Self {
        CollectionError::Timekeeper(err)
    }
}

/// Manages several timekeepers sharing one time source, e.g. multiple banners
/// on the same page.
///
/// Routes commands by [`KeeperId`] and services every running keeper in one
/// call, reporting the shortest delay until any of them is due.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `MAX_KEEPERS` - Maximum number of keepers this collection can hold
pub struct TimekeeperCollection<'t, I: TimeInstant, T: TimeSource<I>, const MAX_KEEPERS: usize> {
    keepers: [Option<Timekeeper<'t, I, T>>; MAX_KEEPERS],
}

impl<'t, I, T, const MAX_KEEPERS: usize> TimekeeperCollection<'t, I, T, MAX_KEEPERS>
where
    I: TimeInstant,
    T: TimeSource<I>,
{
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self {
            keepers: core::array::from_fn(|_| None),
        }
    }

    /// Adds a keeper under the specified ID.
    ///
    /// # Errors
    /// * `DuplicateId` - A keeper with this ID already exists
    /// * `IdOutOfBounds` - The ID exceeds the collection's capacity
    pub fn add(&mut self, id: KeeperId, keeper: Timekeeper<'t, I, T>) -> Result<(), CollectionError> {
        let slot = self
            .keepers
            .get_mut(id.0)
            .ok_or(CollectionError::IdOutOfBounds {
                id,
                capacity: MAX_KEEPERS,
            })?;

        if slot.is_some() {
            return Err(CollectionError::DuplicateId(id));
        }

        *slot = Some(keeper);
        Ok(())
    }

    /// Removes and returns the keeper with the given ID.
    pub fn remove(&mut self, id: KeeperId) -> Result<Timekeeper<'t, I, T>, CollectionError> {
        self.keepers
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(CollectionError::InvalidId(id))
    }

    pub fn get(&self, id: KeeperId) -> Result<&Timekeeper<'t, I, T>, CollectionError> {
        self.keepers
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(CollectionError::InvalidId(id))
    }

    pub fn get_mut(&mut self, id: KeeperId) -> Result<&mut Timekeeper<'t, I, T>, CollectionError> {
        self.keepers
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CollectionError::InvalidId(id))
    }

    /// Routes an action to the specified keeper.
    ///
    /// # Returns
    /// * `Ok(Some(duration))` - Time until the keeper needs service
    /// * `Ok(None)` - The keeper is not ticking periodically
    /// * `Err` - Invalid ID or keeper operation failed
    pub fn handle_command(
        &mut self,
        id: KeeperId,
        action: TimekeeperAction,
    ) -> Result<Option<I::Duration>, CollectionError> {
        match self.get_mut(id)?.handle_action(action)? {
            ServiceTiming::Delay(delay) => Ok(Some(delay)),
            ServiceTiming::Stopped => Ok(None),
        }
    }

    /// Routes a [`TimekeeperCommand`] to its target keeper.
    pub fn dispatch(
        &mut self,
        command: TimekeeperCommand,
    ) -> Result<Option<I::Duration>, CollectionError> {
        self.handle_command(command.keeper_id, command.action)
    }

    /// Services all running keepers and returns the optimal sleep duration.
    ///
    /// # Returns
    /// * `Some(duration)` - Sleep this long before the next call
    /// * `None` - No keeper is running
    pub fn service_all(&mut self) -> Result<Option<I::Duration>, CollectionError> {
        let mut min_duration: Option<I::Duration> = None;

        for keeper in self.keepers.iter_mut().flatten() {
            if keeper.state() != TimekeeperState::Running {
                continue;
            }

            if let ServiceTiming::Delay(duration) = keeper.service()? {
                min_duration = match min_duration {
                    Some(current) if current.as_millis() <= duration.as_millis() => Some(current),
                    _ => Some(duration),
                };
            }
        }

        Ok(min_duration)
    }

    /// Renders `template` with the specified keeper.
    pub fn render(&self, id: KeeperId, template: &str) -> Result<String, CollectionError> {
        Ok(self.get(id)?.render(template))
    }

    /// Returns the current state of the specified keeper.
    pub fn state(&self, id: KeeperId) -> Result<TimekeeperState, CollectionError> {
        Ok(self.get(id)?.state())
    }

    /// Returns the number of keepers currently in the collection.
    pub fn len(&self) -> usize {
        self.keepers.iter().filter(|k| k.is_some()).count()
    }

    /// Returns true if the collection contains no keepers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the collection contains a keeper with the given ID.
    pub fn contains(&self, id: KeeperId) -> bool {
        matches!(self.keepers.get(id.0), Some(Some(_)))
    }
}

impl<'t, I, T, const MAX_KEEPERS: usize> Default for TimekeeperCollection<'t, I, T, MAX_KEEPERS>
where
    I: TimeInstant,
    T: TimeSource<I>,
{
    fn default() -> Self {
        Self::new()
    }
}
