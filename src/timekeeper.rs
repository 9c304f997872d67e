//! Countdown orchestrator with tick scheduling and template rendering.
//!
//! Provides [`Timekeeper`], which ties a [`TimeSlice`] to a [`ProgressTracker`],
//! recomputes the tracker on every tick and renders snapshots through templates.
//! Construction goes through [`TimekeeperBuilder`].

use crate::command::TimekeeperAction;
use crate::slice::TimeSlice;
use crate::template;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::tracker::ProgressTracker;
use crate::types::{BuildError, DEFAULT_INTERVAL_MILLIS, Label};
use alloc::boxed::Box;
use alloc::string::String;
use core::cell::RefCell;
use serde_json::{Value, json};

/// Handler run at the end of every tick, with the keeper passed explicitly.
pub type TickHandler<'t, I, T> = Box<dyn FnMut(&Timekeeper<'t, I, T>) + 't>;

/// Produces the substitution source for [`Timekeeper::render`] in place of the snapshot.
pub type ViewModel<'t, I, T> = Box<dyn Fn(&Timekeeper<'t, I, T>) -> Value + 't>;

/// Whether the keeper is being serviced periodically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimekeeperState {
    /// Not started, or stopped. Ticks only happen when called directly.
    Idle,
    /// Started. The host should call `service` after each returned delay.
    Running,
}

/// Timing information returned by service operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Service again after the specified delay.
    Delay(D),

    /// Periodic ticking is off. No further servicing is needed until restarted.
    Stopped,
}

/// Errors that can occur during keeper lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimekeeperError {
    /// Operation called from an invalid state.
    InvalidState {
        /// The state the operation requires.
        expected: TimekeeperState,
        /// The actual current state
        actual: TimekeeperState,
    },
}

impl core::fmt::Display for TimekeeperError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimekeeperError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {:?}, but timekeeper is {:?}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimekeeperError {}

/// Tracks a countdown toward a focus instant and renders it as text.
///
/// The tracker is sized to the slice's span and starts full. Each [`tick`](Self::tick)
/// samples the time source once and pushes the remaining milliseconds into it.
///
/// The keeper does not own a timer. After [`start`](Self::start) the host calls
/// [`service`](Self::service) whenever the returned delay has passed.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference and hooks
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct Timekeeper<'t, I: TimeInstant, T: TimeSource<I>> {
    event: Label,
    kind: Label,
    interval: I::Duration,
    on_tick: RefCell<Option<TickHandler<'t, I, T>>>,
    view_model: Option<ViewModel<'t, I, T>>,
    slice: TimeSlice<I>,
    tracker: ProgressTracker,
    time_source: &'t T,
    state: TimekeeperState,
    next_tick: Option<I>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Timekeeper<'t, I, T> {
    /// Creates a builder bound to `time_source`.
    pub fn builder(time_source: &'t T) -> TimekeeperBuilder<'t, I, T> {
        TimekeeperBuilder::new(time_source)
    }

    /// Handles a keeper action by dispatching to the appropriate method.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Delay(..))` - For `Start` and `Tick` while running
    /// * `Ok(ServiceTiming::Stopped)` - For `Stop`, or `Tick` while idle
    /// * `Err` - Invalid state
    pub fn handle_action(
        &mut self,
        action: TimekeeperAction,
    ) -> Result<ServiceTiming<I::Duration>, TimekeeperError> {
        match action {
            TimekeeperAction::Start => self.start(),
            TimekeeperAction::Stop => {
                self.stop()?;
                Ok(ServiceTiming::Stopped)
            }
            TimekeeperAction::Tick => {
                self.tick();
                Ok(match self.time_until_next_tick() {
                    Some(delay) => ServiceTiming::Delay(delay),
                    None => ServiceTiming::Stopped,
                })
            }
        }
    }

    /// Recomputes the tracker from the current instant, then runs the tick handler.
    pub fn tick(&mut self) {
        let now = self.time_source.now();
        let remaining = self.slice.remaining(now);
        self.tracker.set_value(remaining);
        log::trace!("tick: {} ms remaining", remaining);

        // The handler stays installed while it runs; it only sees `&Self`,
        // so it cannot re-enter `tick`.
        if let Some(handler) = self.on_tick.borrow_mut().as_mut() {
            handler(self);
        }
    }

    /// Begins periodic ticking. The first tick is due one interval from now.
    ///
    /// Must be called from `Idle` state.
    pub fn start(&mut self) -> Result<ServiceTiming<I::Duration>, TimekeeperError> {
        if self.state != TimekeeperState::Idle {
            return Err(TimekeeperError::InvalidState {
                expected: TimekeeperState::Idle,
                actual: self.state,
            });
        }

        let now = self.time_source.now();
        self.next_tick = Some(now.checked_add(self.interval).unwrap_or(now));
        self.state = TimekeeperState::Running;
        log::debug!("timekeeper started, interval {} ms", self.interval.as_millis());

        Ok(ServiceTiming::Delay(self.interval))
    }

    /// Ticks if a tick is due and schedules the next one.
    ///
    /// Intervals missed since the last service call are coalesced into a single
    /// tick. Must be called from `Running` state.
    pub fn service(&mut self) -> Result<ServiceTiming<I::Duration>, TimekeeperError> {
        let Some(due) = self.next_tick.filter(|_| self.state == TimekeeperState::Running)
        else {
            return Err(TimekeeperError::InvalidState {
                expected: TimekeeperState::Running,
                actual: self.state,
            });
        };

        let now = self.time_source.now();
        let overdue = now.millis_since(due);
        if overdue >= 0 {
            self.tick();

            let interval = self.interval.as_millis().max(1);
            let missed = overdue.unsigned_abs() / interval + 1;
            let advance = I::Duration::from_millis(missed.saturating_mul(interval));
            // On overflow keep the old deadline; the next call ticks again.
            self.next_tick = Some(due.checked_add(advance).unwrap_or(due));
            log::trace!("serviced: {} interval(s) elapsed", missed);
        }

        Ok(ServiceTiming::Delay(
            self.time_until_next_tick().unwrap_or(I::Duration::ZERO),
        ))
    }

    /// Stops periodic ticking. State and snapshot values are kept.
    ///
    /// Must be called from `Running` state.
    pub fn stop(&mut self) -> Result<(), TimekeeperError> {
        if self.state != TimekeeperState::Running {
            return Err(TimekeeperError::InvalidState {
                expected: TimekeeperState::Running,
                actual: self.state,
            });
        }

        self.next_tick = None;
        self.state = TimekeeperState::Idle;
        log::debug!("timekeeper stopped");
        Ok(())
    }

    /// Snapshot `{event, type, slice, tracker}`, sampling the time source once.
    pub fn to_json(&self) -> Value {
        let now = self.time_source.now();
        json!({
            "event": self.event,
            "type": self.kind,
            "slice": self.slice.to_json(now),
            "tracker": self.tracker.to_json(),
        })
    }

    /// Renders `template` against the view model, or the snapshot if none is set.
    pub fn render(&self, template: &str) -> String {
        let view = match &self.view_model {
            Some(view_model) => view_model(self),
            None => self.to_json(),
        };
        template::render(template, &view)
    }

    /// Time until the next scheduled tick, if running.
    pub fn time_until_next_tick(&self) -> Option<I::Duration> {
        let due = self.next_tick?;
        let millis = due.millis_since(self.time_source.now()).max(0);
        Some(I::Duration::from_millis(millis.unsigned_abs()))
    }

    pub fn event(&self) -> &Label {
        &self.event
    }

    /// The display hint configured as `type`.
    pub fn kind(&self) -> &Label {
        &self.kind
    }

    pub fn interval(&self) -> I::Duration {
        self.interval
    }

    pub fn slice(&self) -> &TimeSlice<I> {
        &self.slice
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Returns the current state of the keeper.
    pub fn state(&self) -> TimekeeperState {
        self.state
    }

    /// Returns true if the keeper is being serviced periodically.
    pub fn is_running(&self) -> bool {
        self.state == TimekeeperState::Running
    }

    /// Returns true if a tick handler is installed, including while it runs.
    pub fn has_tick_handler(&self) -> bool {
        self.on_tick
            .try_borrow()
            .map_or(true, |handler| handler.is_some())
    }

    pub fn has_view_model(&self) -> bool {
        self.view_model.is_some()
    }
}

impl<I: TimeInstant, T: TimeSource<I>> core::fmt::Debug for Timekeeper<'_, I, T>
where
    I: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timekeeper")
            .field("event", &self.event)
            .field("kind", &self.kind)
            .field("interval_ms", &self.interval.as_millis())
            .field("slice", &self.slice)
            .field("tracker", &self.tracker)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing validated timekeepers.
pub struct TimekeeperBuilder<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    event: Label,
    kind: Label,
    interval: I::Duration,
    on_tick: Option<TickHandler<'t, I, T>>,
    view_model: Option<ViewModel<'t, I, T>>,
    reference: Option<I>,
    focus: Option<I>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> TimekeeperBuilder<'t, I, T> {
    /// Creates a builder with no labels, no hooks and the default interval.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            event: Label::Null,
            kind: Label::Null,
            interval: I::Duration::from_millis(DEFAULT_INTERVAL_MILLIS),
            on_tick: None,
            view_model: None,
            reference: None,
            focus: None,
        }
    }

    /// Sets the event label shown as `{event}`.
    pub fn event(mut self, event: impl Into<Label>) -> Self {
        self.event = event.into();
        self
    }

    /// Sets the display hint shown as `{type}`.
    pub fn kind(mut self, kind: impl Into<Label>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the time between ticks once started.
    ///
    /// Default is [`DEFAULT_INTERVAL_MILLIS`].
    pub fn interval(mut self, interval: I::Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn on_tick(mut self, handler: impl FnMut(&Timekeeper<'t, I, T>) + 't) -> Self {
        self.on_tick = Some(Box::new(handler));
        self
    }

    pub fn view_model(mut self, view_model: impl Fn(&Timekeeper<'t, I, T>) -> Value + 't) -> Self {
        self.view_model = Some(Box::new(view_model));
        self
    }

    /// Sets the start of the tracked span.
    pub fn reference(mut self, reference: I) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Sets the target instant.
    pub fn focus(mut self, focus: I) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Builds and validates the keeper.
    ///
    /// # Errors
    /// * `MissingReference` / `MissingFocus` - An instant was not provided
    /// * `InvertedSpan` - Focus lies before reference
    /// * `ZeroInterval` - Interval is zero
    pub fn build(self) -> Result<Timekeeper<'t, I, T>, BuildError> {
        let reference = self.reference.ok_or(BuildError::MissingReference)?;
        let focus = self.focus.ok_or(BuildError::MissingFocus)?;

        let slice = TimeSlice::new(reference, focus);
        let span = slice.span();
        if span < 0 {
            return Err(BuildError::InvertedSpan { span });
        }

        if self.interval.as_millis() == 0 {
            return Err(BuildError::ZeroInterval);
        }

        Ok(Timekeeper {
            event: self.event,
            kind: self.kind,
            interval: self.interval,
            on_tick: RefCell::new(self.on_tick),
            view_model: self.view_model,
            slice,
            tracker: ProgressTracker::with_max(span, span),
            time_source: self.time_source,
            state: TimekeeperState::Idle,
            next_tick: None,
        })
    }
}
