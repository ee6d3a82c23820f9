//! Per-state action and timer bundle.

use super::error::EngineError;
use crate::core::State;
use std::fmt;

/// Timer value for a state that never times out.
pub const ENDLESS: u32 = u32::MAX;

/// Entry, tick and exit actions.
pub type Action = Box<dyn FnMut()>;

/// Supplies a state's duration in ticks each time its timer is reset.
pub type TimerFn = Box<dyn Fn() -> u32>;

/// Whether a [`StateBehavior`] hook handled the call itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// The behavior ran its own code; builder defaults are skipped.
    Handled,
    /// The behavior leaves this slot to the builder-supplied action.
    Unset,
}

/// Custom per-state implementation object.
///
/// Every hook defaults to [`Hook::Unset`] (or `None` for the timer), so an
/// implementation overrides only what it needs and the builder's
/// `on_entry`/`on_tick`/`on_exit`/`timeout_after` fill the remaining slots.
///
/// # Example
///
/// ```rust
/// use statecraft::engine::{Hook, StateBehavior};
///
/// struct Blinking {
///     visible: bool,
/// }
///
/// impl StateBehavior for Blinking {
///     fn on_tick(&mut self) -> Hook {
///         self.visible = !self.visible;
///         Hook::Handled
///     }
///
///     fn timer(&self) -> Option<u32> {
///         Some(30)
///     }
/// }
/// ```
pub trait StateBehavior {
    /// Called when the state is entered through a transition or `init()`.
    ///
    /// Return [`Hook::Handled`] to suppress the builder's `on_entry` action,
    /// [`Hook::Unset`] to let it run after this call.
    fn on_entry(&mut self) -> Hook {
        Hook::Unset
    }

    /// Called once per `update()` while the state is current, before its
    /// timer counts down. [`Hook::Unset`] runs the builder's `on_tick` too.
    fn on_tick(&mut self) -> Hook {
        Hook::Unset
    }

    /// Called when a transition leaves the state, before the rule's action.
    /// Self-transitions never call it. [`Hook::Unset`] runs the builder's
    /// `on_exit` too.
    fn on_exit(&mut self) -> Hook {
        Hook::Unset
    }

    /// Duration in ticks for the next timer reset; `None` leaves the slot unset.
    fn timer(&self) -> Option<u32> {
        None
    }
}

/// Actions and timer of a single state.
///
/// Invariants: `ticks_remaining <= duration`, an [`ENDLESS`] duration never
/// counts down, and the state is terminated exactly when `ticks_remaining`
/// is zero.
pub struct StateDescriptor<S: State> {
    id: S,
    behavior: Option<Box<dyn StateBehavior>>,
    entry: Option<Action>,
    tick: Option<Action>,
    exit: Option<Action>,
    timer_fn: Option<TimerFn>,
    duration: u32,
    ticks_remaining: u32,
}

impl<S: State> StateDescriptor<S> {
    /// Create a descriptor with no actions and an endless timer.
    pub fn new(id: S) -> Self {
        Self {
            id,
            behavior: None,
            entry: None,
            tick: None,
            exit: None,
            timer_fn: Some(Box::new(|| ENDLESS)),
            duration: ENDLESS,
            ticks_remaining: ENDLESS,
        }
    }

    pub(crate) fn set_behavior(&mut self, behavior: Box<dyn StateBehavior>) {
        // A behavior providing its own timer keeps it over any builder default.
        if behavior.timer().is_some() {
            self.timer_fn = None;
        }
        self.behavior = Some(behavior);
    }

    pub(crate) fn set_entry(&mut self, action: Option<Action>) {
        self.entry = action;
    }

    pub(crate) fn set_tick(&mut self, action: Option<Action>) {
        self.tick = action;
    }

    pub(crate) fn set_exit(&mut self, action: Option<Action>) {
        self.exit = action;
    }

    /// Install a builder timer unless a custom behavior already owns the slot.
    pub(crate) fn set_default_timer(&mut self, timer_fn: TimerFn) {
        if self.timer_fn.is_some() {
            self.timer_fn = Some(timer_fn);
        }
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn on_entry(&mut self) {
        if let Some(behavior) = self.behavior.as_mut() {
            if behavior.on_entry() == Hook::Handled {
                return;
            }
        }
        if let Some(action) = self.entry.as_mut() {
            action();
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(behavior) = self.behavior.as_mut() {
            if behavior.on_tick() == Hook::Handled {
                return;
            }
        }
        if let Some(action) = self.tick.as_mut() {
            action();
        }
    }

    pub fn on_exit(&mut self) {
        if let Some(behavior) = self.behavior.as_mut() {
            if behavior.on_exit() == Hook::Handled {
                return;
            }
        }
        if let Some(action) = self.exit.as_mut() {
            action();
        }
    }

    /// Restart the timer with a fresh duration from the timer function.
    pub fn reset_timer(&mut self) -> Result<(), EngineError> {
        let ticks = self.timer_ticks()?;
        self.duration = ticks;
        self.ticks_remaining = ticks;
        Ok(())
    }

    fn timer_ticks(&self) -> Result<u32, EngineError> {
        if let Some(timer_fn) = &self.timer_fn {
            return Ok(timer_fn());
        }
        self.behavior
            .as_ref()
            .and_then(|behavior| behavior.timer())
            .ok_or_else(|| EngineError::TimerMissing {
                state: self.id.name().to_string(),
            })
    }

    /// Count down one tick.
    ///
    /// Returns `true` only on the call that brings the timer to zero.
    pub fn advance_timer(&mut self) -> bool {
        if self.duration != ENDLESS && self.ticks_remaining > 0 {
            self.ticks_remaining -= 1;
            return self.ticks_remaining == 0;
        }
        false
    }

    /// Replace the timer function and reset the timer right away.
    pub fn set_timer_function<F>(&mut self, timer_fn: F) -> Result<(), EngineError>
    where
        F: Fn() -> u32 + 'static,
    {
        self.timer_fn = Some(Box::new(timer_fn));
        self.reset_timer()
    }

    /// Replace the timer with a constant duration and reset it right away.
    pub fn set_constant_timer(&mut self, ticks: u32) -> Result<(), EngineError> {
        self.set_timer_function(move || ticks)
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    /// Ticks elapsed since the timer was last reset; always 0 when endless.
    pub fn ticks_consumed(&self) -> u32 {
        if self.duration == ENDLESS {
            0
        } else {
            self.duration - self.ticks_remaining
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.ticks_remaining == 0
    }
}

impl<S: State> fmt::Display for StateDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.id.name())?;
        if self.behavior.is_some() {
            f.write_str(" custom")?;
        }
        if self.entry.is_some() {
            f.write_str(" entry")?;
        }
        if self.tick.is_some() {
            f.write_str(" tick")?;
        }
        if self.exit.is_some() {
            f.write_str(" exit")?;
        }
        f.write_str(")")
    }
}

impl<S: State> fmt::Debug for StateDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("id", &self.id)
            .field("custom", &self.behavior.is_some())
            .field("duration", &self.duration)
            .field("ticks_remaining", &self.ticks_remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Waiting,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            "Waiting"
        }
    }

    fn counter() -> (Rc<Cell<u32>>, Action) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, Box::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn new_descriptor_is_endless() {
        let descriptor = StateDescriptor::new(TestState::Waiting);
        assert_eq!(descriptor.duration(), ENDLESS);
        assert_eq!(descriptor.ticks_remaining(), ENDLESS);
        assert_eq!(descriptor.ticks_consumed(), 0);
        assert!(!descriptor.is_terminated());
    }

    #[test]
    fn endless_timer_never_advances() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.reset_timer().unwrap();
        for _ in 0..1_000 {
            assert!(!descriptor.advance_timer());
        }
        assert_eq!(descriptor.ticks_remaining(), ENDLESS);
        assert_eq!(descriptor.ticks_consumed(), 0);
    }

    #[test]
    fn timeout_is_edge_triggered() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.set_constant_timer(3).unwrap();

        assert!(!descriptor.advance_timer());
        assert!(!descriptor.advance_timer());
        assert!(descriptor.advance_timer());
        assert!(descriptor.is_terminated());
        assert!(!descriptor.advance_timer());
        assert!(!descriptor.advance_timer());
        assert_eq!(descriptor.ticks_remaining(), 0);
        assert_eq!(descriptor.ticks_consumed(), 3);
    }

    #[test]
    fn set_timer_function_resets_immediately() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.set_constant_timer(5).unwrap();
        descriptor.advance_timer();
        descriptor.advance_timer();
        assert_eq!(descriptor.ticks_remaining(), 3);

        descriptor.set_timer_function(|| 10).unwrap();
        assert_eq!(descriptor.duration(), 10);
        assert_eq!(descriptor.ticks_remaining(), 10);
    }

    #[test]
    fn zero_duration_is_terminated_without_signal() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.set_constant_timer(0).unwrap();
        assert!(descriptor.is_terminated());
        assert!(!descriptor.advance_timer());
    }

    #[test]
    fn actions_run_when_present() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.on_entry();
        descriptor.on_tick();
        descriptor.on_exit();

        let (entries, entry) = counter();
        let (ticks, tick) = counter();
        descriptor.set_entry(Some(entry));
        descriptor.set_tick(Some(tick));
        descriptor.on_entry();
        descriptor.on_tick();
        descriptor.on_tick();

        assert_eq!(entries.get(), 1);
        assert_eq!(ticks.get(), 2);
        assert_eq!(descriptor.to_string(), "(Waiting entry tick)");
    }

    struct CountingBehavior {
        entries: Rc<Cell<u32>>,
    }

    impl StateBehavior for CountingBehavior {
        fn on_entry(&mut self) -> Hook {
            self.entries.set(self.entries.get() + 100);
            Hook::Handled
        }

        fn timer(&self) -> Option<u32> {
            Some(2)
        }
    }

    #[test]
    fn behavior_hooks_override_builder_actions() {
        let behavior_entries = Rc::new(Cell::new(0));
        let (builder_entries, entry) = counter();
        let (builder_exits, exit) = counter();

        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.set_behavior(Box::new(CountingBehavior {
            entries: Rc::clone(&behavior_entries),
        }));
        descriptor.set_entry(Some(entry));
        descriptor.set_exit(Some(exit));

        descriptor.on_entry();
        descriptor.on_exit();

        assert_eq!(behavior_entries.get(), 100);
        assert_eq!(builder_entries.get(), 0);
        assert_eq!(builder_exits.get(), 1);
    }

    #[test]
    fn behavior_timer_wins_over_builder_default() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.set_behavior(Box::new(CountingBehavior {
            entries: Rc::new(Cell::new(0)),
        }));
        descriptor.set_default_timer(Box::new(|| 50));
        descriptor.reset_timer().unwrap();
        assert_eq!(descriptor.duration(), 2);

        descriptor.set_constant_timer(7).unwrap();
        assert_eq!(descriptor.duration(), 7);
    }

    struct Forgetful;

    impl StateBehavior for Forgetful {}

    #[test]
    fn missing_timer_is_reported() {
        let mut descriptor = StateDescriptor::new(TestState::Waiting);
        descriptor.timer_fn = None;
        descriptor.set_behavior(Box::new(Forgetful));

        let err = descriptor.reset_timer().unwrap_err();
        assert_eq!(
            err,
            EngineError::TimerMissing {
                state: "Waiting".to_string()
            }
        );
    }
}
