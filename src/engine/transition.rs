//! Declarative transition rules.

use crate::core::{Event, Guard, State, TriggerLabel};
use std::fmt;

/// Action run when a rule fires; receives the triggering event, if any.
pub type TransitionAction<E> = Box<dyn FnMut(Option<&E>)>;

/// What makes a rule eligible.
pub enum Trigger<E: Event> {
    /// The source state's timer expired during this `update()`.
    Timeout,
    /// An event whose kind is assignable to this one.
    Kind(E::Kind),
    /// An event equal to this value.
    Instance(E),
    /// No trigger selector; polled on every `update()`.
    Unconditional,
}

impl<E: Event> Trigger<E> {
    /// Short name used in build errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Timeout => "timeout".to_string(),
            Self::Kind(kind) => format!("kind {kind:?}"),
            Self::Instance(event) => format!("event {event:?}"),
            Self::Unconditional => "condition".to_string(),
        }
    }
}

impl<E: Event> fmt::Debug for Trigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A transition rule from one state to another.
pub struct TransitionRule<S: State, E: Event> {
    pub from: S,
    pub to: S,
    pub guard: Option<Guard>,
    pub action: Option<TransitionAction<E>>,
    pub trigger: Trigger<E>,
}

impl<S: State, E: Event> TransitionRule<S, E> {
    /// A rule with no guard, no action and an unconditional trigger.
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            guard: None,
            action: None,
            trigger: Trigger::Unconditional,
        }
    }

    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }

    /// Guard check; rules without a guard always pass.
    pub fn guard_passes(&self) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check())
    }

    /// Whether the trigger accepts `event` (guard not evaluated).
    pub fn accepts_event(&self, event: &E) -> bool {
        match &self.trigger {
            Trigger::Kind(kind) => event.is_kind(kind),
            Trigger::Instance(expected) => expected == event,
            Trigger::Timeout | Trigger::Unconditional => false,
        }
    }

    /// Whether the trigger accepts a tick (guard not evaluated).
    pub fn accepts_tick(&self, timed_out: bool) -> bool {
        match self.trigger {
            Trigger::Timeout => timed_out,
            Trigger::Unconditional => true,
            Trigger::Kind(_) | Trigger::Instance(_) => false,
        }
    }

    pub(crate) fn fire_action(&mut self, event: Option<&E>) {
        if let Some(action) = self.action.as_mut() {
            action(event);
        }
    }

    pub(crate) fn label(&self, event: Option<&E>) -> TriggerLabel {
        match (event, &self.trigger) {
            (Some(event), _) => TriggerLabel::Event(format!("{event:?}")),
            (None, Trigger::Timeout) => TriggerLabel::Timeout,
            (None, _) => TriggerLabel::Unconditional,
        }
    }
}

impl<S: State, E: Event> fmt::Display for TransitionRule<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.name(), self.to.name())
    }
}

impl<S: State, E: Event> fmt::Debug for TransitionRule<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("trigger", &self.trigger)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}
