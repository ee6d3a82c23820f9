//! Transition phase of the engine builder.

use crate::builder::error::BuildError;
use crate::builder::machine::EngineBuilder;
use crate::core::{Event, Guard, State};
use crate::engine::{Engine, TransitionAction, TransitionRule, Trigger};

/// Accumulated settings for one rule.
pub(crate) struct RuleDraft<S: State, E: Event> {
    from: S,
    to: S,
    guard: Option<Guard>,
    action: Option<TransitionAction<E>>,
    trigger: Option<Trigger<E>>,
}

impl<S: State, E: Event> RuleDraft<S, E> {
    fn new(from: S) -> Self {
        Self {
            to: from.clone(),
            from,
            guard: None,
            action: None,
            trigger: None,
        }
    }

    fn name(&self) -> String {
        format!("{} -> {}", self.from.name(), self.to.name())
    }

    fn select(&mut self, trigger: Trigger<E>) -> Result<(), BuildError> {
        if let Some(existing) = &self.trigger {
            if matches!((existing, &trigger), (Trigger::Timeout, Trigger::Timeout)) {
                return Err(BuildError::DuplicateTimeout { rule: self.name() });
            }
            return Err(BuildError::ConflictingTrigger {
                rule: self.name(),
                existing: existing.describe(),
                requested: trigger.describe(),
            });
        }
        self.trigger = Some(trigger);
        Ok(())
    }

    pub(crate) fn into_rule(self) -> TransitionRule<S, E> {
        TransitionRule {
            from: self.from,
            to: self.to,
            guard: self.guard,
            action: self.action,
            trigger: self.trigger.unwrap_or(Trigger::Unconditional),
        }
    }
}

/// Transition phase of [`EngineBuilder`].
///
/// Every rule starts with [`when`](Self::when) or [`stay`](Self::stay),
/// which also seals the rule before it. Declaration order is priority order.
/// A rule takes at most one trigger selector; a rule without one is polled
/// on every `update()` and fires as soon as its guard passes.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{BuildError, EngineBuilder};
/// use statecraft::core::Event;
/// use statecraft::state_enum;
///
/// state_enum! {
///     enum Ghost { Home, Hunting }
/// }
///
/// #[derive(PartialEq, Debug)]
/// struct Released;
///
/// impl Event for Released {
///     type Kind = ();
///     fn kind(&self) -> Self::Kind {}
/// }
///
/// let result = EngineBuilder::<Ghost, Released>::new()
///     .initial(Ghost::Home)
///     .transitions()
///     .when(Ghost::Home).then(Ghost::Hunting).on_timeout().on(Released)
///     .build();
///
/// assert!(matches!(result, Err(BuildError::ConflictingTrigger { .. })));
/// ```
pub struct TransitionBuilder<S: State, E: Event> {
    inner: EngineBuilder<S, E>,
    pending: Option<RuleDraft<S, E>>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    pub(crate) fn new(inner: EngineBuilder<S, E>) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    /// Start a rule leaving `from`. The target defaults to `from`.
    pub fn when(mut self, from: S) -> Self {
        self.seal();
        self.pending = Some(RuleDraft::new(from));
        self
    }

    /// Start a self-transition rule on `state`.
    ///
    /// When it fires only its action runs: no exit, no entry, no timer reset.
    pub fn stay(self, state: S) -> Self {
        self.when(state)
    }

    /// Set the target state.
    pub fn then(self, to: S) -> Self {
        self.edit("then", |rule| {
            rule.to = to;
            Ok(())
        })
    }

    /// Only fire while `guard` returns `true`.
    pub fn condition<F>(self, guard: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.edit("condition", |rule| {
            rule.guard = Some(Guard::new(guard));
            Ok(())
        })
    }

    /// Fire when the source state's timer expires.
    pub fn on_timeout(self) -> Self {
        self.edit("on_timeout", |rule| rule.select(Trigger::Timeout))
    }

    /// Fire on any event assignable to `kind`.
    pub fn on_kind(self, kind: E::Kind) -> Self {
        self.edit("on_kind", |rule| rule.select(Trigger::Kind(kind)))
    }

    /// Fire on events equal to `event`.
    pub fn on(self, event: E) -> Self {
        self.edit("on", |rule| rule.select(Trigger::Instance(event)))
    }

    /// Run `action` when the rule fires; it receives the triggering event,
    /// or `None` for timeout and guard-only rules.
    pub fn act<F>(self, action: F) -> Self
    where
        F: FnMut(Option<&E>) + 'static,
    {
        self.edit("act", |rule| {
            rule.action = Some(Box::new(action));
            Ok(())
        })
    }

    /// Run `action`, ignoring the triggering event, when the rule fires.
    pub fn perform<F>(self, mut action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.edit("perform", |rule| {
            rule.action = Some(Box::new(move |_: Option<&E>| action()));
            Ok(())
        })
    }

    /// Seal the last rule and build the engine.
    pub fn build(mut self) -> Result<Engine<S, E>, BuildError> {
        self.seal();
        self.inner.build()
    }

    fn edit(
        mut self,
        method: &'static str,
        apply: impl FnOnce(&mut RuleDraft<S, E>) -> Result<(), BuildError>,
    ) -> Self {
        if self.inner.has_failed() {
            return self;
        }
        let outcome = match self.pending.as_mut() {
            Some(rule) => apply(rule),
            None => Err(BuildError::RuleNotStarted { method }),
        };
        if let Err(error) = outcome {
            self.inner.fail(error);
        }
        self
    }

    fn seal(&mut self) {
        if let Some(rule) = self.pending.take() {
            self.inner.push_rule(rule);
        }
    }
}
