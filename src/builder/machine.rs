//! Builder for constructing engines, and its state phase.

use crate::builder::error::BuildError;
use crate::builder::transition::{RuleDraft, TransitionBuilder};
use crate::core::{Event, State};
use crate::engine::{
    Action, Engine, EngineConfig, StateBehavior, StateDescriptor, TimerFn, TransitionTable,
};
use std::collections::HashMap;
use std::iter;

/// Accumulated settings for one state.
pub(crate) struct StateDraft<S: State> {
    id: S,
    behavior: Option<Box<dyn StateBehavior>>,
    entry: Option<Action>,
    tick: Option<Action>,
    exit: Option<Action>,
    timer: Option<TimerFn>,
}

impl<S: State> StateDraft<S> {
    fn new(id: S) -> Self {
        Self {
            id,
            behavior: None,
            entry: None,
            tick: None,
            exit: None,
            timer: None,
        }
    }

    fn into_descriptor(self) -> StateDescriptor<S> {
        let mut descriptor = StateDescriptor::new(self.id);
        // Behavior first: its own timer must survive the builder default.
        if let Some(behavior) = self.behavior {
            descriptor.set_behavior(behavior);
        }
        descriptor.set_entry(self.entry);
        descriptor.set_tick(self.tick);
        descriptor.set_exit(self.exit);
        if let Some(timer) = self.timer {
            descriptor.set_default_timer(timer);
        }
        descriptor
    }
}

/// Builder for constructing engines with a fluent API.
///
/// Construction has two phases: [`states`](Self::states) declares state
/// actions and timers, then [`transitions`](StateBuilder::transitions)
/// declares rules. Both phases only accumulate plain drafts; validation and
/// assembly happen once, in `build()`.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::EngineBuilder;
/// use statecraft::core::Event;
/// use statecraft::state_enum;
///
/// state_enum! {
///     enum Light { Red, Green }
/// }
///
/// #[derive(PartialEq, Debug)]
/// struct Emergency;
///
/// impl Event for Emergency {
///     type Kind = ();
///     fn kind(&self) -> Self::Kind {}
/// }
///
/// let mut engine = EngineBuilder::<Light, Emergency>::new()
///     .description("traffic light")
///     .initial(Light::Red)
///     .states()
///         .state(Light::Red).constant_timeout(3)
///         .state(Light::Green).constant_timeout(5)
///     .transitions()
///         .when(Light::Red).then(Light::Green).on_timeout()
///         .when(Light::Green).then(Light::Red).on_timeout()
///         .when(Light::Green).then(Light::Red).on_kind(())
///     .build()
///     .unwrap();
///
/// engine.init().unwrap();
/// for _ in 0..3 {
///     engine.update().unwrap();
/// }
/// assert!(engine.is(&[Light::Green]));
/// engine.process(&Emergency).unwrap();
/// assert!(engine.is(&[Light::Red]));
/// ```
pub struct EngineBuilder<S: State, E: Event> {
    description: Option<String>,
    initial: Option<S>,
    config: EngineConfig,
    states: Vec<StateDraft<S>>,
    rules: Vec<RuleDraft<S, E>>,
    error: Option<BuildError>,
}

impl<S: State, E: Event> EngineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            description: None,
            initial: None,
            config: EngineConfig::default(),
            states: Vec::new(),
            rules: Vec::new(),
            error: None,
        }
    }

    /// Set a diagnostic label (optional; defaults to the state type's name).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the default engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start declaring states.
    pub fn states(self) -> StateBuilder<S, E> {
        StateBuilder {
            inner: self,
            pending: None,
        }
    }

    /// Start declaring transitions without declaring any state.
    pub fn transitions(self) -> TransitionBuilder<S, E> {
        TransitionBuilder::new(self)
    }

    /// Keep the first misuse; later ones are consequences of it.
    pub(crate) fn fail(&mut self, error: BuildError) {
        if self.error.is_none() {
            tracing::debug!("engine builder rejected: {}", error);
            self.error = Some(error);
        }
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn push_rule(&mut self, rule: RuleDraft<S, E>) {
        self.rules.push(rule);
    }

    /// Validate the accumulated drafts and assemble the engine.
    ///
    /// States referenced by rules or as the initial state but never declared
    /// get a descriptor with no actions and an endless timer.
    pub fn build(self) -> Result<Engine<S, E>, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let description = self.description.unwrap_or_else(default_description::<S>);

        let mut drafts: HashMap<S, StateDraft<S>> = HashMap::with_capacity(self.states.len());
        for mut draft in self.states {
            if let Some(previous) = drafts.remove(&draft.id) {
                tracing::warn!(
                    "{}: state {} declared more than once, keeping the last declaration",
                    description,
                    draft.id.name()
                );
                // A custom implementation survives redeclarations that set none.
                if draft.behavior.is_none() {
                    draft.behavior = previous.behavior;
                }
            }
            drafts.insert(draft.id.clone(), draft);
        }
        let mut descriptors: HashMap<S, StateDescriptor<S>> = drafts
            .into_iter()
            .map(|(id, draft)| (id, draft.into_descriptor()))
            .collect();

        let mut table = TransitionTable::new();
        for rule in self.rules {
            table.push(rule.into_rule());
        }

        let undeclared: Vec<S> = table
            .referenced_states()
            .chain(iter::once(&initial))
            .filter(|id| !descriptors.contains_key(*id))
            .cloned()
            .collect();
        for id in undeclared {
            descriptors
                .entry(id.clone())
                .or_insert_with(|| StateDescriptor::new(id));
        }

        tracing::debug!(
            "{}: built with {} states and {} transitions",
            description,
            descriptors.len(),
            table.len()
        );
        Ok(Engine::assemble(
            description,
            initial,
            descriptors,
            table,
            self.config,
        ))
    }
}

impl<S: State, E: Event> Default for EngineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_description<S>() -> String {
    let full = std::any::type_name::<S>();
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    format!("{short} engine")
}

/// State phase of [`EngineBuilder`].
///
/// `state(id)` seals the previous state's settings and starts a new one.
/// Setters called before any `state(id)` poison the builder.
pub struct StateBuilder<S: State, E: Event> {
    inner: EngineBuilder<S, E>,
    pending: Option<StateDraft<S>>,
}

impl<S: State, E: Event> StateBuilder<S, E> {
    /// Start declaring `id`.
    pub fn state(mut self, id: S) -> Self {
        self.seal();
        self.pending = Some(StateDraft::new(id));
        self
    }

    /// Install a custom behavior object for the current state.
    ///
    /// Builder-supplied actions and timer only fill the slots it leaves unset.
    pub fn implementation<B>(self, behavior: B) -> Self
    where
        B: StateBehavior + 'static,
    {
        self.edit("implementation", |draft| {
            draft.behavior = Some(Box::new(behavior))
        })
    }

    pub fn on_entry<F>(self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.edit("on_entry", |draft| draft.entry = Some(Box::new(action)))
    }

    pub fn on_exit<F>(self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.edit("on_exit", |draft| draft.exit = Some(Box::new(action)))
    }

    pub fn on_tick<F>(self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.edit("on_tick", |draft| draft.tick = Some(Box::new(action)))
    }

    /// Time out after the number of ticks returned by `timer`, evaluated on
    /// every entry.
    pub fn timeout_after<F>(self, timer: F) -> Self
    where
        F: Fn() -> u32 + 'static,
    {
        self.edit("timeout_after", |draft| draft.timer = Some(Box::new(timer)))
    }

    /// Time out after a fixed number of ticks.
    pub fn constant_timeout(self, ticks: u32) -> Self {
        self.edit("constant_timeout", |draft| {
            draft.timer = Some(Box::new(move || ticks))
        })
    }

    /// Seal the states and start declaring transitions.
    pub fn transitions(mut self) -> TransitionBuilder<S, E> {
        self.seal();
        TransitionBuilder::new(self.inner)
    }

    /// Seal the states and build an engine without transitions.
    pub fn build(mut self) -> Result<Engine<S, E>, BuildError> {
        self.seal();
        self.inner.build()
    }

    fn edit(mut self, method: &'static str, apply: impl FnOnce(&mut StateDraft<S>)) -> Self {
        if self.inner.has_failed() {
            return self;
        }
        match self.pending.as_mut() {
            Some(draft) => apply(draft),
            None => self.inner.fail(BuildError::StateNotStarted { method }),
        }
        self
    }

    fn seal(&mut self) {
        if let Some(draft) = self.pending.take() {
            self.inner.states.push(draft);
        }
    }
}
