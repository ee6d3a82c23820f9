//! The tick- and event-driven engine.

use super::config::EngineConfig;
use super::descriptor::StateDescriptor;
use super::error::EngineError;
use super::table::TransitionTable;
use super::transition::TransitionRule;
use crate::core::{Event, State, TransitionLog, TransitionRecord};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;

/// Result of a single `update()` or `process()` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<S: State> {
    /// A rule fired. `from == to` for self-transitions.
    Fired { from: S, to: S },

    /// No rule matched; the engine state is unchanged.
    Unmatched,
}

impl<S: State> Outcome<S> {
    pub fn fired(&self) -> bool {
        matches!(self, Self::Fired { .. })
    }
}

/// Finite-state machine driven by an external tick loop.
///
/// Built by [`EngineBuilder`](crate::builder::EngineBuilder); the set of
/// states and rules is fixed from then on. Call [`init`](Self::init) once,
/// then [`update`](Self::update) once per frame for timers and guard-only
/// rules and [`process`](Self::process) for every event. The two entry points
/// never evaluate each other's rules.
pub struct Engine<S: State, E: Event> {
    description: String,
    initial: S,
    current: Option<S>,
    descriptors: HashMap<S, StateDescriptor<S>>,
    table: TransitionTable<S, E>,
    history: TransitionLog<S>,
    config: EngineConfig,
    ticks: u64,
}

impl<S: State, E: Event> Engine<S, E> {
    pub(crate) fn assemble(
        description: String,
        initial: S,
        descriptors: HashMap<S, StateDescriptor<S>>,
        table: TransitionTable<S, E>,
        config: EngineConfig,
    ) -> Self {
        Self {
            description,
            initial,
            current: None,
            descriptors,
            table,
            history: TransitionLog::with_capacity(config.history_capacity),
            config,
            ticks: 0,
        }
    }

    /// Enter the initial state.
    ///
    /// Always restarts: resets the initial state's timer and runs its entry
    /// action, whatever state the engine was in before. The tick counter
    /// restarts at zero; the history is kept.
    pub fn init(&mut self) -> Result<(), EngineError> {
        let initial = self.initial.clone();
        tracing::info!("{}: entering initial state {}", self.description, initial.name());

        self.current = Some(initial.clone());
        self.ticks = 0;
        let descriptor = Self::lookup(&mut self.descriptors, &initial)?;
        descriptor.reset_timer()?;
        descriptor.on_entry();
        Ok(())
    }

    /// Advance one tick.
    ///
    /// Runs the current state's tick action, counts its timer down, then fires
    /// the first rule that is either a timeout rule (only on the tick the
    /// timer expires) or a guard-only rule, and whose guard passes.
    pub fn update(&mut self) -> Result<Outcome<S>, EngineError> {
        let current = self.require_current()?.clone();
        self.ticks += 1;

        let descriptor = Self::lookup(&mut self.descriptors, &current)?;
        descriptor.on_tick();
        let timed_out = descriptor.advance_timer();
        if timed_out {
            tracing::trace!("{}: state {} timed out", self.description, current.name());
        }

        match self.table.find_tick_match(&current, timed_out) {
            Some(index) => self.fire(&current, index, None),
            None => Ok(Outcome::Unmatched),
        }
    }

    /// Handle an event.
    ///
    /// Fires the first rule from the current state whose trigger accepts the
    /// event and whose guard passes. Unmatched events are dropped.
    pub fn process(&mut self, event: &E) -> Result<Outcome<S>, EngineError> {
        let current = self.require_current()?.clone();

        match self.table.find_event_match(&current, event) {
            Some(index) => self.fire(&current, index, Some(event)),
            None => {
                if self.config.warn_on_unmatched {
                    tracing::warn!(
                        "{}: no transition from {} on {:?}",
                        self.description,
                        current.name(),
                        event
                    );
                } else {
                    tracing::debug!(
                        "{}: no transition from {} on {:?}",
                        self.description,
                        current.name(),
                        event
                    );
                }
                Ok(Outcome::Unmatched)
            }
        }
    }

    fn fire(
        &mut self,
        from: &S,
        index: usize,
        event: Option<&E>,
    ) -> Result<Outcome<S>, EngineError> {
        let rule = self
            .table
            .rule_mut(from, index)
            .ok_or_else(|| EngineError::UnknownState {
                state: from.name().to_string(),
            })?;
        let to = rule.to.clone();
        let trigger = rule.label(event);
        let leaves = to != *from;

        tracing::debug!(
            "{}: {} -> {} on {}",
            self.description,
            from.name(),
            to.name(),
            trigger
        );

        if leaves {
            Self::lookup(&mut self.descriptors, from)?.on_exit();
        }
        rule.fire_action(event);
        self.current = Some(to.clone());
        if leaves {
            let target = Self::lookup(&mut self.descriptors, &to)?;
            target.reset_timer()?;
            target.on_entry();
        }

        self.history.record(TransitionRecord {
            from: from.clone(),
            to: to.clone(),
            trigger,
            tick: self.ticks,
            timestamp: Utc::now(),
        });
        Ok(Outcome::Fired {
            from: from.clone(),
            to,
        })
    }

    fn lookup<'a>(
        descriptors: &'a mut HashMap<S, StateDescriptor<S>>,
        id: &S,
    ) -> Result<&'a mut StateDescriptor<S>, EngineError> {
        descriptors
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownState {
                state: id.name().to_string(),
            })
    }

    fn require_current(&self) -> Result<&S, EngineError> {
        self.current.as_ref().ok_or_else(|| EngineError::NotInitialized {
            engine: self.description.clone(),
        })
    }

    /// Current state id, `None` before `init()`.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Descriptor of the current state.
    pub fn state(&self) -> Result<&StateDescriptor<S>, EngineError> {
        let current = self.require_current()?;
        self.descriptors
            .get(current)
            .ok_or_else(|| EngineError::UnknownState {
                state: current.name().to_string(),
            })
    }

    /// Mutable descriptor of the current state, e.g. to replace its timer.
    pub fn state_mut(&mut self) -> Result<&mut StateDescriptor<S>, EngineError> {
        let current = self.require_current()?.clone();
        Self::lookup(&mut self.descriptors, &current)
    }

    pub fn descriptor(&self, id: &S) -> Option<&StateDescriptor<S>> {
        self.descriptors.get(id)
    }

    pub fn descriptor_mut(&mut self, id: &S) -> Option<&mut StateDescriptor<S>> {
        self.descriptors.get_mut(id)
    }

    /// Whether the current state is one of `states`.
    pub fn is(&self, states: &[S]) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| states.contains(current))
    }

    /// Overwrite the current state without running exit, entry or timer reset.
    pub fn set_state(&mut self, id: S) -> Result<(), EngineError> {
        if !self.descriptors.contains_key(&id) {
            return Err(EngineError::UnknownState {
                state: id.name().to_string(),
            });
        }
        tracing::debug!("{}: state forced to {}", self.description, id.name());
        self.current = Some(id);
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Rules leaving `state`, in priority order.
    pub fn rules_from(&self, state: &S) -> &[TransitionRule<S, E>] {
        self.table.rules_from(state)
    }

    /// All state ids known to the engine, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.descriptors.keys()
    }

    pub fn history(&self) -> &TransitionLog<S> {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of `update()` calls since the last `init()`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl<S: State, E: Event> fmt::Debug for Engine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("description", &self.description)
            .field("current", &self.current)
            .field("states", &self.descriptors.len())
            .field("rules", &self.table.len())
            .finish()
    }
}
