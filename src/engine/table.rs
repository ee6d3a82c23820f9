//! Per-source ordered transition table.
//!
//! Rules are grouped by source state and kept in declaration order. That
//! order is the priority: a scan returns the first eligible rule, never the
//! most specific one.

use super::transition::TransitionRule;
use crate::core::{Event, State};
use std::collections::HashMap;

pub struct TransitionTable<S: State, E: Event> {
    by_source: HashMap<S, Vec<TransitionRule<S, E>>>,
    len: usize,
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new() -> Self {
        Self {
            by_source: HashMap::new(),
            len: 0,
        }
    }

    /// Append a rule behind all rules already declared for its source.
    pub fn push(&mut self, rule: TransitionRule<S, E>) {
        self.by_source
            .entry(rule.from.clone())
            .or_default()
            .push(rule);
        self.len += 1;
    }

    /// Rules leaving `state`, in priority order.
    pub fn rules_from(&self, state: &S) -> &[TransitionRule<S, E>] {
        self.by_source.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Index of the first rule from `state` matching `event` whose guard passes.
    pub fn find_event_match(&self, state: &S, event: &E) -> Option<usize> {
        self.rules_from(state)
            .iter()
            .position(|rule| rule.accepts_event(event) && rule.guard_passes())
    }

    /// Index of the first timeout or unconditional rule from `state` whose guard passes.
    pub fn find_tick_match(&self, state: &S, timed_out: bool) -> Option<usize> {
        self.rules_from(state)
            .iter()
            .position(|rule| rule.accepts_tick(timed_out) && rule.guard_passes())
    }

    pub(crate) fn rule_mut(
        &mut self,
        state: &S,
        index: usize,
    ) -> Option<&mut TransitionRule<S, E>> {
        self.by_source.get_mut(state)?.get_mut(index)
    }

    /// Every state named as a source or target by some rule.
    pub fn referenced_states(&self) -> impl Iterator<Item = &S> {
        self.by_source
            .values()
            .flatten()
            .flat_map(|rule| [&rule.from, &rule.to])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<S: State, E: Event> Default for TransitionTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
