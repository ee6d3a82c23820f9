//! Transition history tracking.
//!
//! The engine appends one [`TransitionRecord`] per fired rule to a bounded
//! [`TransitionLog`]. The log is diagnostic only: nothing in the engine reads
//! it back to make decisions.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors raised when exporting the history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// What caused a recorded transition to fire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerLabel {
    /// The source state's timer expired on this tick.
    Timeout,
    /// A guard-only rule polled during `update()`.
    Unconditional,
    /// An event matched by kind or by value; holds the event's debug form.
    Event(String),
}

impl fmt::Display for TriggerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Unconditional => f.write_str("condition"),
            Self::Event(event) => write!(f, "event {event}"),
        }
    }
}

/// Record of a single fired transition.
///
/// Self-transitions are recorded too, with `from == to`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// What made the rule fire
    pub trigger: TriggerLabel,
    /// Engine tick (number of `update()` calls since `init()`) at firing time
    pub tick: u64,
    /// Wall-clock time of the firing
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered log of fired transitions.
///
/// Once `capacity` records are held, recording a new one evicts the oldest.
/// A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{TransitionLog, TransitionRecord, TriggerLabel};
/// use statecraft::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase { One, Two, Three }
/// }
///
/// let mut log = TransitionLog::with_capacity(8);
/// log.record(TransitionRecord {
///     from: Phase::One,
///     to: Phase::Two,
///     trigger: TriggerLabel::Timeout,
///     tick: 3,
///     timestamp: Utc::now(),
/// });
/// log.record(TransitionRecord {
///     from: Phase::Two,
///     to: Phase::Three,
///     trigger: TriggerLabel::Unconditional,
///     tick: 4,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.get_path(), vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: usize,
}

impl<S: State> TransitionLog<S> {
    /// Create an empty log holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of every record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Wall-clock time between the oldest and newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Export the log as JSON.
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Walking,
        Running,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Walking => "Walking",
                Self::Running => "Running",
            }
        }
    }

    fn record(from: TestState, to: TestState, tick: u64) -> TransitionRecord<TestState> {
        TransitionRecord {
            from,
            to,
            trigger: TriggerLabel::Timeout,
            tick,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log: TransitionLog<TestState> = TransitionLog::with_capacity(4);
        assert!(log.is_empty());
        assert!(log.get_path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut log = TransitionLog::with_capacity(4);
        log.record(record(TestState::Idle, TestState::Walking, 1));
        log.record(record(TestState::Walking, TestState::Running, 2));

        let path = log.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Idle);
        assert_eq!(path[1], &TestState::Walking);
        assert_eq!(path[2], &TestState::Running);
    }

    #[test]
    fn full_log_evicts_oldest() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(record(TestState::Idle, TestState::Walking, 1));
        log.record(record(TestState::Walking, TestState::Running, 2));
        log.record(record(TestState::Running, TestState::Idle, 3));

        assert_eq!(log.len(), 2);
        let ticks: Vec<u64> = log.records().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![2, 3]);
        assert_eq!(log.last().map(|r| &r.to), Some(&TestState::Idle));
    }

    #[test]
    fn zero_capacity_disables_recording() {
        let mut log = TransitionLog::with_capacity(0);
        log.record(record(TestState::Idle, TestState::Walking, 1));
        assert!(log.is_empty());
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut log = TransitionLog::with_capacity(1);
        log.record(record(TestState::Idle, TestState::Walking, 1));
        assert_eq!(log.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::with_capacity(4);
        log.record(TransitionRecord {
            from: TestState::Idle,
            to: TestState::Walking,
            trigger: TriggerLabel::Event("Step".to_string()),
            tick: 7,
            timestamp: Utc::now(),
        });

        let json = log.to_json().unwrap();
        let restored: TransitionLog<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.capacity(), 4);
        assert_eq!(
            restored.last().map(|r| r.trigger.clone()),
            Some(TriggerLabel::Event("Step".to_string()))
        );
    }

    #[test]
    fn trigger_labels_display() {
        assert_eq!(TriggerLabel::Timeout.to_string(), "timeout");
        assert_eq!(TriggerLabel::Unconditional.to_string(), "condition");
        assert_eq!(TriggerLabel::Event("Hit".into()).to_string(), "event Hit");
    }
}
