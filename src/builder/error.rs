//! Build errors for the engine builder.

use thiserror::Error;

/// Errors that can occur when building an engine.
///
/// The builder records the first misuse and ignores later calls; `build()`
/// then returns that error instead of an engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("'{method}' called before a state was started. Call .state(id) first")]
    StateNotStarted { method: &'static str },

    #[error("'{method}' called before a transition was started. Call .when(state) or .stay(state) first")]
    RuleNotStarted { method: &'static str },

    #[error("Transition '{rule}' already triggers on timeout")]
    DuplicateTimeout { rule: String },

    #[error("Transition '{rule}' already triggers on {existing}; cannot also trigger on {requested}")]
    ConflictingTrigger {
        rule: String,
        existing: String,
        requested: String,
    },
}
