//! Runtime errors raised by the engine.

use thiserror::Error;

/// Errors that can occur while driving an engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Engine '{engine}' is not initialized. Call .init() first")]
    NotInitialized { engine: String },

    #[error("State '{state}' is not known to this engine")]
    UnknownState { state: String },

    #[error("Timer function is missing in state '{state}'")]
    TimerMissing { state: String },
}
