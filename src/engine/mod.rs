//! The transition-resolution engine.
//!
//! - **Descriptors**: per-state entry/tick/exit actions and edge-triggered timers
//! - **Transition table**: per-source rules scanned in declaration order
//! - **Engine**: current-state pointer and the `init`/`update`/`process` lifecycle
//!
//! Everything here runs synchronously on the caller's thread. Callbacks are
//! plain closures without `Send` bounds, and every entry point takes
//! `&mut self`, so a callback cannot re-enter the engine it is running in.

mod config;
mod descriptor;
mod error;
mod machine;
mod table;
mod transition;

pub use config::{ConfigError, EngineConfig};
pub use descriptor::{Action, Hook, StateBehavior, StateDescriptor, TimerFn, ENDLESS};
pub use error::EngineError;
pub use machine::{Engine, Outcome};
pub use table::TransitionTable;
pub use transition::{TransitionAction, TransitionRule, Trigger};
