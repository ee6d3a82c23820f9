//! Core types shared by the engine and the builder.
//!
//! - State ids via the `State` trait
//! - Events via the `Event` trait
//! - Guard predicates for transition control
//! - Bounded transition history

mod event;
mod guard;
mod history;
mod state;

pub use event::Event;
pub use guard::Guard;
pub use history::{HistoryError, TransitionLog, TransitionRecord, TriggerLabel};
pub use state::State;
