//! Builder API for ergonomic engine construction.
//!
//! This module provides the two-phase fluent builder and the `state_enum!`
//! macro. Builders collect plain drafts and validate everything in `build()`,
//! so an engine is either complete or not returned at all.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::{EngineBuilder, StateBuilder};
pub use transition::TransitionBuilder;
