//! Core State trait for state identifiers.
//!
//! A state id is an opaque, comparable label (typically a fieldless enum).
//! The engine keys its descriptor map and transition table by it, so ids
//! must be hashable and unique within one engine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine state ids.
///
/// # Required Traits
///
/// - `Clone`: ids are copied into rules, history records and errors
/// - `Eq` + `Hash`: ids key the descriptor map and the transition table
/// - `Debug`: ids show up in diagnostics
/// - `Serialize` + `Deserialize`: ids appear in the serializable transition log
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum GhostState {
///     Locked,
///     Chasing,
///     Frightened,
/// }
///
/// impl State for GhostState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Locked => "Locked",
///             Self::Chasing => "Chasing",
///             Self::Frightened => "Frightened",
///         }
///     }
/// }
///
/// assert_eq!(GhostState::Chasing.name(), "Chasing");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
