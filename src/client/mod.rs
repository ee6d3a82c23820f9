//! Client-side wrappers around an engine.
//!
//! [`Component`] composes an engine with a synchronous event broadcaster;
//! [`FsmContainer`] lets an entity expose the whole surface by forwarding to
//! a component it owns.

mod component;
mod container;

pub use component::{Component, ListenerId};
pub use container::FsmContainer;
