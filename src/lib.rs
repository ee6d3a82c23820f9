//! Statecraft: a tick-driven finite-state machine engine
//!
//! Statecraft drives the time- and event-based behavior of game and
//! simulation entities. An external tick loop calls [`Engine::update`] once
//! per frame and [`Engine::process`] for every event; the engine resolves
//! transitions from a declarative, priority-ordered rule table.
//!
//! # Core Concepts
//!
//! - **State descriptors**: entry/tick/exit actions plus an edge-triggered
//!   timer that signals exactly once, on the tick it reaches zero
//! - **Transition rules**: source, target, one trigger (timeout, event kind,
//!   event value, or none), optional guard and action
//! - **First-match priority**: among eligible rules the earliest declared wins
//! - **Two-phase builder**: declare states, then transitions; everything is
//!   validated in a single `build()`
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::EngineBuilder;
//! use statecraft::core::Event;
//! use statecraft::state_enum;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! state_enum! {
//!     enum Ghost {
//!         Locked,
//!         Chasing,
//!         Frightened,
//!     }
//! }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum GameEvent {
//!     PowerPill,
//! }
//!
//! impl Event for GameEvent {
//!     type Kind = ();
//!     fn kind(&self) -> Self::Kind {}
//! }
//!
//! let flashes = Rc::new(Cell::new(0));
//! let f = Rc::clone(&flashes);
//!
//! let mut ghost = EngineBuilder::<Ghost, GameEvent>::new()
//!     .description("Blinky")
//!     .initial(Ghost::Locked)
//!     .states()
//!         .state(Ghost::Locked).constant_timeout(2)
//!         .state(Ghost::Frightened).constant_timeout(5).on_tick(move || f.set(f.get() + 1))
//!     .transitions()
//!         .when(Ghost::Locked).then(Ghost::Chasing).on_timeout()
//!         .when(Ghost::Chasing).then(Ghost::Frightened).on(GameEvent::PowerPill)
//!         .when(Ghost::Frightened).then(Ghost::Chasing).on_timeout()
//!     .build()
//!     .unwrap();
//!
//! ghost.init().unwrap();
//! ghost.update().unwrap();
//! ghost.update().unwrap();
//! assert!(ghost.is(&[Ghost::Chasing]));
//!
//! ghost.process(&GameEvent::PowerPill).unwrap();
//! for _ in 0..5 {
//!     ghost.update().unwrap();
//! }
//! assert!(ghost.is(&[Ghost::Chasing]));
//! assert_eq!(flashes.get(), 5);
//! ```

pub mod builder;
pub mod client;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder};
pub use client::{Component, FsmContainer};
pub use core::{Event, Guard, State, TransitionLog};
pub use engine::{Engine, EngineConfig, EngineError, Outcome, StateBehavior, ENDLESS};
