//! Forwarding trait for entities that hold a [`Component`].

use super::component::{Component, ListenerId};
use crate::core::{Event, State};
use crate::engine::{Engine, EngineError, Outcome, StateDescriptor};

/// Implemented by entities that own a [`Component`].
///
/// Only the two accessors are required; every engine and listener
/// operation is forwarded to the component.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::EngineBuilder;
/// use statecraft::client::{Component, FsmContainer};
/// use statecraft::core::Event;
/// use statecraft::state_enum;
///
/// state_enum! {
///     enum Mood { Calm, Angry }
/// }
///
/// #[derive(PartialEq, Debug)]
/// struct Poked;
///
/// impl Event for Poked {
///     type Kind = ();
///     fn kind(&self) -> Self::Kind {}
/// }
///
/// struct Ghost {
///     brain: Component<Mood, Poked>,
/// }
///
/// impl FsmContainer<Mood, Poked> for Ghost {
///     fn fsm_component(&self) -> &Component<Mood, Poked> {
///         &self.brain
///     }
///
///     fn fsm_component_mut(&mut self) -> &mut Component<Mood, Poked> {
///         &mut self.brain
///     }
/// }
///
/// let engine = EngineBuilder::new()
///     .initial(Mood::Calm)
///     .transitions()
///     .when(Mood::Calm).then(Mood::Angry).on(Poked)
///     .build()
///     .unwrap();
/// let mut blinky = Ghost { brain: Component::new(engine) };
///
/// blinky.init().unwrap();
/// blinky.process(&Poked).unwrap();
/// assert!(blinky.is(&[Mood::Angry]));
/// ```
pub trait FsmContainer<S: State + 'static, E: Event + 'static> {
    fn fsm_component(&self) -> &Component<S, E>;

    fn fsm_component_mut(&mut self) -> &mut Component<S, E>;

    fn fsm(&self) -> &Engine<S, E> {
        self.fsm_component().fsm()
    }

    fn name(&self) -> &str {
        self.fsm_component().name()
    }

    fn init(&mut self) -> Result<(), EngineError> {
        self.fsm_component_mut().init()
    }

    fn update(&mut self) -> Result<Outcome<S>, EngineError> {
        self.fsm_component_mut().update()
    }

    fn process(&mut self, event: &E) -> Result<Outcome<S>, EngineError> {
        self.fsm_component_mut().process(event)
    }

    fn current_state(&self) -> Option<&S> {
        self.fsm_component().current_state()
    }

    fn state(&self) -> Result<&StateDescriptor<S>, EngineError> {
        self.fsm_component().state()
    }

    fn is(&self, states: &[S]) -> bool {
        self.fsm_component().is(states)
    }

    fn set_state(&mut self, id: S) -> Result<(), EngineError> {
        self.fsm_component_mut().set_state(id)
    }

    fn add_event_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        self.fsm_component_mut().add_event_listener(listener)
    }

    fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.fsm_component_mut().remove_event_listener(id)
    }

    fn publish(&mut self, event: &E) {
        self.fsm_component_mut().publish(event)
    }
}
