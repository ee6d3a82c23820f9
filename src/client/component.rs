//! An engine bundled with event listeners.

use crate::core::{Event, State};
use crate::engine::{Engine, EngineError, Outcome, StateDescriptor};
use std::fmt;

/// Handle returned by [`Component::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Owns an [`Engine`] and a list of event listeners.
///
/// Entities that hold a `Component` (directly, or through
/// [`FsmContainer`](super::FsmContainer)) get the full engine surface plus a
/// synchronous broadcaster: [`publish`](Self::publish) hands the event to
/// every listener in registration order before returning.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::EngineBuilder;
/// use statecraft::client::Component;
/// use statecraft::core::Event;
/// use statecraft::state_enum;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// state_enum! {
///     enum Pacman { Alive }
/// }
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum PacEvent { Killed, Ate(u32) }
///
/// impl Event for PacEvent {
///     type Kind = ();
///     fn kind(&self) -> Self::Kind {}
/// }
///
/// let engine = EngineBuilder::<Pacman, PacEvent>::new()
///     .initial(Pacman::Alive)
///     .build()
///     .unwrap();
/// let mut pacman = Component::new(engine);
///
/// let score = Rc::new(RefCell::new(Vec::new()));
/// let s = Rc::clone(&score);
/// pacman.add_event_listener(move |event: &PacEvent| s.borrow_mut().push(event.clone()));
/// pacman.set_publish_logged(|event| *event != PacEvent::Killed);
///
/// pacman.publish(&PacEvent::Ate(10));
/// pacman.publish(&PacEvent::Killed);
/// assert_eq!(*score.borrow(), vec![PacEvent::Ate(10), PacEvent::Killed]);
/// ```
pub struct Component<S: State, E: Event> {
    fsm: Engine<S, E>,
    listeners: Vec<(ListenerId, Listener<E>)>,
    next_listener: u64,
    publish_logged: Box<dyn Fn(&E) -> bool>,
}

impl<S: State, E: Event> Component<S, E> {
    pub fn new(fsm: Engine<S, E>) -> Self {
        Self {
            fsm,
            listeners: Vec::new(),
            next_listener: 0,
            publish_logged: Box::new(|_| true),
        }
    }

    pub fn fsm(&self) -> &Engine<S, E> {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut Engine<S, E> {
        &mut self.fsm
    }

    /// The engine's description.
    pub fn name(&self) -> &str {
        self.fsm.description()
    }

    /// Register a listener; it receives every published event.
    pub fn add_event_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Decide which published events get a log line. Delivery is unaffected.
    pub fn set_publish_logged<F>(&mut self, predicate: F)
    where
        F: Fn(&E) -> bool + 'static,
    {
        self.publish_logged = Box::new(predicate);
    }

    /// Deliver `event` to all listeners, in registration order.
    pub fn publish(&mut self, event: &E) {
        if (self.publish_logged)(event) {
            tracing::info!("{} published event {:?}", self.name(), event);
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn init(&mut self) -> Result<(), EngineError> {
        self.fsm.init()
    }

    pub fn update(&mut self) -> Result<Outcome<S>, EngineError> {
        self.fsm.update()
    }

    pub fn process(&mut self, event: &E) -> Result<Outcome<S>, EngineError> {
        self.fsm.process(event)
    }

    pub fn current_state(&self) -> Option<&S> {
        self.fsm.current_state()
    }

    pub fn state(&self) -> Result<&StateDescriptor<S>, EngineError> {
        self.fsm.state()
    }

    pub fn is(&self, states: &[S]) -> bool {
        self.fsm.is(states)
    }

    pub fn set_state(&mut self, id: S) -> Result<(), EngineError> {
        self.fsm.set_state(id)
    }
}

impl<S: State, E: Event> fmt::Debug for Component<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("fsm", &self.fsm)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
