//! Events consumed by [`Engine::process`](crate::engine::Engine::process).

use std::fmt::Debug;

/// An event with a discoverable runtime kind.
///
/// Rules can match an event either by exact value (`on(event)`) or by kind
/// (`on_kind(kind)`). The kind plays the role of the event's runtime type:
/// override [`Event::is_kind`] when one event should satisfy several kinds,
/// e.g. a `BonusEaten` that also counts as a generic `FoodEaten`.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Event;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum GameEvent {
///     PelletEaten { x: u8, y: u8 },
///     PowerPill,
/// }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum GameEventKind {
///     PelletEaten,
///     PowerPill,
/// }
///
/// impl Event for GameEvent {
///     type Kind = GameEventKind;
///
///     fn kind(&self) -> GameEventKind {
///         match self {
///             Self::PelletEaten { .. } => GameEventKind::PelletEaten,
///             Self::PowerPill => GameEventKind::PowerPill,
///         }
///     }
/// }
///
/// let event = GameEvent::PelletEaten { x: 1, y: 2 };
/// assert!(event.is_kind(&GameEventKind::PelletEaten));
/// assert!(!event.is_kind(&GameEventKind::PowerPill));
/// ```
pub trait Event: PartialEq + Debug {
    /// Runtime type tag of an event.
    type Kind: PartialEq + Debug;

    /// The kind of this event.
    fn kind(&self) -> Self::Kind;

    /// Whether this event is assignable to `kind`.
    fn is_kind(&self, kind: &Self::Kind) -> bool {
        self.kind() == *kind
    }
}
