//! Arcade Ghost
//!
//! This example drives a ghost through a few hundred frames of a maze game.
//!
//! Key concepts:
//! - Timed states that leave on their own (Locked, Scattering, Frightened)
//! - Event rules matched by kind and by value
//! - A guard-only rule polled every frame
//! - A component broadcasting events to listeners
//!
//! Run with: RUST_LOG=debug cargo run --example ghost

use statecraft::builder::EngineBuilder;
use statecraft::client::{Component, FsmContainer};
use statecraft::core::Event;
use statecraft::engine::Outcome;
use statecraft::state_enum;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum GhostState {
        Locked,
        Scattering,
        Chasing,
        Frightened,
        Eaten,
    }
}

#[derive(Clone, PartialEq, Debug)]
enum MazeEvent {
    PowerPill,
    Collision { pacman_powered: bool },
    ReachedHome,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum MazeEventKind {
    PowerPill,
    Collision,
    ReachedHome,
}

impl Event for MazeEvent {
    type Kind = MazeEventKind;

    fn kind(&self) -> MazeEventKind {
        match self {
            Self::PowerPill => MazeEventKind::PowerPill,
            Self::Collision { .. } => MazeEventKind::Collision,
            Self::ReachedHome => MazeEventKind::ReachedHome,
        }
    }
}

struct Ghost {
    brain: Component<GhostState, MazeEvent>,
}

impl FsmContainer<GhostState, MazeEvent> for Ghost {
    fn fsm_component(&self) -> &Component<GhostState, MazeEvent> {
        &self.brain
    }

    fn fsm_component_mut(&mut self) -> &mut Component<GhostState, MazeEvent> {
        &mut self.brain
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Arcade Ghost ===\n");

    // Pac-Man's distance to the ghost, updated by the "game" below
    let distance = Rc::new(Cell::new(20u32));
    let near = Rc::clone(&distance);
    let lives_lost = Rc::new(Cell::new(0u32));
    let lost = Rc::clone(&lives_lost);

    let engine = EngineBuilder::<GhostState, MazeEvent>::new()
        .description("Blinky")
        .initial(GhostState::Locked)
        .states()
        .state(GhostState::Locked)
        .constant_timeout(30)
        .on_exit(|| println!("  Blinky leaves the pen"))
        .state(GhostState::Scattering)
        .constant_timeout(70)
        .state(GhostState::Frightened)
        .constant_timeout(40)
        .on_entry(|| println!("  Blinky turns blue"))
        .state(GhostState::Eaten)
        .on_entry(|| println!("  Blinky's eyes head home"))
        .transitions()
        .when(GhostState::Locked)
        .then(GhostState::Scattering)
        .on_timeout()
        .when(GhostState::Scattering)
        .then(GhostState::Chasing)
        .on_timeout()
        .when(GhostState::Chasing)
        .then(GhostState::Scattering)
        .condition(move || near.get() > 40)
        .when(GhostState::Chasing)
        .then(GhostState::Frightened)
        .on(MazeEvent::PowerPill)
        .stay(GhostState::Chasing)
        .on_kind(MazeEventKind::Collision)
        .act(move |_| lost.set(lost.get() + 1))
        .when(GhostState::Frightened)
        .then(GhostState::Chasing)
        .on_timeout()
        .when(GhostState::Frightened)
        .then(GhostState::Eaten)
        .on(MazeEvent::Collision {
            pacman_powered: true,
        })
        .when(GhostState::Eaten)
        .then(GhostState::Locked)
        .on_kind(MazeEventKind::ReachedHome)
        .build()
        .expect("ghost rules are well formed");

    let mut blinky = Ghost {
        brain: Component::new(engine),
    };
    let heard = Rc::new(Cell::new(0u32));
    let h = Rc::clone(&heard);
    blinky.add_event_listener(move |_: &MazeEvent| h.set(h.get() + 1));

    blinky.init().expect("initial state is known");

    for frame in 1..=320u32 {
        if let Outcome::Fired { from, to } = blinky.update().expect("engine is initialized") {
            println!("frame {frame:>3}: {from:?} -> {to:?}");
        }

        let event = match frame {
            120 => Some(MazeEvent::Collision {
                pacman_powered: false,
            }),
            150 => Some(MazeEvent::PowerPill),
            170 => Some(MazeEvent::Collision {
                pacman_powered: true,
            }),
            200 => Some(MazeEvent::ReachedHome),
            _ => None,
        };
        if let Some(event) = event {
            blinky.publish(&event);
            if let Outcome::Fired { from, to } =
                blinky.process(&event).expect("engine is initialized")
            {
                println!("frame {frame:>3}: {from:?} -> {to:?} on {event:?}");
            }
        }

        // Pac-Man runs away for a while, then comes back
        distance.set(if (305..310).contains(&frame) { 50 } else { 20 });
    }

    println!("\nFinal state: {:?}", blinky.current_state());
    println!("Lives lost: {}", lives_lost.get());
    println!("Events heard by listeners: {}", heard.get());
    println!("Recorded transitions: {}", blinky.fsm().history().len());

    println!("\n=== Example Complete ===");
}
