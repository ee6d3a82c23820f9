//! Traffic Light
//!
//! This example demonstrates a cyclic, purely timed engine.
//!
//! Key concepts:
//! - Every state leaves on its own timeout
//! - A timer function re-evaluated on each entry (rush hour)
//! - A pedestrian button that shortens the green phase
//! - Reading the transition log afterwards
//!
//! Run with: cargo run --example traffic_light

use statecraft::builder::EngineBuilder;
use statecraft::core::{Event, State};
use statecraft::state_enum;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

#[derive(Clone, PartialEq, Debug)]
struct PedestrianButton;

impl Event for PedestrianButton {
    type Kind = ();

    fn kind(&self) -> Self::Kind {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== Traffic Light ===\n");

    let rush_hour = Rc::new(Cell::new(false));
    let busy = Rc::clone(&rush_hour);

    let mut light = EngineBuilder::<TrafficLight, PedestrianButton>::new()
        .description("Main St / 5th Ave")
        .initial(TrafficLight::Red)
        .states()
        .state(TrafficLight::Red)
        .constant_timeout(6)
        .state(TrafficLight::Green)
        .timeout_after(move || if busy.get() { 12 } else { 8 })
        .state(TrafficLight::Yellow)
        .constant_timeout(2)
        .transitions()
        .when(TrafficLight::Red)
        .then(TrafficLight::Green)
        .on_timeout()
        .when(TrafficLight::Green)
        .then(TrafficLight::Yellow)
        .on_timeout()
        .when(TrafficLight::Green)
        .then(TrafficLight::Yellow)
        .on_kind(())
        .when(TrafficLight::Yellow)
        .then(TrafficLight::Red)
        .on_timeout()
        .build()
        .expect("light rules are well formed");

    light.init().expect("initial state is known");

    for second in 1..=60u32 {
        if second == 30 {
            println!("-- rush hour starts --");
            rush_hour.set(true);
        }
        light.update().expect("engine is initialized");

        if second == 45 && light.is(&[TrafficLight::Green]) {
            println!("-- pedestrian presses the button --");
            light
                .process(&PedestrianButton)
                .expect("engine is initialized");
        }

        let state = light.state().expect("engine is initialized");
        println!(
            "t={second:>2}s  {:<6} {}/{}",
            state.id().name(),
            state.ticks_consumed(),
            state.duration()
        );
    }

    println!("\nPhases taken:");
    for record in light.history().records() {
        println!(
            "  tick {:>2}: {} -> {} ({})",
            record.tick,
            record.from.name(),
            record.to.name(),
            record.trigger
        );
    }

    println!("\n=== Example Complete ===");
}
