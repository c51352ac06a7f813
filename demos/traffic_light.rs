//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - A single event whose meaning depends on the current state
//! - Enter-callbacks per state
//!
//! Run with: cargo run --example traffic_light

use tinyfsm::{event_enum, state_enum, MachineSpec, State};

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

event_enum! {
    enum Signal {
        Next = "next",
    }
}

fn main() -> Result<(), tinyfsm::FsmError> {
    println!("=== Traffic Light State Machine ===\n");

    let spec: MachineSpec<TrafficLight, Signal> = MachineSpec::new(TrafficLight::Red)
        .define_state(TrafficLight::Green, |_, _, _| {
            println!("  Go!");
            Ok(())
        })
        .define_state(TrafficLight::Yellow, |_, _, _| {
            println!("  Caution");
            Ok(())
        })
        .define_state(TrafficLight::Red, |_, _, _| {
            println!("  Stop");
            Ok(())
        })
        .define_event(Signal::Next, |e| {
            e.add_transition(TrafficLight::Red, TrafficLight::Green)
                .add_transition(TrafficLight::Green, TrafficLight::Yellow)
                .add_transition(TrafficLight::Yellow, TrafficLight::Red)
        });

    let mut light = spec.build();
    println!("Initial state: {}\n", light.current_state().name());

    println!("Transition sequence:");
    for _ in 0..6 {
        light.trigger_or_fail(&Signal::Next)?;
        println!("  -> {}", light.current_state().name());
    }

    println!("\nThis is a cyclic state machine - the sequence repeats:");
    println!("  Red -> Green -> Yellow -> Red -> Green -> ...\n");

    println!("Key Characteristics:");
    println!("- One event, three transitions: the current state picks the target");
    println!("- No terminal state (cycles indefinitely)");
    println!("- {} transitions recorded", light.history().len());

    println!("\n=== Example Complete ===");
    Ok(())
}
