//! Player Character
//!
//! This example drives a game character through a fixed-step loop, the way
//! a host entity system embeds one machine per entity.
//!
//! Key concepts:
//! - One immutable spec shared by every entity
//! - Per-entity wildcard callback recording "state changed at tick T"
//! - Text commands resolved through name-based dispatch
//! - Structured logging (set RUST_LOG=tinyfsm=debug to see transitions)
//!
//! Run with: cargo run --example player

use serde_json::json;
use std::sync::{Arc, Mutex};
use tinyfsm::engine::{dispatch, MachineConfig};
use tinyfsm::{event_enum, state_enum, Event, MachineSpec, State, StateMachine};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Pose {
        Standing = "standing",
        Walking = "walking",
        Running = "running",
        Jumping = "jumping",
    }
}

event_enum! {
    enum Move {
        Walk = "walk",
        Run = "run",
        Stand = "stand",
        Jump = "jump",
    }
}

type Payload = serde_json::Value;

const TICKS_PER_SECOND: u64 = 60;

#[derive(Clone, Copy, Debug)]
struct StateChanged {
    to: Pose,
    at: u64,
}

impl StateChanged {
    fn elapsed(&self, now: u64, seconds: u64) -> bool {
        now.saturating_sub(self.at) >= seconds * TICKS_PER_SECOND
    }
}

struct Entity {
    id: usize,
    fsm: StateMachine<Pose, Move, Payload>,
    changed: Arc<Mutex<StateChanged>>,
}

fn player_spec() -> MachineSpec<Pose, Move, Payload> {
    MachineSpec::new(Pose::Standing)
        .with_config(MachineConfig::default().history_limit(Some(8)))
        .define_state(Pose::Standing, |_, _, _| {
            println!("    STAND");
            Ok(())
        })
        .define_state([Pose::Walking, Pose::Running], |_, event: &Move, payload: Option<&Payload>| {
            println!("    on event {} with {:?}", event.name(), payload);
            Ok(())
        })
        .declare_state(Pose::Jumping)
        .define_event(Move::Walk, |e| {
            e.add_transition([Pose::Standing, Pose::Running], Pose::Walking)
        })
        .define_event(Move::Run, |e| {
            e.add_transition(Pose::Standing, Pose::Running)
                .add_transition(Pose::Walking, Pose::Running)
        })
        .define_event(Move::Stand, |e| {
            e.add_transition(Pose::Walking, Pose::Standing)
                .add_transition(Pose::Running, Pose::Standing)
        })
        .define_event(Move::Jump, |e| e.add_transition(Pose::Standing, Pose::Jumping))
}

fn spawn(id: usize, spec: &MachineSpec<Pose, Move, Payload>, clock: &Arc<Mutex<u64>>) -> Entity {
    let mut fsm = spec.build();
    let changed = Arc::new(Mutex::new(StateChanged {
        to: *fsm.current_state(),
        at: *clock.lock().unwrap(),
    }));

    let record = Arc::clone(&changed);
    let clock = Arc::clone(clock);
    fsm.on_any(move |m, _, _| {
        *record.lock().unwrap() = StateChanged {
            to: *m.current_state(),
            at: *clock.lock().unwrap(),
        };
        Ok(())
    });

    Entity { id, fsm, changed }
}

fn label(entity: &Entity) -> String {
    let events: Vec<_> = entity
        .fsm
        .list_triggerable_events()
        .iter()
        .map(|event| event.name().to_string())
        .collect();
    format!(
        "#{} {} {}",
        entity.id,
        entity.fsm.current_state().name(),
        events.join("|")
    )
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Player Character ===\n");

    let spec = player_spec();
    if let stillwater::validation::Validation::Failure(issues) = spec.validate() {
        for issue in issues.iter() {
            println!("spec issue: {issue}");
        }
    }

    let clock = Arc::new(Mutex::new(0u64));
    let mut entities: Vec<Entity> = (0..2).map(|id| spawn(id, &spec, &clock)).collect();

    for tick in 0..(8 * TICKS_PER_SECOND) {
        *clock.lock().unwrap() = tick;

        for entity in &mut entities {
            let changed = *entity.changed.lock().unwrap();
            if entity.fsm.is_in(&Pose::Standing) && changed.elapsed(tick, 3) {
                let direction = if (tick + entity.id as u64) % 2 == 0 {
                    "left"
                } else {
                    "right"
                };
                println!("  tick {tick}: #{} walks {direction}", entity.id);
                entity
                    .fsm
                    .trigger_with(&Move::Walk, &json!({ "direction": direction }))?;
            } else if changed.to == Pose::Walking && changed.elapsed(tick, 1) {
                println!("  tick {tick}: #{} stands", entity.id);
                dispatch(&mut entity.fsm, "stand!", None)?;
            }
        }

        if tick % TICKS_PER_SECOND == 0 {
            for entity in &entities {
                println!("  [{tick:>3}] {}", label(entity));
            }
        }
    }

    println!("\nHistory of #0:");
    for transition in entities[0].fsm.history().transitions() {
        println!(
            "  {} -> {} via {}",
            transition.from.name(),
            transition.to.name(),
            transition.event.name()
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
