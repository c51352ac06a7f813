//! tinyfsm: a small embeddable finite-state-machine engine
//!
//! A machine tracks one current state, validates events against per-event
//! transition maps, and runs enter-callbacks when a transition lands on a
//! state (or on the `Any` wildcard). Machine types are declared once as a
//! [`MachineSpec`] and materialized onto as many fresh machines as needed.
//!
//! # Core Concepts
//!
//! - **State** / **Event**: opaque identifiers via the `State` and `Event` traits
//! - **Transitions**: deterministic `(event, from) -> to` mappings
//! - **Callbacks**: run after the state is committed, destination first, then `Any`
//! - **Specs**: immutable machine descriptions applied per instance
//!
//! # Example
//!
//! ```rust
//! use tinyfsm::{event_enum, state_enum, MachineSpec};
//! use std::sync::{Arc, Mutex};
//!
//! state_enum! {
//!     enum Pose {
//!         Standing = "standing",
//!         Walking = "walking",
//!         Running = "running",
//!         Jumping = "jumping",
//!     }
//! }
//!
//! event_enum! {
//!     enum Move {
//!         Walk = "walk",
//!         Run = "run",
//!         Stand = "stand",
//!         Jump = "jump",
//!     }
//! }
//!
//! let changes = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&changes);
//!
//! let spec: MachineSpec<Pose, Move> = MachineSpec::new(Pose::Standing)
//!     .on_any(move |machine, event, _| {
//!         log.lock().unwrap().push((*event, *machine.current_state()));
//!         Ok(())
//!     })
//!     .define_event(Move::Walk, |e| {
//!         e.add_transition([Pose::Standing, Pose::Running], Pose::Walking)
//!     })
//!     .define_event(Move::Run, |e| {
//!         e.add_transition([Pose::Standing, Pose::Walking], Pose::Running)
//!     })
//!     .define_event(Move::Stand, |e| {
//!         e.add_transition([Pose::Walking, Pose::Running], Pose::Standing)
//!     })
//!     .define_event(Move::Jump, |e| e.add_transition(Pose::Standing, Pose::Jumping));
//!
//! let mut player = spec.build();
//! assert!(player.trigger(&Move::Run).unwrap());
//! assert!(player.trigger(&Move::Walk).unwrap());
//! assert!(!player.trigger(&Move::Jump).unwrap());
//! assert_eq!(player.current_state(), &Pose::Walking);
//!
//! assert_eq!(
//!     *changes.lock().unwrap(),
//!     vec![(Move::Run, Pose::Running), (Move::Walk, Pose::Walking)]
//! );
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{EventSpec, MachineSpec};
pub use core::{CallbackKey, Event, State};
pub use engine::{CallbackError, FsmError, MachineConfig, StateMachine};
