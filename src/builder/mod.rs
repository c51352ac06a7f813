//! Declarative configuration of machine types.
//!
//! A [`MachineSpec`] records a machine's shape once: its initial state,
//! enter-callbacks per state (or the wildcard), and per-event transitions
//! described through [`EventSpec`]. The spec is then applied onto fresh
//! [`StateMachine`](crate::engine::StateMachine)s, each of which gets its
//! own copy of the table and its own callback registry.
//!
//! The [`state_enum!`](crate::state_enum) and
//! [`event_enum!`](crate::event_enum) macros declare the identifier types.

pub mod event;
pub mod keys;
pub mod machine;
pub mod macros;
pub mod validate;

pub use event::EventSpec;
pub use keys::{Sources, StateKeys};
pub use machine::MachineSpec;
pub use validate::SpecIssue;
