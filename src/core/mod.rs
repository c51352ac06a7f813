//! Core state machine types.
//!
//! This module contains the data the engine operates on:
//! - State and event identifiers via the `State` and `Event` traits
//! - Callback registry keys, including the `Any` wildcard
//! - Transition maps and tables
//! - Transition history records
//!
//! Nothing in here knows how a machine is configured or driven.

mod history;
mod key;
mod state;
mod table;

pub use history::{StateHistory, StateTransition};
pub use key::CallbackKey;
pub use state::{Event, State};
pub use table::{TransitionMap, TransitionTable};

pub(crate) use table::unique;
