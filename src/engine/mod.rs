//! Runtime engine for event-driven state machines.
//!
//! A [`StateMachine`] owns its current state, transition table and
//! callback registry. Triggering an event is synchronous: the state is
//! committed, the transition is recorded, then the enter-callbacks for the
//! new state and the wildcard run in registration order.
//!
//! # Error Model
//!
//! - Unknown events always fail with [`FsmError::UnknownEvent`].
//! - `trigger` reports "not triggerable" as `Ok(false)`; `trigger_or_fail`
//!   turns it into [`FsmError::IllegalTransition`].
//! - Callback errors propagate unmodified; the transition stays committed.

mod callback;
mod config;
mod dispatch;
mod error;
mod machine;

pub use callback::{Callback, CallbackRegistry};
pub use config::{ConfigError, MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use dispatch::{dispatch, Command, Dispatched};
pub use error::{CallbackError, FsmError};
pub use machine::{MachineId, StateMachine};
