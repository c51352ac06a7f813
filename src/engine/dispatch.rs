//! Name-based dispatch over a machine's events and states.
//!
//! Hosts that drive machines from text (scripts, consoles, config) resolve
//! command strings here instead of matching names themselves:
//!
//! | command    | meaning                                   |
//! |------------|-------------------------------------------|
//! | `walk`     | `trigger(walk)`                           |
//! | `walk!`    | `trigger_or_fail(walk)`                   |
//! | `walk?`    | `can_trigger(walk)`                       |
//! | `walking?` | `current_state() == walking` (no event)   |
//!
//! Event names win over state names for `?` queries.

use crate::core::{Event, State};
use crate::engine::error::FsmError;
use crate::engine::machine::StateMachine;

/// A parsed command string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Bare name: trigger the event.
    Trigger(&'a str),
    /// Name ending in `!`: trigger the event or fail.
    Strict(&'a str),
    /// Name ending in `?`: query an event or a state.
    Query(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(command: &'a str) -> Self {
        if let Some(name) = command.strip_suffix('!') {
            Self::Strict(name)
        } else if let Some(name) = command.strip_suffix('?') {
            Self::Query(name)
        } else {
            Self::Trigger(command)
        }
    }
}

/// Outcome of [`dispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// An event was triggered; `false` means it was not triggerable.
    Triggered(bool),
    /// Answer to a `?` query.
    Query(bool),
}

/// Resolve `command` against `machine` and run it.
///
/// `payload` is handed to callbacks when the command triggers an event.
///
/// # Example
///
/// ```rust
/// use tinyfsm::engine::{dispatch, Dispatched, StateMachine};
/// use tinyfsm::{event_enum, state_enum};
///
/// state_enum! {
///     enum Pose { Standing = "standing", Walking = "walking" }
/// }
/// event_enum! {
///     enum Move { Walk = "walk" }
/// }
///
/// let mut machine: StateMachine<Pose, Move> = StateMachine::new(Pose::Standing);
/// machine.register_transition(Move::Walk, Pose::Standing, Pose::Walking);
///
/// assert_eq!(dispatch(&mut machine, "walk?", None).unwrap(), Dispatched::Query(true));
/// assert_eq!(dispatch(&mut machine, "walk", None).unwrap(), Dispatched::Triggered(true));
/// assert_eq!(dispatch(&mut machine, "walking?", None).unwrap(), Dispatched::Query(true));
/// assert!(dispatch(&mut machine, "walk!", None).is_err());
/// ```
pub fn dispatch<S, E, P>(
    machine: &mut StateMachine<S, E, P>,
    command: &str,
    payload: Option<&P>,
) -> Result<Dispatched, FsmError>
where
    S: State,
    E: Event,
    P: 'static,
{
    let unknown = || FsmError::UnknownCommand {
        command: command.to_string(),
    };

    match Command::parse(command) {
        Command::Trigger(name) => {
            let event = machine.find_event(name).cloned().ok_or_else(unknown)?;
            let fired = match payload {
                Some(payload) => machine.trigger_with(&event, payload)?,
                None => machine.trigger(&event)?,
            };
            Ok(Dispatched::Triggered(fired))
        }
        Command::Strict(name) => {
            let event = machine.find_event(name).cloned().ok_or_else(unknown)?;
            match payload {
                Some(payload) => machine.trigger_or_fail_with(&event, payload)?,
                None => machine.trigger_or_fail(&event)?,
            }
            Ok(Dispatched::Triggered(true))
        }
        Command::Query(name) => {
            if let Some(event) = machine.find_event(name) {
                return Ok(Dispatched::Query(machine.can_trigger(event)?));
            }
            machine
                .find_state(name)
                .map(|state| Dispatched::Query(machine.is_in(state)))
                .ok_or_else(unknown)
        }
    }
}
