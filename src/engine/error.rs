//! Errors raised while querying or driving a machine.

use crate::core::{Event, State};
use thiserror::Error;

/// Error type callbacks return. Whatever a callback fails with is handed
/// back to the trigger caller untouched inside [`FsmError::Callback`].
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when triggering events.
#[derive(Debug, Error)]
pub enum FsmError {
    /// The event was never registered with the machine.
    #[error("Unknown event '{event}'")]
    UnknownEvent { event: String },

    /// The event is known but has no mapping from the current state.
    /// Only the strict trigger path reports this.
    #[error("Event '{event}' not valid from state '{state}'")]
    IllegalTransition { event: String, state: String },

    /// A dispatch command named neither an event nor a state.
    #[error("Unknown command '{command}'")]
    UnknownCommand { command: String },

    /// A callback failed. The transition that ran it is already committed.
    #[error(transparent)]
    Callback(CallbackError),
}

impl FsmError {
    pub(crate) fn unknown_event<E: Event>(event: &E) -> Self {
        Self::UnknownEvent {
            event: event.name().to_string(),
        }
    }

    pub(crate) fn illegal_transition<E: Event, S: State>(event: &E, state: &S) -> Self {
        Self::IllegalTransition {
            event: event.name().to_string(),
            state: state.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::fmt;

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn illegal_transition_names_event_and_state() {
        let err = FsmError::IllegalTransition {
            event: "jump".to_string(),
            state: "walking".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Event 'jump' not valid from state 'walking'"
        );
    }

    #[test]
    fn callback_error_is_transparent() {
        let err = FsmError::Callback(Box::new(Boom));

        assert_eq!(err.to_string(), "boom");
        match err {
            FsmError::Callback(inner) => assert!(inner.downcast_ref::<Boom>().is_some()),
            other => panic!("Expected callback error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_event_has_no_source() {
        let err = FsmError::UnknownEvent {
            event: "fly".to_string(),
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Unknown event 'fly'");
    }
}
