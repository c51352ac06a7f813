//! Callback registry keys.

use super::state::State;
use std::fmt;

/// Key under which enter-callbacks are registered.
///
/// `Any` is the wildcard: callbacks under it run on every successful
/// transition, after the callbacks of the destination state. It is a
/// separate variant so no user state can ever collide with it.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum CallbackKey<S: State> {
    State(S),
    Any,
}

impl<S: State> CallbackKey<S> {
    /// The wrapped state, or `None` for the wildcard.
    pub fn state(&self) -> Option<&S> {
        match self {
            Self::State(state) => Some(state),
            Self::Any => None,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl<S: State> From<S> for CallbackKey<S> {
    fn from(state: S) -> Self {
        Self::State(state)
    }
}

impl<S: State> fmt::Display for CallbackKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(state) => f.write_str(state.name()),
            Self::Any => f.write_str("any"),
        }
    }
}
