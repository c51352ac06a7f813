//! Builder for one event's transitions.

use crate::builder::keys::Sources;
use crate::core::{Event, State};

/// Accumulates `(from, to)` pairs for one event.
///
/// A source listed twice keeps both pairs here; when the spec is applied
/// the later pair wins.
#[derive(Clone, Debug)]
pub struct EventSpec<S: State, E: Event> {
    event: E,
    transitions: Vec<(S, S)>,
}

impl<S: State, E: Event> EventSpec<S, E> {
    pub fn new(event: E) -> Self {
        Self {
            event,
            transitions: Vec::new(),
        }
    }

    /// Add a transition from each of `from` to `to`.
    pub fn add_transition(mut self, from: impl Into<Sources<S>>, to: S) -> Self {
        self.transitions
            .extend(from.into().into_iter().map(|from| (from, to.clone())));
        self
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    /// Accumulated pairs in declaration order.
    pub fn transitions(&self) -> &[(S, S)] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
