//! Enter-callbacks and the per-machine registry holding them.

use crate::core::{CallbackKey, Event, State};
use crate::engine::error::CallbackError;
use crate::engine::machine::StateMachine;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback run after a transition lands on the key it was registered under.
///
/// Receives the machine (already in the new state), the event that was
/// triggered, and the payload passed to the trigger, if any. The machine
/// handle may be used to trigger again; that nested trigger completes
/// before the remaining callbacks of the outer one run.
pub type Callback<S, E, P> = Arc<
    dyn Fn(&mut StateMachine<S, E, P>, &E, Option<&P>) -> Result<(), CallbackError> + Send + Sync,
>;

/// Ordered callbacks per key. Registrations accumulate and never replace.
pub struct CallbackRegistry<S: State, E: Event, P> {
    callbacks: HashMap<CallbackKey<S>, Vec<Callback<S, E, P>>>,
    keys: Vec<CallbackKey<S>>,
}

impl<S: State, E: Event, P> Default for CallbackRegistry<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, P> CallbackRegistry<S, E, P> {
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            keys: Vec::new(),
        }
    }

    /// Append `callback` to the list for `key`.
    pub fn register(&mut self, key: CallbackKey<S>, callback: Callback<S, E, P>) {
        if let Some(list) = self.callbacks.get_mut(&key) {
            list.push(callback);
            return;
        }
        self.keys.push(key.clone());
        self.callbacks.insert(key, vec![callback]);
    }

    /// Callbacks to run on entering `state`: those under `state` in
    /// registration order, then those under `Any`.
    ///
    /// Returns cloned handles so the caller can run them while the
    /// registry itself is borrowed mutably.
    pub fn matching(&self, state: &S) -> Vec<Callback<S, E, P>> {
        let by_state = self.callbacks.get(&CallbackKey::State(state.clone()));
        let any = self.callbacks.get(&CallbackKey::Any);
        by_state
            .into_iter()
            .chain(any)
            .flatten()
            .map(Arc::clone)
            .collect()
    }

    /// Number of callbacks registered under `key`.
    pub fn count(&self, key: &CallbackKey<S>) -> usize {
        self.callbacks.get(key).map_or(0, Vec::len)
    }

    /// Keys with at least one callback, in first-registration order.
    pub fn keys(&self) -> &[CallbackKey<S>] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: State, E: Event, P> Clone for CallbackRegistry<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<S: State, E: Event, P> fmt::Debug for CallbackRegistry<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys.iter().map(|key| (key, self.count(key))))
            .finish()
    }
}
