//! Runtime engine: one machine's live state and its transition logic.

use crate::core::{
    unique, CallbackKey, Event, State, StateHistory, StateTransition, TransitionTable,
};
use crate::engine::callback::{Callback, CallbackRegistry};
use crate::engine::config::MachineConfig;
use crate::engine::error::{CallbackError, FsmError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Identity of one machine instance, used to correlate log records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A finite-state machine driven by events.
///
/// Holds the current state, the transition table, the enter-callback
/// registry and a bounded history of committed transitions. A machine is
/// driven by a single owner; there is no internal locking.
///
/// `P` is the payload type handed to callbacks alongside the event.
///
/// # Example
///
/// ```rust
/// use tinyfsm::engine::StateMachine;
/// use tinyfsm::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door { Open, Closed }
/// }
/// event_enum! {
///     enum Push { Close, Open }
/// }
///
/// let mut door: StateMachine<Door, Push> = StateMachine::new(Door::Open);
/// door.register_transition(Push::Close, Door::Open, Door::Closed);
/// door.register_transition(Push::Open, Door::Closed, Door::Open);
///
/// assert!(door.trigger(&Push::Close).unwrap());
/// assert_eq!(door.current_state(), &Door::Closed);
/// assert!(!door.trigger(&Push::Close).unwrap());
/// ```
pub struct StateMachine<S: State, E: Event, P = ()> {
    id: MachineId,
    initial: S,
    current: S,
    previous: Option<S>,
    table: TransitionTable<S, E>,
    callbacks: CallbackRegistry<S, E, P>,
    history: StateHistory<S, E>,
    config: MachineConfig,
}

impl<S: State, E: Event, P: 'static> StateMachine<S, E, P> {
    /// Create a machine in `initial` with no transitions and no callbacks.
    ///
    /// `initial` is not validated; it need not appear in any transition.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, MachineConfig::default())
    }

    /// Create a machine with explicit runtime options.
    pub fn with_config(initial: S, config: MachineConfig) -> Self {
        Self {
            id: MachineId::new(),
            current: initial.clone(),
            initial,
            previous: None,
            table: TransitionTable::new(),
            callbacks: CallbackRegistry::new(),
            history: StateHistory::with_limit(config.history_limit),
            config,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The state the machine is in right now.
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// The state the machine left on its latest transition.
    pub fn previous_state(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    /// The state the machine was created in.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn is_in(&self, state: &S) -> bool {
        self.current == *state
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    pub fn table(&self) -> &TransitionTable<S, E> {
        &self.table
    }

    pub fn callbacks(&self) -> &CallbackRegistry<S, E, P> {
        &self.callbacks
    }

    /// Map `from -> to` under `event`.
    ///
    /// A repeated `(event, from)` pair replaces the earlier destination.
    pub fn register_transition(&mut self, event: E, from: S, to: S) {
        let name = event.name().to_string();
        if let Some(replaced) = self.table.insert(event, from.clone(), to.clone()) {
            trace!(
                machine = %self.id,
                event = %name,
                from = from.name(),
                replaced = replaced.name(),
                to = to.name(),
                "transition overwritten"
            );
        }
    }

    /// Append a callback run whenever a transition lands on `key`.
    ///
    /// `key` is a state or [`CallbackKey::Any`]. Callbacks under a key run
    /// in registration order.
    pub fn on_enter<F>(&mut self, key: impl Into<CallbackKey<S>>, callback: F)
    where
        F: Fn(&mut Self, &E, Option<&P>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.register(key.into(), Arc::new(callback));
    }

    /// Append a callback to the wildcard key.
    pub fn on_any<F>(&mut self, callback: F)
    where
        F: Fn(&mut Self, &E, Option<&P>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.on_enter(CallbackKey::Any, callback);
    }

    /// Append an already shared callback handle under `key`.
    pub fn on_enter_shared(&mut self, key: CallbackKey<S>, callback: Callback<S, E, P>) {
        self.callbacks.register(key, callback);
    }

    /// Whether `event` can fire from the current state.
    ///
    /// Fails with [`FsmError::UnknownEvent`] if `event` was never registered.
    pub fn can_trigger(&self, event: &E) -> Result<bool, FsmError> {
        Ok(self.destination(event)?.is_some())
    }

    /// Fire `event` without a payload.
    ///
    /// Returns `Ok(false)` with no side effect when the event has no
    /// mapping from the current state.
    pub fn trigger(&mut self, event: &E) -> Result<bool, FsmError> {
        self.fire(event, None)
    }

    /// Fire `event`, handing `payload` to every callback.
    pub fn trigger_with(&mut self, event: &E, payload: &P) -> Result<bool, FsmError> {
        self.fire(event, Some(payload))
    }

    /// Fire `event`, failing with [`FsmError::IllegalTransition`] when it has
    /// no mapping from the current state.
    pub fn trigger_or_fail(&mut self, event: &E) -> Result<(), FsmError> {
        self.fire_or_fail(event, None)
    }

    /// Strict variant of [`trigger_with`](Self::trigger_with).
    pub fn trigger_or_fail_with(&mut self, event: &E, payload: &P) -> Result<(), FsmError> {
        self.fire_or_fail(event, Some(payload))
    }

    /// Every registered event, in registration order.
    pub fn list_events(&self) -> Vec<E> {
        self.table.events().to_vec()
    }

    /// Registered events that can fire from the current state.
    pub fn list_triggerable_events(&self) -> Vec<E> {
        self.table
            .iter()
            .filter(|(_, map)| map.contains_source(&self.current))
            .map(|(event, _)| event.clone())
            .collect()
    }

    /// Every state that is the destination of some transition.
    ///
    /// States that only ever appear as a source, or only carry callbacks,
    /// are not listed; see [`all_states`](Self::all_states).
    pub fn list_states(&self) -> Vec<S> {
        self.table.destinations()
    }

    /// Every state the machine knows about: the initial state, all sources
    /// and destinations, and every state with a callback.
    pub fn all_states(&self) -> Vec<S> {
        unique(self.known_states())
    }

    /// Look up a registered event by name.
    pub fn find_event(&self, name: &str) -> Option<&E> {
        self.table.events().iter().find(|event| event.name() == name)
    }

    /// Look up a known state by name.
    pub fn find_state(&self, name: &str) -> Option<&S> {
        self.known_states().find(|state| state.name() == name)
    }

    fn known_states(&self) -> impl Iterator<Item = &S> {
        let transitions = self
            .table
            .iter()
            .flat_map(|(_, map)| map.iter().flat_map(|(from, to)| [from, to]));
        let keyed = self.callbacks.keys().iter().filter_map(CallbackKey::state);
        std::iter::once(&self.initial)
            .chain(transitions)
            .chain(keyed)
    }

    fn destination(&self, event: &E) -> Result<Option<&S>, FsmError> {
        let map = self
            .table
            .get(event)
            .ok_or_else(|| FsmError::unknown_event(event))?;
        Ok(map.get(&self.current))
    }

    fn fire_or_fail(&mut self, event: &E, payload: Option<&P>) -> Result<(), FsmError> {
        if self.fire(event, payload)? {
            Ok(())
        } else {
            Err(FsmError::illegal_transition(event, &self.current))
        }
    }

    /// Commit the transition, record it, then run the matching callbacks.
    ///
    /// The state change stays committed if a callback fails.
    fn fire(&mut self, event: &E, payload: Option<&P>) -> Result<bool, FsmError> {
        let Some(to) = self.destination(event)?.cloned() else {
            trace!(
                machine = %self.id,
                event = event.name(),
                state = self.current.name(),
                "event not triggerable from current state"
            );
            return Ok(false);
        };

        let from = std::mem::replace(&mut self.current, to.clone());
        if self.config.trace_transitions {
            debug!(
                machine = %self.id,
                event = event.name(),
                from = from.name(),
                to = to.name(),
                "transition committed"
            );
        }
        self.history.record(StateTransition {
            event: event.clone(),
            from: from.clone(),
            to: to.clone(),
            timestamp: Utc::now(),
        });
        self.previous = Some(from);

        for callback in self.callbacks.matching(&to) {
            callback(&mut *self, event, payload).map_err(|source| {
                warn!(
                    machine = %self.id,
                    event = event.name(),
                    state = to.name(),
                    error = %source,
                    "enter callback failed"
                );
                FsmError::Callback(source)
            })?;
        }
        Ok(true)
    }
}

impl<S: State, E: Event, P> fmt::Debug for StateMachine<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("table", &self.table)
            .field("callbacks", &self.callbacks)
            .field("history", &self.history.len())
            .finish()
    }
}
