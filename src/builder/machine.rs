//! Declarative description of a machine type.

use crate::builder::event::EventSpec;
use crate::builder::keys::StateKeys;
use crate::core::{CallbackKey, Event, State};
use crate::engine::{Callback, CallbackError, MachineConfig, StateMachine};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The shape of a machine: initial state, enter-callbacks and events.
///
/// Declare one spec per machine type, then materialize it onto as many
/// fresh machines as needed. Applying never mutates the spec, and every
/// machine gets its own callback registry and transition table.
///
/// # Example
///
/// ```rust
/// use tinyfsm::builder::MachineSpec;
/// use tinyfsm::{event_enum, state_enum};
///
/// state_enum! {
///     enum Pose { Standing, Walking, Running }
/// }
/// event_enum! {
///     enum Move { Walk, Run }
/// }
///
/// let spec: MachineSpec<Pose, Move> = MachineSpec::new(Pose::Standing)
///     .define_event(Move::Walk, |e| {
///         e.add_transition([Pose::Standing, Pose::Running], Pose::Walking)
///     })
///     .define_event(Move::Run, |e| {
///         e.add_transition(Pose::Standing, Pose::Running)
///             .add_transition(Pose::Walking, Pose::Running)
///     });
///
/// let mut first = spec.build();
/// let second = spec.build();
///
/// first.trigger(&Move::Run).unwrap();
/// assert_eq!(first.current_state(), &Pose::Running);
/// assert_eq!(second.current_state(), &Pose::Standing);
/// ```
pub struct MachineSpec<S: State, E: Event, P = ()> {
    initial: S,
    states: Vec<(CallbackKey<S>, Option<Callback<S, E, P>>)>,
    events: Vec<EventSpec<S, E>>,
    config: MachineConfig,
}

impl<S: State, E: Event, P: 'static> MachineSpec<S, E, P> {
    /// Start a spec whose machines begin in `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            states: Vec::new(),
            events: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Runtime options for every machine built from this spec.
    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Bind `callback` to each of `keys`.
    ///
    /// Each key holds one callback in the spec; defining a key again
    /// replaces its callback but keeps its original position.
    pub fn define_state<F>(mut self, keys: impl Into<StateKeys<S>>, callback: F) -> Self
    where
        F: Fn(&mut StateMachine<S, E, P>, &E, Option<&P>) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    {
        let callback: Callback<S, E, P> = Arc::new(callback);
        for key in keys.into().into_vec() {
            self.bind(key, Some(Arc::clone(&callback)));
        }
        self
    }

    /// Bind `callback` to the wildcard key.
    pub fn on_any<F>(self, callback: F) -> Self
    where
        F: Fn(&mut StateMachine<S, E, P>, &E, Option<&P>) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.define_state(CallbackKey::Any, callback)
    }

    /// Declare states without callbacks.
    ///
    /// Declared states show up in `validate` and nowhere else. Declaring is
    /// additive: a key that already has a callback keeps it. Use
    /// [`define_state`](Self::define_state) to replace a callback.
    pub fn declare_state(mut self, keys: impl Into<StateKeys<S>>) -> Self {
        for key in keys.into().into_vec() {
            if !self.states.iter().any(|(bound, _)| *bound == key) {
                self.states.push((key, None));
            }
        }
        self
    }

    /// Describe one event's transitions through an [`EventSpec`].
    pub fn define_event<F>(self, event: E, block: F) -> Self
    where
        F: FnOnce(EventSpec<S, E>) -> EventSpec<S, E>,
    {
        self.add_event(block(EventSpec::new(event)))
    }

    /// Add a prebuilt [`EventSpec`].
    pub fn add_event(mut self, spec: EventSpec<S, E>) -> Self {
        self.events.push(spec);
        self
    }

    /// Keys with their callbacks, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = (&CallbackKey<S>, Option<&Callback<S, E, P>>)> {
        self.states.iter().map(|(key, callback)| (key, callback.as_ref()))
    }

    pub fn events(&self) -> &[EventSpec<S, E>] {
        &self.events
    }

    /// Register every binding and transition of this spec on `machine`.
    ///
    /// Callbacks go in first, then transitions event by event. The same
    /// spec may be applied to any number of machines.
    pub fn apply_to(&self, mut machine: StateMachine<S, E, P>) -> StateMachine<S, E, P> {
        for (key, callback) in &self.states {
            if let Some(callback) = callback {
                machine.on_enter_shared(key.clone(), Arc::clone(callback));
            }
        }
        for spec in &self.events {
            for (from, to) in spec.transitions() {
                machine.register_transition(spec.event().clone(), from.clone(), to.clone());
            }
        }
        debug!(
            machine = %machine.id(),
            states = self.states.len(),
            events = self.events.len(),
            "machine spec applied"
        );
        machine
    }

    /// A fresh machine in the initial state with this spec applied.
    pub fn build(&self) -> StateMachine<S, E, P> {
        self.apply_to(StateMachine::with_config(
            self.initial.clone(),
            self.config.clone(),
        ))
    }

    fn bind(&mut self, key: CallbackKey<S>, callback: Option<Callback<S, E, P>>) {
        match self.states.iter_mut().find(|(bound, _)| *bound == key) {
            Some((_, slot)) => *slot = callback,
            None => self.states.push((key, callback)),
        }
    }
}

impl<S: State, E: Event, P> Clone for MachineSpec<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            states: self.states.clone(),
            events: self.events.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: State, E: Event, P> fmt::Debug for MachineSpec<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.states.iter().map(|(key, _)| key).collect();
        f.debug_struct("MachineSpec")
            .field("initial", &self.initial)
            .field("states", &keys)
            .field("events", &self.events)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FsmError;
    use serde::{Deserialize, Serialize};
    use std::sync::Mutex;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Pose {
        Standing,
        Walking,
        Running,
        Jumping,
    }

    impl State for Pose {
        fn name(&self) -> &str {
            match self {
                Self::Standing => "standing",
                Self::Walking => "walking",
                Self::Running => "running",
                Self::Jumping => "jumping",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Move {
        Walk,
        Run,
        Jump,
    }

    impl Event for Move {
        fn name(&self) -> &str {
            match self {
                Self::Walk => "walk",
                Self::Run => "run",
                Self::Jump => "jump",
            }
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn spec(log: &Log) -> MachineSpec<Pose, Move> {
        let on_stand = Arc::clone(log);
        let on_move = Arc::clone(log);
        let on_any = Arc::clone(log);
        MachineSpec::new(Pose::Standing)
            .define_state(Pose::Standing, move |_, event: &Move, _| {
                on_stand.lock().unwrap().push(format!("stand:{}", event.name()));
                Ok(())
            })
            .define_state([Pose::Walking, Pose::Running], move |m, _, _| {
                on_move
                    .lock()
                    .unwrap()
                    .push(format!("move:{}", m.current_state().name()));
                Ok(())
            })
            .on_any(move |_, event, _| {
                on_any.lock().unwrap().push(format!("any:{}", event.name()));
                Ok(())
            })
            .declare_state(Pose::Jumping)
            .define_event(Move::Walk, |e| {
                e.add_transition([Pose::Standing, Pose::Running], Pose::Walking)
            })
            .define_event(Move::Run, |e| {
                e.add_transition(Pose::Standing, Pose::Running)
                    .add_transition(Pose::Walking, Pose::Running)
            })
            .define_event(Move::Jump, |e| e.add_transition(Pose::Standing, Pose::Jumping))
    }

    #[test]
    fn apply_to_registers_transitions_and_callbacks() {
        let log: Log = Arc::default();
        let mut machine = spec(&log).build();

        assert_eq!(machine.list_events(), vec![Move::Walk, Move::Run, Move::Jump]);
        machine.trigger(&Move::Run).unwrap();
        machine.trigger(&Move::Walk).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["move:running", "any:run", "move:walking", "any:walk"]
        );
    }

    #[test]
    fn declared_state_without_callback_registers_nothing() {
        let log: Log = Arc::default();
        let mut machine = spec(&log).build();

        machine.trigger(&Move::Jump).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["any:jump"]);
        assert_eq!(machine.callbacks().count(&CallbackKey::State(Pose::Jumping)), 0);
    }

    #[test]
    fn declaring_a_bound_state_keeps_its_callback() {
        let log: Log = Arc::default();
        let mut machine = spec(&log).declare_state(Pose::Walking).build();

        machine.trigger(&Move::Walk).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["move:walking", "any:walk"]);
        assert_eq!(machine.callbacks().count(&CallbackKey::State(Pose::Walking)), 1);
    }

    #[test]
    fn each_build_gets_an_independent_machine() {
        let log: Log = Arc::default();
        let spec = spec(&log);

        let mut first = spec.build();
        let second = spec.build();
        first.trigger(&Move::Run).unwrap();
        first.on_any(|_, _, _| Ok(()));

        assert_eq!(first.current_state(), &Pose::Running);
        assert_eq!(second.current_state(), &Pose::Standing);
        assert_eq!(first.callbacks().count(&CallbackKey::Any), 2);
        assert_eq!(second.callbacks().count(&CallbackKey::Any), 1);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn apply_to_does_not_change_the_spec() {
        let log: Log = Arc::default();
        let spec = spec(&log);
        let before = format!("{spec:?}");

        let _ = spec.apply_to(StateMachine::new(Pose::Walking));
        let _ = spec.apply_to(StateMachine::new(Pose::Running));

        assert_eq!(format!("{spec:?}"), before);
    }

    #[test]
    fn apply_to_keeps_the_machines_own_initial_state() {
        let log: Log = Arc::default();
        let mut machine = spec(&log).apply_to(StateMachine::new(Pose::Walking));

        assert_eq!(machine.current_state(), &Pose::Walking);
        assert!(machine.trigger(&Move::Run).unwrap());
    }

    #[test]
    fn redefining_a_state_replaces_its_callback() {
        let log: Log = Arc::default();
        let first = Arc::clone(&log);
        let second = Arc::clone(&log);
        let mut machine: StateMachine<Pose, Move> = MachineSpec::new(Pose::Standing)
            .define_state(Pose::Walking, move |_, _, _| {
                first.lock().unwrap().push("first".to_string());
                Ok(())
            })
            .define_state(Pose::Walking, move |_, _, _| {
                second.lock().unwrap().push("second".to_string());
                Ok(())
            })
            .define_event(Move::Walk, |e| e.add_transition(Pose::Standing, Pose::Walking))
            .build();

        machine.trigger(&Move::Walk).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn duplicate_source_last_write_wins() {
        let mut machine: StateMachine<Pose, Move> = MachineSpec::new(Pose::Standing)
            .define_event(Move::Walk, |e| {
                e.add_transition(Pose::Standing, Pose::Walking)
                    .add_transition(Pose::Standing, Pose::Running)
            })
            .build();

        machine.trigger(&Move::Walk).unwrap();
        assert_eq!(machine.current_state(), &Pose::Running);
    }

    #[test]
    fn built_machines_use_the_spec_config() {
        let spec: MachineSpec<Pose, Move> = MachineSpec::new(Pose::Standing)
            .with_config(MachineConfig::default().history_limit(Some(0)))
            .define_event(Move::Jump, |e| e.add_transition(Pose::Standing, Pose::Jumping));

        let mut machine = spec.build();
        machine.trigger(&Move::Jump).unwrap();

        assert!(machine.history().is_empty());
        assert_eq!(machine.previous_state(), Some(&Pose::Standing));
        assert!(matches!(
            machine.trigger_or_fail(&Move::Jump),
            Err(FsmError::IllegalTransition { .. })
        ));
    }
}
