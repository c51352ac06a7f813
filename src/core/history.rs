//! State transition history tracking.
//!
//! Every committed transition is recorded with the event that caused it
//! and the time it happened. Hosts use the record to answer "what state was
//! I in before?" and "how long have I been here?".

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use tinyfsm::core::StateTransition;
/// use tinyfsm::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Task { Pending, Running }
/// }
/// event_enum! {
///     enum Cmd { Start }
/// }
///
/// let transition = StateTransition {
///     event: Cmd::Start,
///     from: Task::Pending,
///     to: Task::Running,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, Task::Running);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The event that was triggered
    pub event: E,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded history of transitions.
///
/// With a limit, recording past the limit drops the oldest entry.
/// A limit of zero keeps nothing.
///
/// # Example
///
/// ```rust
/// use tinyfsm::core::{StateHistory, StateTransition};
/// use tinyfsm::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase { One, Two, Three }
/// }
/// event_enum! {
///     enum Step { Next }
/// }
///
/// let mut history = StateHistory::bounded(8);
/// history.record(StateTransition {
///     event: Step::Next,
///     from: Phase::One,
///     to: Phase::Two,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     event: Step::Next,
///     from: Phase::Two,
///     to: Phase::Three,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: VecDeque<StateTransition<S, E>>,
    limit: Option<usize>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    /// Create a history from an optional limit (`None` = unbounded).
    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Self::new(),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition, evicting the oldest records beyond the limit.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        if self.limit == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.back()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest retained record, then the `to`
    /// of every record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|transition| &transition.to));
        path
    }

    /// Elapsed time between the oldest and newest retained record.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S, E>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Advance,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "advance"
        }
    }

    fn step(from: TestState, to: TestState) -> StateTransition<TestState, TestEvent> {
        StateTransition {
            event: TestEvent::Advance,
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState, TestEvent> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_adds_transition() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().to, TestState::Processing);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));
        history.record(step(TestState::Processing, TestState::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = StateHistory::bounded(2);
        history.record(step(TestState::Initial, TestState::Processing));
        history.record(step(TestState::Processing, TestState::Complete));
        history.record(step(TestState::Complete, TestState::Initial));

        assert_eq!(history.len(), 2);
        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &TestState::Processing,
                &TestState::Complete,
                &TestState::Initial
            ]
        );
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = StateHistory::bounded(0);
        history.record(step(TestState::Initial, TestState::Processing));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(step(TestState::Processing, TestState::Complete));

        let duration = history.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn clear_empties_history_but_keeps_limit() {
        let mut history = StateHistory::bounded(4);
        history.record(step(TestState::Initial, TestState::Processing));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(4));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::bounded(5);
        history.record(step(TestState::Initial, TestState::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState, TestEvent> =
            serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(deserialized.limit(), Some(5));
        assert_eq!(history.last(), deserialized.last());
    }
}
