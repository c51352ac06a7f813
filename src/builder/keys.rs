//! Argument types accepting one state or a list of states.

use crate::core::{CallbackKey, State};

/// Source states of a transition: one state or several.
///
/// ```rust
/// use tinyfsm::builder::Sources;
/// use tinyfsm::state_enum;
///
/// state_enum! {
///     enum Pose { Standing, Running }
/// }
///
/// let one: Sources<Pose> = Pose::Standing.into();
/// let many: Sources<Pose> = [Pose::Standing, Pose::Running].into();
/// assert_eq!(one.len(), 1);
/// assert_eq!(many.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sources<S: State>(Vec<S>);

impl<S: State> Sources<S> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<S> {
        self.0
    }
}

impl<S: State> From<S> for Sources<S> {
    fn from(state: S) -> Self {
        Self(vec![state])
    }
}

impl<S: State, const N: usize> From<[S; N]> for Sources<S> {
    fn from(states: [S; N]) -> Self {
        Self(states.into())
    }
}

impl<S: State> From<Vec<S>> for Sources<S> {
    fn from(states: Vec<S>) -> Self {
        Self(states)
    }
}

impl<S: State> IntoIterator for Sources<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Callback keys for a state definition: one state, several states, or
/// the wildcard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateKeys<S: State>(Vec<CallbackKey<S>>);

impl<S: State> StateKeys<S> {
    pub fn into_vec(self) -> Vec<CallbackKey<S>> {
        self.0
    }
}

impl<S: State> From<S> for StateKeys<S> {
    fn from(state: S) -> Self {
        Self(vec![CallbackKey::State(state)])
    }
}

impl<S: State> From<CallbackKey<S>> for StateKeys<S> {
    fn from(key: CallbackKey<S>) -> Self {
        Self(vec![key])
    }
}

impl<S: State, const N: usize> From<[S; N]> for StateKeys<S> {
    fn from(states: [S; N]) -> Self {
        Self(states.into_iter().map(CallbackKey::State).collect())
    }
}

impl<S: State> From<Vec<S>> for StateKeys<S> {
    fn from(states: Vec<S>) -> Self {
        Self(states.into_iter().map(CallbackKey::State).collect())
    }
}

impl<S: State> From<Vec<CallbackKey<S>>> for StateKeys<S> {
    fn from(keys: Vec<CallbackKey<S>>) -> Self {
        Self(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Pose {
        Walking,
        Running,
    }

    impl State for Pose {
        fn name(&self) -> &str {
            match self {
                Self::Walking => "walking",
                Self::Running => "running",
            }
        }
    }

    #[test]
    fn sources_preserve_order() {
        let sources: Sources<Pose> = vec![Pose::Running, Pose::Walking].into();
        assert_eq!(sources.into_vec(), vec![Pose::Running, Pose::Walking]);
    }

    #[test]
    fn state_keys_wrap_states() {
        let keys: StateKeys<Pose> = [Pose::Walking, Pose::Running].into();
        assert_eq!(
            keys.into_vec(),
            vec![
                CallbackKey::State(Pose::Walking),
                CallbackKey::State(Pose::Running)
            ]
        );
    }

    #[test]
    fn state_keys_accept_wildcard() {
        let keys: StateKeys<Pose> = CallbackKey::Any.into();
        assert_eq!(keys.into_vec(), vec![CallbackKey::Any]);

        let mixed: StateKeys<Pose> = vec![CallbackKey::Any, Pose::Walking.into()].into();
        assert_eq!(mixed.into_vec().len(), 2);
    }
}
