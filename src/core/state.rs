//! Identifier traits for machine states and events.
//!
//! States and events are opaque, comparable identifiers. They live in
//! separate namespaces: a machine is generic over one `State` type and one
//! `Event` type, so an event can never be mistaken for a state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// A state has no attributes beyond its identity. The set of valid states
/// is implicit: whatever appears in the machine's transition table or
/// callback registry.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `Eq` + `Hash`: states key the transition maps and the callback registry
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: history records are serializable
///
/// # Example
///
/// ```rust
/// use tinyfsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "open",
///             Self::Closed => "closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "open");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display, logging and name-based dispatch.
    fn name(&self) -> &str;
}

/// Trait for events that request transitions.
///
/// Same requirements as [`State`]; the name is what `dispatch` matches
/// command strings against.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the event's name for display, logging and name-based dispatch.
    fn name(&self) -> &str;
}
