//! Transition tables: per-event maps from source state to destination.
//!
//! Both containers remember first-registration order so that listings are
//! deterministic. Re-registering a known key overwrites the value in place.

use super::state::{Event, State};
use std::collections::{HashMap, HashSet};

/// Mapping from source state to destination state for one event.
///
/// At most one destination per source: inserting an existing source
/// replaces its destination (last write wins).
#[derive(Clone, Debug)]
pub struct TransitionMap<S: State> {
    targets: HashMap<S, S>,
    sources: Vec<S>,
}

impl<S: State> Default for TransitionMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionMap<S> {
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
            sources: Vec::new(),
        }
    }

    /// Insert `from -> to`, returning the destination it replaced, if any.
    pub fn insert(&mut self, from: S, to: S) -> Option<S> {
        if !self.targets.contains_key(&from) {
            self.sources.push(from.clone());
        }
        self.targets.insert(from, to)
    }

    /// Destination reached from `from`, if this event is legal there.
    pub fn get(&self, from: &S) -> Option<&S> {
        self.targets.get(from)
    }

    pub fn contains_source(&self, from: &S) -> bool {
        self.targets.contains_key(from)
    }

    /// Iterate `(from, to)` pairs in source registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &S)> {
        self.sources
            .iter()
            .filter_map(move |from| self.targets.get(from).map(|to| (from, to)))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Mapping from event to its [`TransitionMap`].
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, E: Event> {
    maps: HashMap<E, TransitionMap<S>>,
    events: Vec<E>,
}

impl<S: State, E: Event> Default for TransitionTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new() -> Self {
        Self {
            maps: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Insert `from -> to` under `event`, creating the event's map if absent.
    ///
    /// Returns the destination previously mapped from `from`, if any.
    pub fn insert(&mut self, event: E, from: S, to: S) -> Option<S> {
        if let Some(map) = self.maps.get_mut(&event) {
            return map.insert(from, to);
        }
        let mut map = TransitionMap::new();
        map.insert(from, to);
        self.events.push(event.clone());
        self.maps.insert(event, map);
        None
    }

    pub fn get(&self, event: &E) -> Option<&TransitionMap<S>> {
        self.maps.get(event)
    }

    pub fn contains_event(&self, event: &E) -> bool {
        self.maps.contains_key(event)
    }

    /// Registered events in registration order.
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Iterate events with their maps in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &TransitionMap<S>)> {
        self.events
            .iter()
            .filter_map(move |event| self.maps.get(event).map(|map| (event, map)))
    }

    /// Every destination state, without duplicates, in first-seen order.
    pub fn destinations(&self) -> Vec<S> {
        unique(self.iter().flat_map(|(_, map)| map.iter().map(|(_, to)| to)))
    }

    /// Every source state, without duplicates, in first-seen order.
    pub fn sources(&self) -> Vec<S> {
        unique(self.iter().flat_map(|(_, map)| map.iter().map(|(from, _)| from)))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Collect cloned items, dropping repeats while keeping first-seen order.
pub(crate) fn unique<'a, T, I>(items: I) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}
