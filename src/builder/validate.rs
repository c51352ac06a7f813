//! Diagnostics for machine specs.
//!
//! Validation never blocks `build`: every spec is buildable. It reports
//! declarations that are legal but almost certainly mistakes, and it
//! reports all of them at once rather than stopping at the first.

use crate::builder::machine::MachineSpec;
use crate::core::{unique, Event, State};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A suspicious declaration found by [`MachineSpec::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecIssue {
    #[error("Event '{event}' has no transitions and can never fire")]
    EmptyEvent { event: String },

    #[error("Event '{event}' maps state '{state}' more than once; the last mapping wins")]
    DuplicateSource { event: String, state: String },

    #[error("Callback for state '{state}' can never run: no transition enters it")]
    UnreachableCallback { state: String },
}

impl<S: State, E: Event, P: 'static> MachineSpec<S, E, P> {
    /// Check the spec for suspicious declarations, accumulating ALL issues.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tinyfsm::builder::{MachineSpec, SpecIssue};
    /// use tinyfsm::{event_enum, state_enum};
    /// use stillwater::validation::Validation;
    ///
    /// state_enum! {
    ///     enum Pose { Standing, Walking }
    /// }
    /// event_enum! {
    ///     enum Move { Walk, Wave }
    /// }
    ///
    /// let spec: MachineSpec<Pose, Move> = MachineSpec::new(Pose::Standing)
    ///     .define_event(Move::Walk, |e| e.add_transition(Pose::Standing, Pose::Walking))
    ///     .define_event(Move::Wave, |e| e);
    ///
    /// match spec.validate() {
    ///     Validation::Failure(issues) => assert_eq!(issues.len(), 1),
    ///     Validation::Success(_) => panic!("Expected an empty-event issue"),
    /// }
    /// ```
    pub fn validate(&self) -> Validation<(), NonEmptyVec<SpecIssue>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<SpecIssue>>> = Vec::new();

        // Events may be declared more than once; judge the merged pairs
        let events = unique(self.events().iter().map(|spec| spec.event()));
        for event in &events {
            let pairs: Vec<_> = self
                .events()
                .iter()
                .filter(|spec| spec.event() == event)
                .flat_map(|spec| spec.transitions())
                .collect();

            if pairs.is_empty() {
                checks.push(Validation::fail(SpecIssue::EmptyEvent {
                    event: event.name().to_string(),
                }));
            }

            let mut seen = HashSet::new();
            let mut reported = HashSet::new();
            for (from, _) in pairs {
                if !seen.insert(from) && reported.insert(from) {
                    checks.push(Validation::fail(SpecIssue::DuplicateSource {
                        event: event.name().to_string(),
                        state: from.name().to_string(),
                    }));
                }
            }
        }

        let destinations: HashSet<&S> = self
            .events()
            .iter()
            .flat_map(|spec| spec.transitions())
            .map(|(_, to)| to)
            .collect();
        for (key, callback) in self.states() {
            let Some(state) = key.state() else { continue };
            // Starting in a state does not enter it
            if callback.is_some() && !destinations.contains(state) {
                checks.push(Validation::fail(SpecIssue::UnreachableCallback {
                    state: state.name().to_string(),
                }));
            }
        }

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }
}
