//! Hierarchical transition lookup.

use crate::core::{Event, State};
use crate::effects::transition::Transition;
use crate::hierarchy::{HierarchyError, StateMachineStructure};
use tracing::trace;

/// A transition chosen for an event, with the state that declared it.
#[derive(Debug)]
pub struct Resolution<'a, S, E, C> {
    /// The state (current or an ancestor) whose handler matched.
    pub handler_state: S,
    pub transition: &'a Transition<S, E, C>,
}

/// Picks at most one transition for `(current state, event, context)`.
///
/// The most specific state wins: handlers of the current state are tried
/// before those of its parent, and so on up to the root. Within one state,
/// candidates are tried in registration order and the first whose guard
/// passes is chosen.
pub struct TransitionResolver<'a, S, E, C> {
    structure: &'a StateMachineStructure<S, E, C>,
}

impl<'a, S: State, E: Event, C> TransitionResolver<'a, S, E, C> {
    pub fn new(structure: &'a StateMachineStructure<S, E, C>) -> Self {
        Self { structure }
    }

    /// Resolve the transition for `event`, or `None` when no state in the
    /// ancestor chain has an eligible handler.
    pub fn resolve(
        &self,
        current: &S,
        event: &E,
        context: &C,
    ) -> Result<Option<Resolution<'a, S, E, C>>, HierarchyError> {
        for state in self.structure.ancestors_of(current)? {
            let Some(config) = self.structure.get(&state) else {
                continue;
            };

            let candidates = config.handlers_for(event);
            if let Some(transition) = candidates.iter().find(|t| t.is_eligible(context)) {
                trace!(
                    state = state.name(),
                    event = event.name(),
                    "handler matched"
                );
                return Ok(Some(Resolution {
                    handler_state: state,
                    transition,
                }));
            }

            if !candidates.is_empty() {
                trace!(
                    state = state.name(),
                    event = event.name(),
                    candidates = candidates.len(),
                    "all guards rejected, deferring to parent"
                );
            }
        }

        Ok(None)
    }
}
