//! State machine facade that fires events end to end.

use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::core::{Event, State, StateHistory, StateTransition};
use crate::effects::pipeline::ExecutionPipeline;
use crate::effects::resolver::TransitionResolver;
use crate::effects::transition::{Destination, TransitionError};
use crate::hierarchy::{HierarchyError, StateMachineStructure};
use chrono::Utc;
use std::fmt;
use tracing::debug;

/// Hierarchical state machine.
///
/// Holds the configured structure, the current state, and the history of
/// committed transitions. The context is supplied to each [`fire`] call and
/// never retained.
///
/// [`fire`]: StateMachine::fire
pub struct StateMachine<S, E, C> {
    structure: StateMachineStructure<S, E, C>,
    initial: S,
    current: S,
    history: StateHistory<S>,
}

impl<S: State, E: Event, C> StateMachine<S, E, C> {
    /// Create a machine in `initial`. The initial state is registered in the
    /// structure if it was not referenced during setup.
    pub fn new(mut structure: StateMachineStructure<S, E, C>, initial: S) -> Self {
        structure.configuration_of(initial.clone());
        Self {
            structure,
            initial: initial.clone(),
            current: initial,
            history: StateHistory::new(),
        }
    }

    /// Restore a machine at the position captured by `checkpoint`.
    ///
    /// The structure is supplied by the caller; checkpoints never carry
    /// definitions.
    pub fn resume(
        structure: StateMachineStructure<S, E, C>,
        checkpoint: Checkpoint<S>,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        for state in [&checkpoint.initial_state, &checkpoint.current_state] {
            if !structure.is_known(state) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "state '{}' is not registered",
                    state.name()
                )));
            }
        }

        Ok(Self {
            structure,
            initial: checkpoint.initial_state,
            current: checkpoint.current_state,
            history: checkpoint.history,
        })
    }

    /// Get current state
    pub fn state(&self) -> &S {
        &self.current
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Check if machine is in a final state
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Check whether the current state is `state` or one of its descendants.
    pub fn is_in(&self, state: &S) -> Result<bool, HierarchyError> {
        Ok(self.structure.ancestors_of(&self.current)?.contains(state))
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn structure(&self) -> &StateMachineStructure<S, E, C> {
        &self.structure
    }

    /// Fire `event` against the current state.
    ///
    /// Returns `Ok(false)` when no state in the hierarchy handles the event;
    /// nothing runs and the state is unchanged. Returns `Ok(true)` once the
    /// chosen transition's actions completed and, unless it is internal,
    /// the new state was committed.
    ///
    /// If an action fails, the error is returned, states exited so far stay
    /// exited, and the current state is not changed.
    pub fn fire(&mut self, event: E, context: &mut C) -> Result<bool, TransitionError> {
        let resolver = TransitionResolver::new(&self.structure);
        let Some(resolution) = resolver.resolve(&self.current, &event, context)? else {
            debug!(
                state = self.current.name(),
                event = event.name(),
                "event not handled"
            );
            return Ok(false);
        };
        let transition = resolution.transition;
        let pipeline = ExecutionPipeline::new(&self.structure);

        let destination = transition
            .destination()
            .resolve(context)
            .map_err(|err| TransitionError::DestinationFailed {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
                source: err,
            })?;

        let Some(destination) = destination else {
            pipeline.execute_internal(&self.current, transition, &event, context)?;
            return Ok(true);
        };

        // Fixed destinations need no declaration; computed ones must name a
        // state the structure knows about.
        let computed = matches!(transition.destination(), Destination::Computed(_));
        if computed && !self.structure.is_known(&destination) {
            return Err(TransitionError::UnregisteredDestination {
                destination: destination.name().to_string(),
                event: event.name().to_string(),
            });
        }

        pipeline.execute(&self.current, transition, &destination, &event, context)?;

        debug!(
            from = self.current.name(),
            to = destination.name(),
            event = event.name(),
            handler = resolution.handler_state.name(),
            "transition committed"
        );
        self.history = self.history.record(StateTransition {
            from: self.current.clone(),
            to: destination.clone(),
            event: event.name().to_string(),
            timestamp: Utc::now(),
        });
        self.current = destination;
        Ok(true)
    }

    /// Capture the machine's runtime position.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint::new(
            self.initial.clone(),
            self.current.clone(),
            self.history.clone(),
        )
    }
}

impl<S: fmt::Debug, E, C> fmt::Debug for StateMachine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("initial", &self.initial)
            .field("transitions", &self.history.len())
            .finish()
    }
}
