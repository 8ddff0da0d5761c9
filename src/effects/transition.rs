//! Transition descriptions and dispatch errors.

use crate::core::Guard;
use crate::effects::action::{Action, ActionError};
use crate::hierarchy::HierarchyError;
use std::fmt;
use std::sync::Arc;

/// Pipeline slot an action runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionPhase {
    Exit,
    Transition,
    Entry,
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("exit"),
            Self::Transition => f.write_str("transition"),
            Self::Entry => f.write_str("entry"),
        }
    }
}

/// Errors that can occur while firing an event.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("{phase} action failed in state '{state}': {source}")]
    ActionFailed {
        phase: ActionPhase,
        state: String,
        #[source]
        source: ActionError,
    },

    #[error("Destination for event '{event}' in state '{state}' could not be computed: {source}")]
    DestinationFailed {
        state: String,
        event: String,
        #[source]
        source: ActionError,
    },

    #[error("Destination '{destination}' for event '{event}' is not a registered state")]
    UnregisteredDestination { destination: String, event: String },
}

/// Function computing a destination from the context at dispatch time.
pub type DestinationFn<S, C> = dyn Fn(&C) -> Result<S, ActionError> + Send + Sync;

/// Where a transition leads.
pub enum Destination<S, C> {
    /// No state change: only the transition action runs.
    Internal,
    /// A fixed target state.
    Fixed(S),
    /// A target computed from the context on every dispatch.
    Computed(Arc<DestinationFn<S, C>>),
}

impl<S, C> Destination<S, C> {
    pub fn computed<F>(supplier: F) -> Self
    where
        F: Fn(&C) -> Result<S, ActionError> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(supplier))
    }
}

impl<S: Clone, C> Destination<S, C> {
    /// Resolve the target state; `None` for internal transitions.
    pub fn resolve(&self, context: &C) -> Result<Option<S>, ActionError> {
        match self {
            Self::Internal => Ok(None),
            Self::Fixed(state) => Ok(Some(state.clone())),
            Self::Computed(supplier) => supplier(context).map(Some),
        }
    }
}

impl<S: Clone, C> Clone for Destination<S, C> {
    fn clone(&self) -> Self {
        match self {
            Self::Internal => Self::Internal,
            Self::Fixed(state) => Self::Fixed(state.clone()),
            Self::Computed(supplier) => Self::Computed(Arc::clone(supplier)),
        }
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Destination<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("Internal"),
            Self::Fixed(state) => f.debug_tuple("Fixed").field(state).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One possible reaction to an event.
///
/// Transitions are immutable once registered. Use
/// [`TransitionBuilder`](crate::builder::TransitionBuilder) to assemble one.
pub struct Transition<S, E, C> {
    pub(crate) destination: Destination<S, C>,
    pub(crate) guard: Option<Guard<C>>,
    pub(crate) action: Option<Action<S, E, C>>,
}

impl<S, E, C> Transition<S, E, C> {
    pub fn new(
        destination: Destination<S, C>,
        guard: Option<Guard<C>>,
        action: Option<Action<S, E, C>>,
    ) -> Self {
        Self {
            destination,
            guard,
            action,
        }
    }

    pub fn destination(&self) -> &Destination<S, C> {
        &self.destination
    }

    pub fn guard(&self) -> Option<&Guard<C>> {
        self.guard.as_ref()
    }

    pub fn action(&self) -> Option<&Action<S, E, C>> {
        self.action.as_ref()
    }

    /// Check whether the guard admits this context (no guard = always).
    pub fn is_eligible(&self, context: &C) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(context))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.destination, Destination::Internal)
    }
}

impl<S: Clone, E, C> Clone for Transition<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            destination: self.destination.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: fmt::Debug, E, C> fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("destination", &self.destination)
            .field("guarded", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
