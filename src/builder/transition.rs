//! Builder for constructing transitions.

use crate::core::Guard;
use crate::effects::{Action, ActionError, ActionResult, Destination, Transition};

/// Builder for constructing transitions with a fluent API.
///
/// Without a destination the transition is internal: its action runs but
/// the state does not change.
pub struct TransitionBuilder<S, E, C> {
    destination: Destination<S, C>,
    guard: Option<Guard<C>>,
    action: Option<Action<S, E, C>>,
}

impl<S, E, C> TransitionBuilder<S, E, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            destination: Destination::Internal,
            guard: None,
            action: None,
        }
    }

    /// Set a fixed target state.
    pub fn to(mut self, state: S) -> Self {
        self.destination = Destination::Fixed(state);
        self
    }

    /// Compute the target state from the context on each dispatch.
    pub fn to_computed<F>(mut self, supplier: F) -> Self
    where
        F: Fn(&C) -> Result<S, ActionError> + Send + Sync + 'static,
    {
        self.destination = Destination::computed(supplier);
        self
    }

    /// Make the transition internal (no state change).
    pub fn internal(mut self) -> Self {
        self.destination = Destination::Internal;
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the transition action using a closure (optional).
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> ActionResult + Send + Sync + 'static,
    {
        self.action = Some(Action::new(f));
        self
    }

    /// Set a prebuilt action, e.g. one wrapped by an
    /// [`AsyncActionFactory`](crate::effects::AsyncActionFactory).
    pub fn with_action(mut self, action: Action<S, E, C>) -> Self {
        self.action = Some(action);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Transition<S, E, C> {
        Transition::new(self.destination, self.guard, self.action)
    }
}

impl<S, E, C> Default for TransitionBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
