//! Per-state configuration builder.

use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State};
use crate::effects::{Action, ActionError, ActionResult, AsyncActionFactory, Transition};
use crate::hierarchy::StateMachineStructure;

/// Configures one state: its parent, entry and exit actions, and the
/// events it handles.
///
/// Handlers for the same event are tried in the order they are added.
/// Obtained from [`StateMachineBuilder::configure`] or
/// [`StateMachineBuilder::state`].
///
/// [`StateMachineBuilder::configure`]: crate::builder::StateMachineBuilder::configure
/// [`StateMachineBuilder::state`]: crate::builder::StateMachineBuilder::state
pub struct StateBuilder<'a, S, E, C> {
    structure: &'a mut StateMachineStructure<S, E, C>,
    async_actions: &'a AsyncActionFactory<S, E, C>,
    state: S,
}

impl<'a, S: State, E: Event, C> StateBuilder<'a, S, E, C> {
    pub(crate) fn new(
        structure: &'a mut StateMachineStructure<S, E, C>,
        async_actions: &'a AsyncActionFactory<S, E, C>,
        state: S,
    ) -> Self {
        structure.configuration_of(state.clone());
        Self {
            structure,
            async_actions,
            state,
        }
    }

    /// The state being configured.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Make this state a substate of `parent`.
    pub fn child_of(self, parent: S) -> Self {
        self.structure.set_parent(self.state.clone(), parent);
        self
    }

    /// Run `f` whenever this state is entered.
    pub fn on_entry<F>(self, f: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> ActionResult + Send + Sync + 'static,
    {
        self.on_entry_action(Action::new(f))
    }

    pub fn on_entry_action(self, action: Action<S, E, C>) -> Self {
        self.structure
            .configuration_of(self.state.clone())
            .add_entry_action(action);
        self
    }

    /// Run `f` whenever this state is exited.
    pub fn on_exit<F>(self, f: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> ActionResult + Send + Sync + 'static,
    {
        self.on_exit_action(Action::new(f))
    }

    pub fn on_exit_action(self, action: Action<S, E, C>) -> Self {
        self.structure
            .configuration_of(self.state.clone())
            .add_exit_action(action);
        self
    }

    /// Entry action submitted to the machine's executor.
    pub fn on_async_entry<F>(self, f: F) -> Self
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        let action = self.async_actions.create(f);
        self.on_entry_action(action)
    }

    /// Exit action submitted to the machine's executor.
    pub fn on_async_exit<F>(self, f: F) -> Self
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        let action = self.async_actions.create(f);
        self.on_exit_action(action)
    }

    /// Register a prebuilt transition for `event`.
    pub fn handle(self, event: E, transition: Transition<S, E, C>) -> Self {
        self.structure
            .add_transition(self.state.clone(), event, transition);
        self
    }

    /// Register a transition described by a [`TransitionBuilder`].
    pub fn transition(self, event: E, builder: TransitionBuilder<S, E, C>) -> Self {
        self.handle(event, builder.build())
    }

    /// Unconditional transition to `target`.
    pub fn on(self, event: E, target: S) -> Self {
        self.transition(event, TransitionBuilder::new().to(target))
    }

    /// Transition to `target` when `guard` holds for the context.
    pub fn on_when<G>(self, event: E, target: S, guard: G) -> Self
    where
        G: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.transition(event, TransitionBuilder::new().to(target).when(guard))
    }

    /// Transition whose target is computed from the context when fired.
    pub fn on_computed<F>(self, event: E, supplier: F) -> Self
    where
        F: Fn(&C) -> Result<S, ActionError> + Send + Sync + 'static,
    {
        self.transition(event, TransitionBuilder::new().to_computed(supplier))
    }

    /// Handle `event` in place: run `f` without exiting or entering.
    pub fn on_internal<F>(self, event: E, f: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> ActionResult + Send + Sync + 'static,
    {
        self.transition(event, TransitionBuilder::new().action(f))
    }

    /// Transition to `target` whose action is submitted to the executor.
    pub fn on_async<F>(self, event: E, target: S, f: F) -> Self
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        self.transition_async(event, TransitionBuilder::new().to(target), f)
    }

    /// Register `builder` with `f` as its action, submitted to the executor.
    /// Any action already set on `builder` is replaced.
    pub fn transition_async<F>(self, event: E, builder: TransitionBuilder<S, E, C>, f: F) -> Self
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        let action = self.async_actions.create(f);
        self.transition(event, builder.with_action(action))
    }

    /// Internal transition whose action is submitted to the executor.
    pub fn on_async_internal<F>(self, event: E, f: F) -> Self
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        let action = self.async_actions.create(f);
        self.transition(event, TransitionBuilder::new().with_action(action))
    }

    /// Consume `event` in this state without doing anything, so ancestors
    /// never see it.
    pub fn ignore(self, event: E) -> Self {
        self.transition(event, TransitionBuilder::new())
    }
}
