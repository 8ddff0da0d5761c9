//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::transition::TransitionBuilder;
use crate::checkpoint::Checkpoint;
use crate::core::{Event, State};
use crate::effects::{
    Action, ActionResult, AsyncActionFactory, Executor, StateMachine, Transition,
};
use crate::hierarchy::StateMachineStructure;

/// Builder for constructing state machines with a fluent API.
///
/// Asynchronous actions created through the builder are submitted to its
/// [`AsyncActionFactory`], which runs jobs inline unless an executor is
/// supplied with [`with_executor`](Self::with_executor). Set the executor
/// before configuring states that use asynchronous actions.
pub struct StateMachineBuilder<S, E, C> {
    structure: StateMachineStructure<S, E, C>,
    initial: Option<S>,
    async_actions: AsyncActionFactory<S, E, C>,
}

impl<S: State, E: Event, C> StateMachineBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            structure: StateMachineStructure::new(),
            initial: None,
            async_actions: AsyncActionFactory::inline(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Submit asynchronous actions to `executor`.
    pub fn with_executor(self, executor: impl Executor + 'static) -> Self {
        self.with_async_actions(AsyncActionFactory::new(executor))
    }

    pub fn with_async_actions(mut self, factory: AsyncActionFactory<S, E, C>) -> Self {
        self.async_actions = factory;
        self
    }

    /// Configure `state` in place.
    pub fn configure(&mut self, state: S) -> StateBuilder<'_, S, E, C> {
        StateBuilder::new(&mut self.structure, &self.async_actions, state)
    }

    /// Configure `state` within a builder chain.
    pub fn state<F>(mut self, state: S, configure: F) -> Self
    where
        F: FnOnce(StateBuilder<'_, S, E, C>) -> StateBuilder<'_, S, E, C>,
    {
        configure(self.configure(state));
        self
    }

    /// Add a transition using a builder.
    pub fn transition(self, state: S, event: E, builder: TransitionBuilder<S, E, C>) -> Self {
        self.add_transition(state, event, builder.build())
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, state: S, event: E, transition: Transition<S, E, C>) -> Self {
        self.structure.add_transition(state, event, transition);
        self
    }

    /// Wrap `f` as an asynchronous action using this builder's executor.
    pub fn async_action<F>(&self, f: F) -> Action<S, E, C>
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        self.async_actions.create(f)
    }

    pub fn async_actions(&self) -> &AsyncActionFactory<S, E, C> {
        &self.async_actions
    }

    /// Build the state machine.
    /// Returns an error if the initial state is missing or the hierarchy
    /// contains a cycle.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        self.structure.validate()?;
        Ok(StateMachine::new(self.structure, initial))
    }

    /// Build a machine positioned where `checkpoint` left off.
    ///
    /// The initial state set on the builder, if any, is ignored in favour of
    /// the checkpoint's.
    pub fn resume(self, checkpoint: Checkpoint<S>) -> Result<StateMachine<S, E, C>, BuildError> {
        self.structure.validate()?;
        Ok(StateMachine::resume(self.structure, checkpoint)?)
    }
}

impl<S: State, E: Event, C> Default for StateMachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Job;
    use crate::hierarchy::HierarchyError;
    use crate::{event_enum, state_enum};
    use std::sync::{Arc, Mutex};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Validating,
            Complete,
        }
        final: [Complete]
    }

    event_enum! {
        enum TestEvent {
            Start,
            Check,
            Finish,
        }
    }

    type Builder = StateMachineBuilder<TestState, TestEvent, Vec<String>>;

    #[test]
    fn builder_validates_required_fields() {
        let result = Builder::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_cyclic_hierarchy() {
        let result = Builder::new()
            .initial(TestState::Initial)
            .state(TestState::Processing, |s| s.child_of(TestState::Validating))
            .state(TestState::Validating, |s| s.child_of(TestState::Processing))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Hierarchy(HierarchyError::Cyclic { .. }))
        ));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let mut machine = Builder::new()
            .initial(TestState::Initial)
            .state(TestState::Initial, |s| {
                s.on(TestEvent::Start, TestState::Validating)
            })
            .state(TestState::Validating, |s| {
                s.child_of(TestState::Processing)
                    .on(TestEvent::Finish, TestState::Complete)
            })
            .state(TestState::Processing, |s| {
                s.on_entry(|_, _, log: &mut Vec<String>| {
                    log.push("processing".to_string());
                    Ok(())
                })
            })
            .build()
            .unwrap();

        let mut log = Vec::new();
        assert!(machine.fire(TestEvent::Start, &mut log).unwrap());
        assert_eq!(machine.state(), &TestState::Validating);
        assert_eq!(log, vec!["processing"]);

        assert!(machine.fire(TestEvent::Finish, &mut log).unwrap());
        assert!(machine.is_final());
    }

    #[test]
    fn configure_in_place() {
        let mut builder = Builder::new().initial(TestState::Initial);
        builder
            .configure(TestState::Initial)
            .on(TestEvent::Start, TestState::Processing);
        builder
            .configure(TestState::Processing)
            .ignore(TestEvent::Check);

        let mut machine = builder.build().unwrap();
        let mut log = Vec::new();

        assert!(machine.fire(TestEvent::Start, &mut log).unwrap());
        assert!(machine.fire(TestEvent::Check, &mut log).unwrap());
        assert_eq!(machine.state(), &TestState::Processing);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn add_transition_registers_prebuilt_transition() {
        let mut machine = Builder::new()
            .initial(TestState::Initial)
            .transition(
                TestState::Initial,
                TestEvent::Start,
                TransitionBuilder::new().to(TestState::Processing),
            )
            .build()
            .unwrap();

        assert!(machine.fire(TestEvent::Start, &mut Vec::new()).unwrap());
        assert_eq!(machine.state(), &TestState::Processing);
    }

    #[test]
    fn async_actions_use_configured_executor() {
        let queue: Arc<Mutex<Vec<Job>>> = Arc::default();
        let sink = Arc::clone(&queue);
        let ran = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&ran);

        let mut machine = Builder::new()
            .with_executor(move |job: Job| sink.lock().unwrap().push(job))
            .initial(TestState::Initial)
            .state(TestState::Initial, |s| {
                s.on(TestEvent::Start, TestState::Processing)
            })
            .state(TestState::Processing, move |s| {
                s.on_async_entry(move |state, event| {
                    seen.lock().unwrap().push((state, event));
                    Ok(())
                })
            })
            .build()
            .unwrap();

        assert!(machine.fire(TestEvent::Start, &mut Vec::new()).unwrap());
        assert!(ran.lock().unwrap().is_empty());

        for job in queue.lock().unwrap().drain(..) {
            job();
        }
        assert_eq!(
            *ran.lock().unwrap(),
            vec![(TestState::Initial, TestEvent::Start)]
        );
    }

    #[test]
    fn resume_restores_checkpointed_position() {
        fn builder() -> Builder {
            Builder::new()
                .initial(TestState::Initial)
                .state(TestState::Initial, |s| {
                    s.on(TestEvent::Start, TestState::Processing)
                })
                .state(TestState::Processing, |s| {
                    s.on(TestEvent::Finish, TestState::Complete)
                })
        }
        let mut machine = builder().build().unwrap();
        machine.fire(TestEvent::Start, &mut Vec::new()).unwrap();

        let mut resumed = builder().resume(machine.checkpoint()).unwrap();

        assert_eq!(resumed.state(), &TestState::Processing);
        assert_eq!(resumed.history().len(), 1);
        assert!(resumed.fire(TestEvent::Finish, &mut Vec::new()).unwrap());
        assert!(resumed.is_final());
    }
}
