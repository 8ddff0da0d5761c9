//! Ordered execution of exit, transition, and entry actions.

use crate::core::{Event, State};
use crate::effects::action::Action;
use crate::effects::transition::{ActionPhase, Transition, TransitionError};
use crate::hierarchy::{HierarchyError, StateMachineStructure};
use tracing::{debug, trace};

/// States left and entered by one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPlan<S> {
    /// States exited, child to parent.
    pub exits: Vec<S>,
    /// States entered, parent to child.
    pub entries: Vec<S>,
}

/// Runs the actions of a chosen transition across hierarchy boundaries.
///
/// The span of exited and entered states is bounded by the least common
/// ancestor (LCA) of the old and new state. A self-transition exits and
/// re-enters its state; internal transitions skip both phases.
pub struct ExecutionPipeline<'a, S, E, C> {
    structure: &'a StateMachineStructure<S, E, C>,
}

impl<'a, S: State, E: Event, C> ExecutionPipeline<'a, S, E, C> {
    pub fn new(structure: &'a StateMachineStructure<S, E, C>) -> Self {
        Self { structure }
    }

    /// Compute which states a transition from `old` to `new` exits and
    /// enters.
    pub fn plan(&self, old: &S, new: &S) -> Result<TransitionPlan<S>, HierarchyError> {
        let mut old_chain = self.structure.ancestors_of(old)?;
        let mut new_chain = self.structure.ancestors_of(new)?;
        old_chain.reverse();
        new_chain.reverse();

        let mut shared = old_chain
            .iter()
            .zip(new_chain.iter())
            .take_while(|(a, b)| a == b)
            .count();

        // Re-entering the same state: the LCA is its parent.
        if old == new {
            shared -= 1;
        }

        let exits = old_chain[shared..].iter().rev().cloned().collect();
        let entries = new_chain[shared..].to_vec();
        Ok(TransitionPlan { exits, entries })
    }

    /// Run exit actions, the transition action, then entry actions.
    ///
    /// The first failing action aborts the run. States exited before the
    /// failure stay exited; the caller must not commit `new`.
    pub fn execute(
        &self,
        old: &S,
        transition: &Transition<S, E, C>,
        new: &S,
        event: &E,
        context: &mut C,
    ) -> Result<(), TransitionError> {
        let plan = self.plan(old, new)?;
        debug!(
            from = old.name(),
            to = new.name(),
            event = event.name(),
            exits = plan.exits.len(),
            entries = plan.entries.len(),
            "executing transition"
        );

        for state in &plan.exits {
            if let Some(config) = self.structure.get(state) {
                run_all(config.exit_actions(), ActionPhase::Exit, state, old, event, context)?;
            }
        }

        if let Some(action) = transition.action() {
            run_one(action, ActionPhase::Transition, old, old, event, context)?;
        }

        for state in &plan.entries {
            if let Some(config) = self.structure.get(state) {
                run_all(config.entry_actions(), ActionPhase::Entry, state, old, event, context)?;
            }
        }

        Ok(())
    }

    /// Run only the transition action; no state is exited or entered.
    pub fn execute_internal(
        &self,
        source: &S,
        transition: &Transition<S, E, C>,
        event: &E,
        context: &mut C,
    ) -> Result<(), TransitionError> {
        debug!(
            state = source.name(),
            event = event.name(),
            "executing internal transition"
        );
        match transition.action() {
            Some(action) => run_one(action, ActionPhase::Transition, source, source, event, context),
            None => Ok(()),
        }
    }
}

fn run_all<S: State, E: Event, C>(
    actions: &[Action<S, E, C>],
    phase: ActionPhase,
    owner: &S,
    source: &S,
    event: &E,
    context: &mut C,
) -> Result<(), TransitionError> {
    for action in actions {
        run_one(action, phase, owner, source, event, context)?;
    }
    Ok(())
}

fn run_one<S: State, E: Event, C>(
    action: &Action<S, E, C>,
    phase: ActionPhase,
    owner: &S,
    source: &S,
    event: &E,
    context: &mut C,
) -> Result<(), TransitionError> {
    trace!(%phase, state = owner.name(), "running action");
    action
        .invoke(source, event, context)
        .map_err(|err| TransitionError::ActionFailed {
            phase,
            state: owner.name().to_string(),
            source: err,
        })
}
