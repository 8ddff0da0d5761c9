//! Event dispatch: actions, transitions, and their execution.
//!
//! This module is the imperative shell around the hierarchy:
//!
//! - **Resolver**: picks the transition for `(state, event, context)`
//! - **Pipeline**: runs exit, transition, and entry actions in order
//! - **Async actions**: submit action bodies to an [`Executor`]
//! - **State machine**: the facade tying them together behind `fire`

mod action;
mod async_action;
mod machine;
mod pipeline;
mod resolver;
mod transition;

pub use action::{Action, ActionError, ActionFn, ActionResult};
pub use async_action::{AsyncActionFactory, Executor, InlineExecutor, Job, TokioExecutor};
pub use machine::StateMachine;
pub use pipeline::{ExecutionPipeline, TransitionPlan};
pub use resolver::{Resolution, TransitionResolver};
pub use transition::{ActionPhase, Destination, DestinationFn, Transition, TransitionError};
