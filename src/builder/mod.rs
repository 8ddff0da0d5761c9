//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for declaring states,
//! their hierarchy, and their handlers with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;

use crate::effects::Transition;

/// Create a simple unconditional transition to `to`.
///
/// # Example
///
/// ```
/// use canopy::builder::simple_transition;
/// use canopy::{event_enum, state_enum};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
///     final: [End]
/// }
///
/// event_enum! {
///     enum MyEvent {
///         Finish,
///     }
/// }
///
/// let transition = simple_transition::<MyState, MyEvent, ()>(MyState::End);
/// assert!(!transition.is_internal());
/// ```
pub fn simple_transition<S, E, C>(to: S) -> Transition<S, E, C> {
    TransitionBuilder::new().to(to).build()
}

/// Create a transition to `to` guarded by a predicate on the context.
///
/// # Example
///
/// ```
/// use canopy::builder::guarded_transition;
/// use canopy::{event_enum, state_enum};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         Middle,
///     }
/// }
///
/// event_enum! {
///     enum MyEvent {
///         Advance,
///     }
/// }
///
/// let transition = guarded_transition::<MyState, MyEvent, u32, _>(
///     MyState::Middle,
///     |retries| *retries < 3,
/// );
/// assert!(transition.is_eligible(&0));
/// assert!(!transition.is_eligible(&3));
/// ```
pub fn guarded_transition<S, E, C, F>(to: S, guard: F) -> Transition<S, E, C>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    TransitionBuilder::new().to(to).when(guard).build()
}
