//! State and event identity traits.
//!
//! The engine never interprets states or events beyond equality and hashing.
//! Both traits expose a `name` used for diagnostics and error messages.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are used as keys of the hierarchy, so they must be hashable and
/// comparable. Cloning should be cheap; most states are unit enums.
///
/// # Example
///
/// ```rust
/// use canopy::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum PlayerState {
///     Stopped,
///     Playing,
///     Paused,
/// }
///
/// impl State for PlayerState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Stopped => "Stopped",
///             Self::Playing => "Playing",
///             Self::Paused => "Paused",
///         }
///     }
/// }
///
/// assert_eq!(PlayerState::Paused.name(), "Paused");
/// assert!(!PlayerState::Stopped.is_final());
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Trait for events dispatched into a state machine.
pub trait Event: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
