//! Actions executed on entry, exit, and transition.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a failing action or destination supplier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Result returned by every action invocation.
pub type ActionResult = Result<(), ActionError>;

/// Function signature shared by every action.
pub type ActionFn<S, E, C> = dyn Fn(&S, &E, &mut C) -> ActionResult + Send + Sync;

/// A unit of work invoked with the source state, the event, and the context.
///
/// Actions are stored as shared function values so transitions and
/// configurations stay cheap to clone.
///
/// # Example
///
/// ```rust
/// use canopy::effects::Action;
///
/// let log: Action<&str, &str, Vec<String>> =
///     Action::from_fn(|from, event, log: &mut Vec<String>| {
///         log.push(format!("{from} on {event}"));
///     });
///
/// let mut ctx = Vec::new();
/// log.invoke(&"Idle", &"start", &mut ctx).unwrap();
/// assert_eq!(ctx, vec!["Idle on start".to_string()]);
/// ```
pub struct Action<S, E, C> {
    run: Arc<ActionFn<S, E, C>>,
}

impl<S, E, C> Action<S, E, C> {
    /// Create an action from a fallible function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> ActionResult + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    /// Create an action from a function that cannot fail.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&S, &E, &mut C) + Send + Sync + 'static,
    {
        Self::new(move |state: &S, event: &E, ctx: &mut C| {
            f(state, event, ctx);
            Ok(())
        })
    }

    pub fn invoke(&self, state: &S, event: &E, context: &mut C) -> ActionResult {
        (self.run)(state, event, context)
    }
}

impl<S, E, C> Clone for Action<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<S, E, C> fmt::Debug for Action<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
