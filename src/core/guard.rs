//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the machine context. A transition
//! whose guard rejects the context is skipped during resolution.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition is eligible.
///
/// Guards must not mutate the context; they only ever receive a shared
/// reference to it. Cloning a guard shares the underlying predicate.
///
/// # Example
///
/// ```rust
/// use canopy::core::Guard;
///
/// struct Player {
///     volume: u8,
/// }
///
/// let audible = Guard::new(|p: &Player| p.volume > 0);
///
/// assert!(audible.check(&Player { volume: 3 }));
/// assert!(!audible.check(&Player { volume: 0 }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows a transition for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C: 'static> Guard<C> {
    /// Guard that passes only when both guards pass.
    pub fn and(self, other: Guard<C>) -> Self {
        Guard::new(move |ctx: &C| self.check(ctx) && other.check(ctx))
    }

    /// Guard that passes when either guard passes.
    pub fn or(self, other: Guard<C>) -> Self {
        Guard::new(move |ctx: &C| self.check(ctx) || other.check(ctx))
    }

    /// Guard that inverts this one.
    pub fn negate(self) -> Self {
        Guard::new(move |ctx: &C| !self.check(ctx))
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
