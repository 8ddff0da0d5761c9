//! Hierarchy errors.

use thiserror::Error;

/// Errors detected while walking the state hierarchy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Parent chain of state '{state}' does not terminate within {bound} registered states")]
    Cyclic { state: String, bound: usize },
}
