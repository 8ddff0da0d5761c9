//! Build errors for state machine builders.

use crate::checkpoint::CheckpointError;
use crate::hierarchy::HierarchyError;
use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Invalid state hierarchy: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Cannot resume from checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),
}
