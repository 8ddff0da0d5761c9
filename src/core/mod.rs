//! Core state machine types.
//!
//! This module contains the side-effect free building blocks:
//! - State and event identities via the `State` and `Event` traits
//! - Guard predicates over the machine context
//! - Immutable history tracking

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{Event, State};
