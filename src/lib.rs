//! Canopy: a hierarchical finite state machine library
//!
//! States form a forest through parent links. An event fired at the
//! machine is handled by the most specific state (the current state or its
//! nearest ancestor) that has an eligible transition for it. Crossing the
//! hierarchy runs exit actions from the old state up to the least common
//! ancestor, then the transition action, then entry actions down to the new
//! state.
//!
//! # Core Concepts
//!
//! - **State / Event**: Type-safe identifiers via the `State` and `Event` traits
//! - **Guards**: Predicates over the caller's context that gate transitions
//! - **Structure**: Parent links, entry/exit actions, and handlers per state
//! - **Asynchronous actions**: Bodies submitted to an `Executor` instead of run in place
//! - **Checkpoints**: Serializable snapshots of a machine's position
//!
//! # Example
//!
//! ```rust
//! use canopy::builder::StateMachineBuilder;
//! use canopy::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Player {
//!         Stopped,
//!         Active,
//!         Playing,
//!         Paused,
//!     }
//! }
//!
//! event_enum! {
//!     enum Control {
//!         Play,
//!         Pause,
//!         Stop,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Session {
//!     log: Vec<String>,
//! }
//!
//! let mut machine = StateMachineBuilder::<Player, Control, Session>::new()
//!     .initial(Player::Stopped)
//!     .state(Player::Stopped, |s| s.on(Control::Play, Player::Playing))
//!     .state(Player::Active, |s| {
//!         s.on(Control::Stop, Player::Stopped)
//!             .on_exit(|_, _, session: &mut Session| {
//!                 session.log.push("released device".to_string());
//!                 Ok(())
//!             })
//!     })
//!     .state(Player::Playing, |s| {
//!         s.child_of(Player::Active).on(Control::Pause, Player::Paused)
//!     })
//!     .state(Player::Paused, |s| {
//!         s.child_of(Player::Active).on(Control::Play, Player::Playing)
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut session = Session::default();
//! machine.fire(Control::Play, &mut session).unwrap();
//! machine.fire(Control::Pause, &mut session).unwrap();
//! assert_eq!(machine.state(), &Player::Paused);
//!
//! // Stop is handled by the parent state.
//! machine.fire(Control::Stop, &mut session).unwrap();
//! assert_eq!(machine.state(), &Player::Stopped);
//! assert_eq!(session.log, vec!["released device"]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod effects;
pub mod hierarchy;

// Re-export commonly used types
pub use builder::{BuildError, StateBuilder, StateMachineBuilder, TransitionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Event, Guard, State, StateHistory, StateTransition};
pub use effects::{
    Action, ActionError, ActionResult, AsyncActionFactory, Destination, Executor, InlineExecutor,
    StateMachine, Transition, TransitionError,
};
pub use hierarchy::{HierarchyError, StateMachineStructure};
