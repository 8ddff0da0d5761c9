//! State hierarchy storage.
//!
//! [`StateMachineStructure`] owns one [`StateConfiguration`] per known state
//! and answers the ancestor queries used during dispatch. It is populated
//! once during setup and read-only afterwards.

mod configuration;
mod error;
mod structure;

pub use configuration::StateConfiguration;
pub use error::HierarchyError;
pub use structure::StateMachineStructure;
