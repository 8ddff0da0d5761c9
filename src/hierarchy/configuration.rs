//! Per-state configuration record.

use crate::effects::{Action, Transition};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Everything registered for a single state: its parent, its entry and
/// exit actions, and the candidate transitions for each event.
///
/// All registration is append-only and happens before the first event is
/// fired.
pub struct StateConfiguration<S, E, C> {
    parent: Option<S>,
    entry_actions: Vec<Action<S, E, C>>,
    exit_actions: Vec<Action<S, E, C>>,
    handlers: HashMap<E, Vec<Transition<S, E, C>>>,
}

impl<S, E, C> StateConfiguration<S, E, C> {
    pub fn new() -> Self {
        Self {
            parent: None,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn parent(&self) -> Option<&S> {
        self.parent.as_ref()
    }

    /// Set the parent state, replacing any previous parent.
    pub fn set_parent(&mut self, parent: S) -> &mut Self {
        self.parent = Some(parent);
        self
    }

    pub fn add_entry_action(&mut self, action: Action<S, E, C>) -> &mut Self {
        self.entry_actions.push(action);
        self
    }

    pub fn add_exit_action(&mut self, action: Action<S, E, C>) -> &mut Self {
        self.exit_actions.push(action);
        self
    }

    pub fn entry_actions(&self) -> &[Action<S, E, C>] {
        &self.entry_actions
    }

    pub fn exit_actions(&self) -> &[Action<S, E, C>] {
        &self.exit_actions
    }
}

impl<S, E: Eq + Hash, C> StateConfiguration<S, E, C> {
    /// Append a candidate transition for `event`. Candidates are tried in
    /// registration order.
    pub fn add_handler(&mut self, event: E, transition: Transition<S, E, C>) -> &mut Self {
        self.handlers.entry(event).or_default().push(transition);
        self
    }

    /// Candidate transitions for `event`, in registration order.
    pub fn handlers_for(&self, event: &E) -> &[Transition<S, E, C>] {
        self.handlers.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn handles(&self, event: &E) -> bool {
        !self.handlers_for(event).is_empty()
    }

    /// Every registered transition, grouped by event in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S, E, C>> {
        self.handlers.values().flatten()
    }
}

impl<S, E, C> Default for StateConfiguration<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, E: fmt::Debug, C> fmt::Debug for StateConfiguration<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateConfiguration")
            .field("parent", &self.parent)
            .field("entry_actions", &self.entry_actions.len())
            .field("exit_actions", &self.exit_actions.len())
            .field("events", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
