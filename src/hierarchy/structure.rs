//! The state hierarchy and its configurations.

use crate::core::{Event, State};
use crate::effects::{Destination, Transition};
use crate::hierarchy::configuration::StateConfiguration;
use crate::hierarchy::error::HierarchyError;
use std::collections::HashMap;
use std::fmt;

/// Owns the full state hierarchy, keyed by state identity.
///
/// States are registered on first reference, so a state used only as a
/// transition destination needs no explicit declaration.
///
/// # Example
///
/// ```rust
/// use canopy::hierarchy::StateMachineStructure;
/// use canopy::{event_enum, state_enum};
///
/// state_enum! {
///     enum Phase {
///         Root,
///         Child,
///         Leaf,
///     }
/// }
///
/// event_enum! {
///     enum Signal {
///         Go,
///     }
/// }
///
/// let mut structure: StateMachineStructure<Phase, Signal, ()> = StateMachineStructure::new();
/// structure.set_parent(Phase::Child, Phase::Root);
/// structure.set_parent(Phase::Leaf, Phase::Child);
///
/// let chain = structure.ancestors_of(&Phase::Leaf).unwrap();
/// assert_eq!(chain, vec![Phase::Leaf, Phase::Child, Phase::Root]);
/// ```
pub struct StateMachineStructure<S, E, C> {
    configurations: HashMap<S, StateConfiguration<S, E, C>>,
}

impl<S: State, E: Event, C> StateMachineStructure<S, E, C> {
    pub fn new() -> Self {
        Self {
            configurations: HashMap::new(),
        }
    }

    /// Get the configuration of `state`, creating an empty one on first
    /// reference.
    pub fn configuration_of(&mut self, state: S) -> &mut StateConfiguration<S, E, C> {
        self.configurations.entry(state).or_default()
    }

    /// Register `child` as a direct child of `parent`.
    pub fn set_parent(&mut self, child: S, parent: S) {
        self.configuration_of(parent.clone());
        self.configuration_of(child).set_parent(parent);
    }

    /// Append a transition handling `event` in `state`. A fixed destination
    /// is registered as a known state.
    pub fn add_transition(&mut self, state: S, event: E, transition: Transition<S, E, C>) {
        if let Destination::Fixed(destination) = transition.destination() {
            self.configuration_of(destination.clone());
        }
        self.configuration_of(state).add_handler(event, transition);
    }

    pub fn get(&self, state: &S) -> Option<&StateConfiguration<S, E, C>> {
        self.configurations.get(state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.configurations.contains_key(state)
    }

    /// Whether `state` is registered or named as the fixed destination of
    /// some handler. Handlers added directly on a configuration do not
    /// register their destinations.
    pub fn is_known(&self, state: &S) -> bool {
        self.contains(state)
            || self
                .configurations
                .values()
                .flat_map(|config| config.transitions())
                .any(|t| matches!(t.destination(), Destination::Fixed(target) if target == state))
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.configurations.keys()
    }

    /// Direct parent of `state`, if any.
    pub fn parent_of(&self, state: &S) -> Option<&S> {
        self.configurations.get(state).and_then(|c| c.parent())
    }

    /// Walk from `state` to the root: `[state, parent, ..., root]`.
    ///
    /// The walk is bounded by the number of registered states; a longer
    /// chain can only come from a cycle in the parent links.
    pub fn ancestors_of(&self, state: &S) -> Result<Vec<S>, HierarchyError> {
        let mut chain = vec![state.clone()];
        let Some(mut config) = self.configurations.get(state) else {
            return Ok(chain);
        };
        let bound = self.configurations.len();

        while let Some(parent) = config.parent() {
            match self.configurations.get(parent) {
                Some(parent_config) => {
                    if chain.len() >= bound {
                        return Err(HierarchyError::Cyclic {
                            state: state.name().to_string(),
                            bound,
                        });
                    }
                    chain.push(parent.clone());
                    config = parent_config;
                }
                // Parent set through a raw configuration but never registered.
                None => {
                    chain.push(parent.clone());
                    break;
                }
            }
        }

        Ok(chain)
    }

    /// Check every registered parent chain terminates.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        for state in self.configurations.keys() {
            self.ancestors_of(state)?;
        }
        Ok(())
    }
}

impl<S: State, E: Event, C> Default for StateMachineStructure<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, E: fmt::Debug, C> fmt::Debug for StateMachineStructure<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.configurations.iter()).finish()
    }
}
