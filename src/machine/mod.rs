//! The state machine orchestrator and its fire protocol.

mod config;

pub use config::StateConfiguration;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::core::representation::{StateRegistry, StateRepresentation};
use crate::core::transition::Transition;
use crate::core::{State, Trigger};
use crate::error::FireError;

/// A hierarchical state machine over caller-supplied state and trigger
/// types, with an optional firing-argument type `A` (defaulting to `()`)
/// carried to computed destinations and entry actions.
///
/// The machine owns one representation record per configured state in a
/// map keyed by state identity; hierarchy links are keys into that map, so
/// the whole configuration forms an arena with no ownership cycles. The
/// current-state value is the only thing that mutates after configuration.
///
/// Firing is synchronous and exclusive: `fire` takes `&mut self`, so
/// concurrent or reentrant firing against one machine is ruled out at
/// compile time. Callers needing shared access serialize it themselves.
///
/// # Example
///
/// ```rust
/// use trellis::StateMachine;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// let mut machine: StateMachine<Door, &str> = StateMachine::new(Door::Closed);
/// machine.configure(Door::Closed).permit("pull", Door::Open);
/// machine.configure(Door::Open).permit("push", Door::Closed);
///
/// machine.fire("pull").unwrap();
/// assert_eq!(machine.state(), &Door::Open);
/// assert!(machine.fire("pull").is_err());
/// ```
pub struct StateMachine<S, T, A = ()> {
    states: StateRegistry<S, T, A>,
    current: S,
}

impl<S: State, T: Trigger, A> StateMachine<S, T, A> {
    /// Create a machine resting in `initial`. The initial state needs no
    /// prior configuration; configuring it later extends it like any other
    /// state.
    pub fn new(initial: S) -> Self {
        StateMachine {
            states: HashMap::new(),
            current: initial,
        }
    }

    /// The state the machine is currently in.
    pub fn state(&self) -> &S {
        &self.current
    }

    /// Begin (or extend) the configuration of `state`.
    pub fn configure(&mut self, state: S) -> StateConfiguration<'_, S, T, A> {
        StateConfiguration::new(self, state)
    }

    /// Fire a trigger with the default firing arguments.
    ///
    /// See [`fire_with`](Self::fire_with) for the full protocol.
    pub fn fire(&mut self, trigger: T) -> Result<(), FireError<S, T>>
    where
        A: Default,
    {
        self.fire_with(trigger, A::default())
    }

    /// Fire a trigger, driving a transition.
    ///
    /// Resolution walks from the current state up the superstate chain for
    /// the unique behavior whose guard is satisfied, computes the
    /// destination, then runs exit actions (innermost state first), commits
    /// the new current state, and runs entry actions (outermost entered
    /// state first). An ignored trigger returns `Ok` without any of that.
    ///
    /// # Errors
    ///
    /// [`FireError::TriggerNotPermitted`], [`FireError::GuardNotSatisfied`],
    /// or [`FireError::AmbiguousTransition`], each detected before any
    /// action runs, leaving the machine unchanged.
    pub fn fire_with(&mut self, trigger: T, args: A) -> Result<(), FireError<S, T>> {
        let source = self.current.clone();

        let handler = match self.representation(&source) {
            Some(repr) => repr.try_find_handler(&self.states, &trigger)?,
            None => None,
        };

        let destination = match handler {
            Some(behavior) => behavior.destination(&args),
            None => {
                let blocked = match self.representation(&source) {
                    Some(repr) => {
                        repr.try_find_handler_with_unmet_guard(&self.states, &trigger)?
                    }
                    None => None,
                };
                return Err(match blocked {
                    Some(behavior) => FireError::GuardNotSatisfied {
                        trigger,
                        state: source,
                        guard: behavior.guard_description().unwrap_or_default().to_string(),
                    },
                    None => FireError::TriggerNotPermitted {
                        trigger,
                        state: source,
                    },
                });
            }
        };

        let Some(destination) = destination else {
            trace!("trigger {:?} ignored in state {:?}", trigger, source);
            return Ok(());
        };

        let transition = Transition::new(source, destination, trigger);

        if let Some(repr) = self.representation(transition.source()) {
            repr.exit(&self.states, &transition);
        }
        self.current = transition.destination().clone();
        if let Some(repr) = self.representation(transition.destination()) {
            repr.enter(&self.states, &transition, &args);
        }

        debug!(
            "transitioned from {:?} to {:?} on {:?}",
            transition.source(),
            transition.destination(),
            transition.trigger()
        );
        Ok(())
    }

    /// Whether the current state (or an ancestor) would accept the trigger.
    ///
    /// Pure observation: never changes state or runs actions.
    pub fn can_fire(&self, trigger: &T) -> bool {
        self.representation(&self.current)
            .map_or(false, |repr| repr.can_handle(&self.states, trigger))
    }

    /// Whether the machine is in `state`: the current state either equals
    /// it or lies somewhere beneath it in the hierarchy.
    pub fn is_in_state(&self, state: &S) -> bool {
        self.current == *state
            || self
                .representation(&self.current)
                .map_or(false, |repr| repr.is_included_in(&self.states, state))
    }

    /// The set of triggers with at least one guard-satisfied behavior
    /// reachable from the current state, including via ancestors.
    pub fn permitted_triggers(&self) -> Vec<T> {
        self.representation(&self.current)
            .map_or_else(Vec::new, |repr| repr.permitted_triggers(&self.states))
    }

    pub(crate) fn representation(&self, state: &S) -> Option<&StateRepresentation<S, T, A>> {
        self.states.get(state)
    }

    pub(crate) fn representation_mut(&mut self, state: S) -> &mut StateRepresentation<S, T, A> {
        self.states
            .entry(state.clone())
            .or_insert_with(|| StateRepresentation::new(state))
    }

    pub(crate) fn registry(&self) -> &StateRegistry<S, T, A> {
        &self.states
    }
}
