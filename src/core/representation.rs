//! Per-state configuration node: behaviors, actions, and hierarchy links.
//!
//! All representations are owned by the machine's state map (the arena);
//! superstate and substate links are stored as keys into that map rather
//! than references, so traversal methods take the arena as a parameter.

use std::collections::HashMap;

use crate::core::action::{EntryActionBehavior, ExitActionBehavior};
use crate::core::behavior::TriggerBehavior;
use crate::core::transition::Transition;
use crate::core::{State, Trigger};
use crate::error::FireError;

/// The arena owning every configured state's representation.
pub type StateRegistry<S, T, A> = HashMap<S, StateRepresentation<S, T, A>>;

/// Everything configured for one state: how it responds to triggers, the
/// side effects of entering and leaving it, and its place in the hierarchy.
pub struct StateRepresentation<S, T, A> {
    state: S,
    trigger_behaviors: HashMap<T, Vec<TriggerBehavior<S, T, A>>>,
    entry_actions: Vec<EntryActionBehavior<S, T, A>>,
    exit_actions: Vec<ExitActionBehavior<S, T>>,
    superstate: Option<S>,
    substates: Vec<S>,
}

impl<S: State, T: Trigger, A> StateRepresentation<S, T, A> {
    pub fn new(state: S) -> Self {
        StateRepresentation {
            state,
            trigger_behaviors: HashMap::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            superstate: None,
            substates: Vec::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn superstate(&self) -> Option<&S> {
        self.superstate.as_ref()
    }

    pub fn add_trigger_behavior(&mut self, behavior: TriggerBehavior<S, T, A>) {
        self.trigger_behaviors
            .entry(behavior.trigger().clone())
            .or_default()
            .push(behavior);
    }

    pub fn add_entry_action(&mut self, action: EntryActionBehavior<S, T, A>) {
        self.entry_actions.push(action);
    }

    pub fn add_exit_action(&mut self, action: ExitActionBehavior<S, T>) {
        self.exit_actions.push(action);
    }

    pub fn set_superstate(&mut self, superstate: S) {
        self.superstate = Some(superstate);
    }

    pub fn add_substate(&mut self, substate: S) {
        self.substates.push(substate);
    }

    fn superstate_in<'a>(
        &self,
        registry: &'a StateRegistry<S, T, A>,
    ) -> Option<&'a StateRepresentation<S, T, A>> {
        self.superstate.as_ref().and_then(|s| registry.get(s))
    }

    /// True if this state, or an ancestor, currently handles the trigger.
    ///
    /// Pure observation: no ambiguity check, no guard caching.
    pub fn can_handle(&self, registry: &StateRegistry<S, T, A>, trigger: &T) -> bool {
        let local = self
            .trigger_behaviors
            .get(trigger)
            .map_or(false, |behaviors| behaviors.iter().any(|b| b.is_guard_met()));

        local
            || self
                .superstate_in(registry)
                .map_or(false, |sup| sup.can_handle(registry, trigger))
    }

    /// Find the unique guard-satisfied behavior for the trigger, walking up
    /// the superstate chain when this state has no local match. A local
    /// match always wins over delegation.
    pub fn try_find_handler<'a>(
        &'a self,
        registry: &'a StateRegistry<S, T, A>,
        trigger: &T,
    ) -> Result<Option<&'a TriggerBehavior<S, T, A>>, FireError<S, T>> {
        if let Some(handler) = self.find_local_handler(trigger, TriggerBehavior::is_guard_met)? {
            return Ok(Some(handler));
        }
        match self.superstate_in(registry) {
            Some(sup) => sup.try_find_handler(registry, trigger),
            None => Ok(None),
        }
    }

    /// Mirror of [`try_find_handler`](Self::try_find_handler) over behaviors
    /// whose guard is currently unmet, used to tell "guard not satisfied"
    /// apart from "trigger not configured".
    pub fn try_find_handler_with_unmet_guard<'a>(
        &'a self,
        registry: &'a StateRegistry<S, T, A>,
        trigger: &T,
    ) -> Result<Option<&'a TriggerBehavior<S, T, A>>, FireError<S, T>> {
        if let Some(handler) = self.find_local_handler(trigger, |b| !b.is_guard_met())? {
            return Ok(Some(handler));
        }
        match self.superstate_in(registry) {
            Some(sup) => sup.try_find_handler_with_unmet_guard(registry, trigger),
            None => Ok(None),
        }
    }

    /// Local lookup shared by both handler searches. More than one behavior
    /// passing the filter at the same level is a configuration error.
    fn find_local_handler<'a, F>(
        &'a self,
        trigger: &T,
        filter: F,
    ) -> Result<Option<&'a TriggerBehavior<S, T, A>>, FireError<S, T>>
    where
        F: Fn(&TriggerBehavior<S, T, A>) -> bool,
    {
        let Some(candidates) = self.trigger_behaviors.get(trigger) else {
            return Ok(None);
        };

        let mut matching = candidates.iter().filter(|behavior| filter(*behavior));
        let handler = matching.next();
        if handler.is_some() && matching.next().is_some() {
            return Err(FireError::AmbiguousTransition {
                trigger: trigger.clone(),
                state: self.state.clone(),
            });
        }
        Ok(handler)
    }

    /// True if `state` is this state or lies anywhere below it.
    pub fn includes(&self, registry: &StateRegistry<S, T, A>, state: &S) -> bool {
        self.state == *state
            || self.substates.iter().any(|sub| {
                registry
                    .get(sub)
                    .map_or(false, |r| r.includes(registry, state))
            })
    }

    /// True if `state` is this state or any of its ancestors.
    pub fn is_included_in(&self, registry: &StateRegistry<S, T, A>, state: &S) -> bool {
        self.state == *state
            || self
                .superstate_in(registry)
                .map_or(false, |sup| sup.is_included_in(registry, state))
    }

    /// Run entry actions for this state, entering ancestors first when the
    /// transition comes from outside this branch of the hierarchy.
    pub fn enter(&self, registry: &StateRegistry<S, T, A>, transition: &Transition<S, T>, args: &A) {
        if transition.is_reentry() {
            self.execute_entry_actions(transition, args);
        } else if !self.includes(registry, transition.source()) {
            if let Some(sup) = self.superstate_in(registry) {
                sup.enter(registry, transition, args);
            }
            self.execute_entry_actions(transition, args);
        }
    }

    /// Run exit actions for this state, then for each ancestor the
    /// transition actually leaves (innermost first).
    pub fn exit(&self, registry: &StateRegistry<S, T, A>, transition: &Transition<S, T>) {
        if transition.is_reentry() {
            self.execute_exit_actions(transition);
        } else if !self.includes(registry, transition.destination()) {
            self.execute_exit_actions(transition);
            if let Some(sup) = self.superstate_in(registry) {
                sup.exit(registry, transition);
            }
        }
    }

    fn execute_entry_actions(&self, transition: &Transition<S, T>, args: &A) {
        for action in &self.entry_actions {
            action.execute(transition, args);
        }
    }

    fn execute_exit_actions(&self, transition: &Transition<S, T>) {
        for action in &self.exit_actions {
            action.execute(transition);
        }
    }

    /// Triggers with at least one guard-satisfied behavior here, unioned
    /// with the superstate's permitted triggers.
    pub fn permitted_triggers(&self, registry: &StateRegistry<S, T, A>) -> Vec<T> {
        let mut triggers: Vec<T> = self
            .trigger_behaviors
            .iter()
            .filter(|(_, behaviors)| behaviors.iter().any(|b| b.is_guard_met()))
            .map(|(trigger, _)| trigger.clone())
            .collect();

        if let Some(sup) = self.superstate_in(registry) {
            for trigger in sup.permitted_triggers(registry) {
                if !triggers.contains(&trigger) {
                    triggers.push(trigger);
                }
            }
        }
        triggers
    }

    pub fn trigger_behaviors(&self) -> impl Iterator<Item = &TriggerBehavior<S, T, A>> {
        self.trigger_behaviors.values().flatten()
    }

    pub fn entry_actions(&self) -> &[EntryActionBehavior<S, T, A>] {
        &self.entry_actions
    }

    pub fn exit_actions(&self) -> &[ExitActionBehavior<S, T>] {
        &self.exit_actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::Guard;

    type Repr = StateRepresentation<&'static str, &'static str, ()>;

    fn hierarchy() -> StateRegistry<&'static str, &'static str, ()> {
        // root -> branch -> leaf, with a second branch beside the first
        let mut registry = HashMap::new();

        let mut root = Repr::new("root");
        root.add_substate("branch");
        root.add_substate("other");

        let mut branch = Repr::new("branch");
        branch.set_superstate("root");
        branch.add_substate("leaf");

        let mut leaf = Repr::new("leaf");
        leaf.set_superstate("branch");

        let mut other = Repr::new("other");
        other.set_superstate("root");

        registry.insert("root", root);
        registry.insert("branch", branch);
        registry.insert("leaf", leaf);
        registry.insert("other", other);
        registry
    }

    #[test]
    fn includes_covers_the_whole_subtree() {
        let registry = hierarchy();
        let root = &registry["root"];

        assert!(root.includes(&registry, &"root"));
        assert!(root.includes(&registry, &"branch"));
        assert!(root.includes(&registry, &"leaf"));
        assert!(!root.includes(&registry, &"elsewhere"));

        let branch = &registry["branch"];
        assert!(branch.includes(&registry, &"leaf"));
        assert!(!branch.includes(&registry, &"other"));
        assert!(!branch.includes(&registry, &"root"));
    }

    #[test]
    fn is_included_in_covers_the_ancestor_chain() {
        let registry = hierarchy();
        let leaf = &registry["leaf"];

        assert!(leaf.is_included_in(&registry, &"leaf"));
        assert!(leaf.is_included_in(&registry, &"branch"));
        assert!(leaf.is_included_in(&registry, &"root"));
        assert!(!leaf.is_included_in(&registry, &"other"));
    }

    #[test]
    fn local_handler_prefers_guard_satisfied_behavior() {
        let registry = HashMap::new();
        let mut repr = Repr::new("gate");
        repr.add_trigger_behavior(TriggerBehavior::transitioning(
            "push",
            "closed",
            Some(Guard::new(|| false, "locked")),
        ));
        repr.add_trigger_behavior(TriggerBehavior::transitioning(
            "push",
            "open",
            Some(Guard::new(|| true, "unlocked")),
        ));

        let handler = repr.try_find_handler(&registry, &"push").unwrap().unwrap();
        assert_eq!(handler.fixed_destination(), Some(&"open"));
    }

    #[test]
    fn two_satisfied_guards_are_ambiguous() {
        let registry = HashMap::new();
        let mut repr = Repr::new("gate");
        repr.add_trigger_behavior(TriggerBehavior::transitioning(
            "push",
            "left",
            Some(Guard::new(|| true, "first")),
        ));
        repr.add_trigger_behavior(TriggerBehavior::transitioning(
            "push",
            "right",
            Some(Guard::new(|| true, "second")),
        ));

        let result = repr.try_find_handler(&registry, &"push");
        assert!(matches!(
            result,
            Err(FireError::AmbiguousTransition {
                trigger: "push",
                state: "gate",
            })
        ));
    }

    #[test]
    fn unmet_guard_lookup_finds_blocked_behavior() {
        let registry = HashMap::new();
        let mut repr = Repr::new("gate");
        repr.add_trigger_behavior(TriggerBehavior::transitioning(
            "push",
            "open",
            Some(Guard::new(|| false, "locked")),
        ));

        assert!(repr.try_find_handler(&registry, &"push").unwrap().is_none());
        let blocked = repr
            .try_find_handler_with_unmet_guard(&registry, &"push")
            .unwrap()
            .unwrap();
        assert_eq!(blocked.guard_description(), Some("locked"));
    }

    #[test]
    fn handler_lookup_delegates_to_superstate() {
        let mut registry = hierarchy();
        registry
            .get_mut("root")
            .unwrap()
            .add_trigger_behavior(TriggerBehavior::transitioning("reset", "root", None));

        let leaf = &registry["leaf"];
        let handler = leaf.try_find_handler(&registry, &"reset").unwrap();
        assert!(handler.is_some());
        assert!(leaf.can_handle(&registry, &"reset"));
    }

    #[test]
    fn permitted_triggers_union_deduplicates() {
        let mut registry = hierarchy();
        registry
            .get_mut("root")
            .unwrap()
            .add_trigger_behavior(TriggerBehavior::transitioning("shared", "other", None));
        {
            let branch = registry.get_mut("branch").unwrap();
            branch.add_trigger_behavior(TriggerBehavior::transitioning("shared", "leaf", None));
            branch.add_trigger_behavior(TriggerBehavior::transitioning("local", "leaf", None));
        }

        let mut permitted = registry["branch"].permitted_triggers(&registry);
        permitted.sort_unstable();
        assert_eq!(permitted, vec!["local", "shared"]);
    }
}
