//! Trigger behaviors: the unit of "trigger T is handleable in this state".
//!
//! Destination resolution is a tagged union rather than a trait object
//! hierarchy: a behavior either names a fixed destination, computes one from
//! the firing arguments, or consumes the trigger as a no-op.

use crate::core::guard::Guard;
use crate::core::{State, Trigger};

enum BehaviorKind<S, A> {
    /// Fixed destination, known at configuration time.
    Transitioning { destination: S },
    /// Destination computed from the firing arguments.
    Dynamic {
        selector: Box<dyn Fn(&A) -> S + Send + Sync>,
    },
    /// The trigger is consumed without a transition.
    Ignored,
}

/// A configured response to one trigger in one state, optionally guarded.
pub struct TriggerBehavior<S, T, A> {
    trigger: T,
    guard: Option<Guard>,
    kind: BehaviorKind<S, A>,
}

impl<S: State, T: Trigger, A> TriggerBehavior<S, T, A> {
    pub fn transitioning(trigger: T, destination: S, guard: Option<Guard>) -> Self {
        TriggerBehavior {
            trigger,
            guard,
            kind: BehaviorKind::Transitioning { destination },
        }
    }

    pub fn dynamic<F>(trigger: T, selector: F, guard: Option<Guard>) -> Self
    where
        F: Fn(&A) -> S + Send + Sync + 'static,
    {
        TriggerBehavior {
            trigger,
            guard,
            kind: BehaviorKind::Dynamic {
                selector: Box::new(selector),
            },
        }
    }

    pub fn ignored(trigger: T) -> Self {
        TriggerBehavior {
            trigger,
            guard: None,
            kind: BehaviorKind::Ignored,
        }
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    /// True when the behavior is unguarded or its guard currently holds.
    pub fn is_guard_met(&self) -> bool {
        self.guard.as_ref().map_or(true, Guard::is_met)
    }

    pub fn guard_description(&self) -> Option<&str> {
        self.guard.as_ref().map(Guard::description)
    }

    /// Resolve the destination for a firing. `None` means the trigger is
    /// consumed without a transition (the ignored case); selection and
    /// guarding have already happened by the time this is called.
    pub fn destination(&self, args: &A) -> Option<S> {
        match &self.kind {
            BehaviorKind::Transitioning { destination } => Some(destination.clone()),
            BehaviorKind::Dynamic { selector } => Some(selector(args)),
            BehaviorKind::Ignored => None,
        }
    }

    /// The destination when it is known statically; `None` for computed
    /// destinations and ignored triggers. Used by the graph export.
    pub fn fixed_destination(&self) -> Option<&S> {
        match &self.kind {
            BehaviorKind::Transitioning { destination } => Some(destination),
            _ => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self.kind, BehaviorKind::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_behavior_always_yields_its_destination() {
        let behavior: TriggerBehavior<&str, &str, ()> =
            TriggerBehavior::transitioning("go", "harbor", None);

        assert_eq!(behavior.destination(&()), Some("harbor"));
        assert_eq!(behavior.fixed_destination(), Some(&"harbor"));
        assert!(behavior.is_guard_met());
    }

    #[test]
    fn dynamic_behavior_routes_on_arguments() {
        let behavior: TriggerBehavior<&str, &str, u8> = TriggerBehavior::dynamic(
            "route",
            |load| if *load > 5 { "overflow" } else { "normal" },
            None,
        );

        assert_eq!(behavior.destination(&9), Some("overflow"));
        assert_eq!(behavior.destination(&1), Some("normal"));
        assert_eq!(behavior.fixed_destination(), None);
    }

    #[test]
    fn ignored_behavior_has_no_destination() {
        let behavior: TriggerBehavior<&str, &str, ()> = TriggerBehavior::ignored("noise");

        assert!(behavior.is_ignored());
        assert_eq!(behavior.destination(&()), None);
        assert!(behavior.is_guard_met());
    }

    #[test]
    fn guarded_behavior_reports_guard_state() {
        let behavior: TriggerBehavior<&str, &str, ()> = TriggerBehavior::transitioning(
            "go",
            "harbor",
            Some(Guard::new(|| false, "tide is in")),
        );

        assert!(!behavior.is_guard_met());
        assert_eq!(behavior.guard_description(), Some("tide is in"));
    }
}
