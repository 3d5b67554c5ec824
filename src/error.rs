//! Fire-time errors.

use thiserror::Error;

/// Why a [`fire`](crate::StateMachine::fire) call could not proceed.
///
/// Every variant is detected during handler lookup, before any exit or
/// entry action runs: a failed fire leaves the machine exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FireError<S, T> {
    /// No behavior for the trigger is registered in the current state or
    /// any of its ancestors.
    #[error("trigger {trigger:?} is not permitted from state {state:?}")]
    TriggerNotPermitted { trigger: T, state: S },

    /// A behavior for the trigger exists, but its guard currently evaluates
    /// false and no other behavior matches.
    #[error("trigger {trigger:?} cannot fire from state {state:?}: guard condition not met ({guard})")]
    GuardNotSatisfied {
        trigger: T,
        state: S,
        /// Description of the unmet guard.
        guard: String,
    },

    /// More than one behavior for the trigger has its guard satisfied at
    /// the same hierarchy level; guards on a shared trigger must be
    /// mutually exclusive.
    #[error("multiple transitions for trigger {trigger:?} are permitted in state {state:?}")]
    AmbiguousTransition { trigger: T, state: S },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_trigger_and_state() {
        let error: FireError<&str, char> = FireError::TriggerNotPermitted {
            trigger: 'x',
            state: "idle",
        };
        assert_eq!(
            error.to_string(),
            "trigger 'x' is not permitted from state \"idle\""
        );
    }

    #[test]
    fn guard_message_carries_the_description() {
        let error: FireError<&str, char> = FireError::GuardNotSatisfied {
            trigger: 'x',
            state: "idle",
            guard: "power available".to_string(),
        };
        assert!(error.to_string().contains("power available"));
    }
}
