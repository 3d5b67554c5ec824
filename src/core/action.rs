//! Entry and exit action records.
//!
//! Each record pairs a caller-supplied closure with a mandatory description
//! used by diagnostics and the graph export. Entry actions may be filtered
//! to a single causing trigger; exit actions always run when their state is
//! left.

use tracing::trace;

use crate::core::transition::Transition;
use crate::core::{State, Trigger};

/// An action executed when its state is entered.
pub struct EntryActionBehavior<S, T, A> {
    action: Box<dyn Fn(&Transition<S, T>, &A) + Send + Sync>,
    filter: Option<T>,
    description: String,
}

impl<S: State, T: Trigger, A> EntryActionBehavior<S, T, A> {
    /// An entry action that runs for every entry into the state.
    pub fn new<F>(action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Transition<S, T>, &A) + Send + Sync + 'static,
    {
        EntryActionBehavior {
            action: Box::new(action),
            filter: None,
            description: description.into(),
        }
    }

    /// An entry action that runs only when the causing trigger matches.
    pub fn filtered<F>(trigger: T, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Transition<S, T>, &A) + Send + Sync + 'static,
    {
        EntryActionBehavior {
            action: Box::new(action),
            filter: Some(trigger),
            description: description.into(),
        }
    }

    /// Run the action, honoring the trigger filter.
    pub fn execute(&self, transition: &Transition<S, T>, args: &A) {
        if let Some(trigger) = &self.filter {
            if trigger != transition.trigger() {
                return;
            }
        }
        trace!(
            "entry action `{}` on {:?}",
            self.description,
            transition.trigger()
        );
        (self.action)(transition, args);
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An action executed when its state is left.
pub struct ExitActionBehavior<S, T> {
    action: Box<dyn Fn(&Transition<S, T>) + Send + Sync>,
    description: String,
}

impl<S: State, T: Trigger> ExitActionBehavior<S, T> {
    pub fn new<F>(action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        ExitActionBehavior {
            action: Box::new(action),
            description: description.into(),
        }
    }

    pub fn execute(&self, transition: &Transition<S, T>) {
        trace!(
            "exit action `{}` on {:?}",
            self.description,
            transition.trigger()
        );
        (self.action)(transition);
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
