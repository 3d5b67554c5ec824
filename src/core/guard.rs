//! Guard predicates gating trigger behaviors.
//!
//! A guard is a pure boolean function evaluated at fire time to decide
//! whether a configured behavior currently applies. Guards carry a
//! description so diagnostics can name the condition that blocked a trigger.

use std::fmt;

/// Pure predicate that decides whether a trigger behavior is applicable.
///
/// Guards must be deterministic and side-effect free: the engine may
/// evaluate a guard more than once while resolving a single fire (once to
/// detect ambiguous configurations and again during handler selection), or
/// not at all. Do not rely on call counts.
pub struct Guard {
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
    description: String,
}

impl Guard {
    /// Create a guard from a predicate and a human-readable description.
    ///
    /// The description is mandatory; it is what error messages and the
    /// graph export show for this condition.
    pub fn new<F>(predicate: F, description: impl Into<String>) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            description: description.into(),
        }
    }

    /// Evaluate the predicate.
    pub fn is_met(&self) -> bool {
        (self.predicate)()
    }

    /// The human-readable condition label.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
