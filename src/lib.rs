//! Trellis: a hierarchical state machine library.
//!
//! States and triggers are plain comparable values. Transitions are
//! configured declaratively per state, optionally guarded, with a fixed or
//! computed destination, and the machine is driven by firing triggers.
//! States may nest: a substate inherits its superstate's permitted
//! triggers, and a transition across the hierarchy runs exit actions from
//! the innermost state outward and entry actions from the outermost
//! entered state inward.
//!
//! The crate is a pure in-memory component: no I/O, no threads, no
//! persistence. Firing is synchronous and all-or-nothing: every error is
//! detected before the first side effect runs.
//!
//! # Example
//!
//! ```rust
//! use trellis::StateMachine;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! enum Switch {
//!     Off,
//!     On,
//! }
//!
//! let mut machine: StateMachine<Switch, char> = StateMachine::new(Switch::Off);
//! machine.configure(Switch::Off).permit(' ', Switch::On);
//! machine.configure(Switch::On).permit(' ', Switch::Off);
//!
//! machine.fire(' ')?;
//! assert_eq!(machine.state(), &Switch::On);
//!
//! // Unconfigured triggers fail and leave the state alone.
//! assert!(machine.fire('x').is_err());
//! assert_eq!(machine.state(), &Switch::On);
//! # Ok::<(), trellis::FireError<Switch, char>>(())
//! ```
//!
//! Entry and exit actions attach to states, not transitions, and carry a
//! description used in diagnostics and the [DOT
//! export](StateMachine::to_dot_graph):
//!
//! ```rust
//! use trellis::StateMachine;
//!
//! let mut machine: StateMachine<&str, &str> = StateMachine::new("standby");
//! machine
//!     .configure("standby")
//!     .permit("wake", "active");
//! machine
//!     .configure("active")
//!     .on_entry(|transition, _| println!("woken by {:?}", transition.trigger()), "announce wake")
//!     .permit("sleep", "standby");
//!
//! machine.fire("wake")?;
//! # Ok::<(), trellis::FireError<&'static str, &'static str>>(())
//! ```

mod core;
mod error;
mod graph;
mod machine;

pub use crate::core::transition::Transition;
pub use crate::core::{State, Trigger};
pub use crate::error::FireError;
pub use crate::machine::{StateConfiguration, StateMachine};
