//! Core value types of the state machine engine.
//!
//! The engine is generic over the caller's state and trigger types; the
//! [`State`] and [`Trigger`] markers below spell out the only requirements
//! and are blanket-implemented, so plain enums, strings, chars, and integers
//! all work without any manual impl.

pub mod action;
pub mod behavior;
pub mod guard;
pub mod representation;
pub mod transition;

use std::fmt::Debug;
use std::hash::Hash;

/// Marker for types usable as state identities.
///
/// Equality is the only semantic requirement; `Hash` keys the machine's
/// state map and `Debug` serves error messages and the graph export. Any
/// type with these traits is a `State` automatically.
pub trait State: Clone + Eq + Hash + Debug {}

impl<S> State for S where S: Clone + Eq + Hash + Debug {}

/// Marker for types usable as trigger identities, with the same
/// requirements (and blanket impl) as [`State`].
pub trait Trigger: Clone + Eq + Hash + Debug {}

impl<T> Trigger for T where T: Clone + Eq + Hash + Debug {}
