//! Fluent per-state configuration.

use crate::core::action::{EntryActionBehavior, ExitActionBehavior};
use crate::core::behavior::TriggerBehavior;
use crate::core::guard::Guard;
use crate::core::transition::Transition;
use crate::core::{State, Trigger};
use crate::machine::StateMachine;

/// Configuration handle for one state, returned by
/// [`StateMachine::configure`].
///
/// Every method appends to the state's record and hands the handle back for
/// chaining; nothing is ever replaced or removed. Calling `configure` again
/// for the same state extends the same record.
pub struct StateConfiguration<'a, S, T, A> {
    machine: &'a mut StateMachine<S, T, A>,
    state: S,
}

impl<'a, S: State, T: Trigger, A> StateConfiguration<'a, S, T, A> {
    pub(crate) fn new(machine: &'a mut StateMachine<S, T, A>, state: S) -> Self {
        machine.representation_mut(state.clone());
        StateConfiguration { machine, state }
    }

    /// Permit an unguarded transition to a fixed destination.
    ///
    /// The destination may equal the configured state; firing the trigger
    /// then reenters it (own exit and entry actions run, ancestors stay
    /// untouched).
    pub fn permit(self, trigger: T, destination: S) -> Self {
        self.machine
            .representation_mut(self.state.clone())
            .add_trigger_behavior(TriggerBehavior::transitioning(trigger, destination, None));
        self
    }

    /// Permit a transition to a fixed destination, gated by a guard.
    ///
    /// The guard must be pure; it may be evaluated more than once per fire.
    /// Multiple guarded permits may share a trigger as long as at most one
    /// guard holds at a time; two holding simultaneously makes the fire
    /// fail with [`FireError::AmbiguousTransition`](crate::FireError).
    pub fn permit_if<G>(
        self,
        trigger: T,
        destination: S,
        guard: G,
        description: impl Into<String>,
    ) -> Self
    where
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.machine
            .representation_mut(self.state.clone())
            .add_trigger_behavior(TriggerBehavior::transitioning(
                trigger,
                destination,
                Some(Guard::new(guard, description)),
            ));
        self
    }

    /// Permit a transition whose destination is computed from the firing
    /// arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::StateMachine;
    ///
    /// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    /// enum Mode {
    ///     Idle,
    ///     Fast,
    ///     Slow,
    /// }
    ///
    /// let mut machine: StateMachine<Mode, &str, u32> = StateMachine::new(Mode::Idle);
    /// machine.configure(Mode::Idle).permit_dynamic("speed", |rpm| {
    ///     if *rpm > 1_000 {
    ///         Mode::Fast
    ///     } else {
    ///         Mode::Slow
    ///     }
    /// });
    ///
    /// machine.fire_with("speed", 5_000).unwrap();
    /// assert_eq!(machine.state(), &Mode::Fast);
    /// ```
    pub fn permit_dynamic<F>(self, trigger: T, selector: F) -> Self
    where
        F: Fn(&A) -> S + Send + Sync + 'static,
    {
        self.machine
            .representation_mut(self.state.clone())
            .add_trigger_behavior(TriggerBehavior::dynamic(trigger, selector, None));
        self
    }

    /// Guarded form of [`permit_dynamic`](Self::permit_dynamic).
    pub fn permit_dynamic_if<F, G>(
        self,
        trigger: T,
        selector: F,
        guard: G,
        description: impl Into<String>,
    ) -> Self
    where
        F: Fn(&A) -> S + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.machine
            .representation_mut(self.state.clone())
            .add_trigger_behavior(TriggerBehavior::dynamic(
                trigger,
                selector,
                Some(Guard::new(guard, description)),
            ));
        self
    }

    /// Consume the trigger in this state without transitioning or running
    /// any action. The trigger stays permitted; an ignore in a substate
    /// thereby shadows a superstate's permit for the same trigger.
    pub fn ignore(self, trigger: T) -> Self {
        self.machine
            .representation_mut(self.state.clone())
            .add_trigger_behavior(TriggerBehavior::ignored(trigger));
        self
    }

    /// Run an action every time this state is entered.
    pub fn on_entry<F>(self, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Transition<S, T>, &A) + Send + Sync + 'static,
    {
        self.machine
            .representation_mut(self.state.clone())
            .add_entry_action(EntryActionBehavior::new(action, description));
        self
    }

    /// Run an action when this state is entered via the given trigger;
    /// entries caused by any other trigger skip it.
    pub fn on_entry_from<F>(self, trigger: T, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Transition<S, T>, &A) + Send + Sync + 'static,
    {
        self.machine
            .representation_mut(self.state.clone())
            .add_entry_action(EntryActionBehavior::filtered(trigger, action, description));
        self
    }

    /// Run an action every time this state is left.
    pub fn on_exit<F>(self, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        self.machine
            .representation_mut(self.state.clone())
            .add_exit_action(ExitActionBehavior::new(action, description));
        self
    }

    /// Make this state a substate of `superstate`.
    ///
    /// A substate inherits its ancestors' permitted triggers, and
    /// transitions crossing the hierarchy run entry actions ancestor-first
    /// and exit actions innermost-first.
    ///
    /// # Panics
    ///
    /// Panics if the link would make a state its own ancestor. The
    /// hierarchy must be a tree.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::StateMachine;
    ///
    /// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    /// enum Conn {
    ///     Offline,
    ///     Online,
    ///     Busy,
    /// }
    ///
    /// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    /// enum Ev {
    ///     Connect,
    ///     Disconnect,
    ///     Work,
    /// }
    ///
    /// let mut machine: StateMachine<Conn, Ev> = StateMachine::new(Conn::Offline);
    /// machine.configure(Conn::Offline).permit(Ev::Connect, Conn::Online);
    /// machine
    ///     .configure(Conn::Online)
    ///     .permit(Ev::Disconnect, Conn::Offline)
    ///     .permit(Ev::Work, Conn::Busy);
    /// machine.configure(Conn::Busy).substate_of(Conn::Online);
    ///
    /// machine.fire(Ev::Connect).unwrap();
    /// machine.fire(Ev::Work).unwrap();
    ///
    /// // Busy inherits Online's transitions.
    /// assert!(machine.can_fire(&Ev::Disconnect));
    /// ```
    pub fn substate_of(self, superstate: S) -> Self {
        let mut ancestor = Some(superstate.clone());
        while let Some(state) = ancestor {
            if state == self.state {
                panic!(
                    "configuring {:?} as a substate of {:?} would create a hierarchy cycle",
                    self.state, superstate
                );
            }
            ancestor = self
                .machine
                .representation(&state)
                .and_then(|r| r.superstate().cloned());
        }

        self.machine
            .representation_mut(superstate.clone())
            .add_substate(self.state.clone());
        self.machine
            .representation_mut(self.state.clone())
            .set_superstate(superstate);
        self
    }
}
