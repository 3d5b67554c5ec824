//! DOT-language export of a configured machine.

use crate::core::{State, Trigger};
use crate::machine::StateMachine;

impl<S: State, T: Trigger, A> StateMachine<S, T, A> {
    /// Render the configuration as a DOT digraph: one edge per
    /// (source, trigger, destination) triple, guard descriptions in edge
    /// labels, and entry/exit actions as dotted edges to box nodes.
    ///
    /// Destinations that cannot be known statically (computed-destination
    /// behaviors) are drawn as synthetic `unknownDestination_N` nodes
    /// labeled `?`; ignored triggers are drawn as self-edges. Reads
    /// configuration only, firing nothing and changing no state.
    pub fn to_dot_graph(&self) -> String {
        let mut lines = Vec::new();
        let mut unknown_destinations = Vec::new();

        for repr in self.registry().values() {
            let source = repr.state();
            for behavior in repr.trigger_behaviors() {
                let destination = if behavior.is_ignored() {
                    format!("\"{:?}\"", source)
                } else if let Some(known) = behavior.fixed_destination() {
                    format!("\"{:?}\"", known)
                } else {
                    let node = format!("unknownDestination_{}", unknown_destinations.len());
                    unknown_destinations.push(node.clone());
                    node
                };

                let label = match behavior.guard_description() {
                    Some(guard) => format!("{:?} [{}]", behavior.trigger(), guard),
                    None => format!("{:?}", behavior.trigger()),
                };

                lines.push(format!(
                    " \"{:?}\" -> {} [label=\"{}\"];",
                    source, destination, label
                ));
            }
        }

        if !unknown_destinations.is_empty() {
            lines.insert(
                0,
                format!(" {{ node [label=\"?\"] {} }};", unknown_destinations.join(" ")),
            );
        }

        let has_actions = self
            .registry()
            .values()
            .any(|repr| !repr.entry_actions().is_empty() || !repr.exit_actions().is_empty());
        if has_actions {
            lines.push("node [shape=box];".to_string());

            for repr in self.registry().values() {
                let source = repr.state();
                for action in repr.entry_actions() {
                    lines.push(format!(
                        " \"{:?}\" -> \"{}\" [label=\"On Entry\" style=dotted];",
                        source,
                        action.description()
                    ));
                }
                for action in repr.exit_actions() {
                    lines.push(format!(
                        " \"{:?}\" -> \"{}\" [label=\"On Exit\" style=dotted];",
                        source,
                        action.description()
                    ));
                }
            }
        }

        format!("digraph {{\n{}\n}}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Phase {
        Start,
        End,
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Go {
        Walk,
        Jump,
        Route,
    }

    #[test]
    fn plain_edges_name_source_trigger_and_destination() {
        let mut machine: StateMachine<Phase, Go> = StateMachine::new(Phase::Start);
        machine.configure(Phase::Start).permit(Go::Walk, Phase::End);

        let dot = machine.to_dot_graph();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("\"Start\" -> \"End\" [label=\"Walk\"];"));
    }

    #[test]
    fn guarded_edges_carry_the_guard_description() {
        let mut machine: StateMachine<Phase, Go> = StateMachine::new(Phase::Start);
        machine
            .configure(Phase::Start)
            .permit_if(Go::Jump, Phase::End, || true, "runway clear");

        let dot = machine.to_dot_graph();
        assert!(dot.contains("\"Start\" -> \"End\" [label=\"Jump [runway clear]\"];"));
    }

    #[test]
    fn dynamic_destinations_become_unknown_nodes() {
        let mut machine: StateMachine<Phase, Go> = StateMachine::new(Phase::Start);
        machine
            .configure(Phase::Start)
            .permit_dynamic(Go::Route, |_| Phase::End);

        let dot = machine.to_dot_graph();
        assert!(dot.contains("{ node [label=\"?\"] unknownDestination_0 };"));
        assert!(dot.contains("\"Start\" -> unknownDestination_0 [label=\"Route\"];"));
    }

    #[test]
    fn ignored_triggers_are_self_edges() {
        let mut machine: StateMachine<Phase, Go> = StateMachine::new(Phase::Start);
        machine.configure(Phase::End).ignore(Go::Walk);

        let dot = machine.to_dot_graph();
        assert!(dot.contains("\"End\" -> \"End\" [label=\"Walk\"];"));
    }

    #[test]
    fn actions_render_as_dotted_box_edges() {
        let mut machine: StateMachine<Phase, Go> = StateMachine::new(Phase::Start);
        machine
            .configure(Phase::End)
            .on_entry(|_, _| {}, "light the lamp")
            .on_exit(|_| {}, "douse the lamp");

        let dot = machine.to_dot_graph();
        assert!(dot.contains("node [shape=box];"));
        assert!(dot.contains("\"End\" -> \"light the lamp\" [label=\"On Entry\" style=dotted];"));
        assert!(dot.contains("\"End\" -> \"douse the lamp\" [label=\"On Exit\" style=dotted];"));
    }

    #[test]
    fn export_is_read_only() {
        let mut machine: StateMachine<Phase, Go> = StateMachine::new(Phase::Start);
        machine.configure(Phase::Start).permit(Go::Walk, Phase::End);

        let _ = machine.to_dot_graph();
        assert_eq!(machine.state(), &Phase::Start);
    }
}
