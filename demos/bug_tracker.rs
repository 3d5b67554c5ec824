//! Bug lifecycle workflow: a hierarchy where `Assigned` is a substate of
//! `Open`, assignment carries a payload, and re-assigning while assigned
//! reenters the state with the new assignee.

use std::sync::{Arc, Mutex};

use trellis::{StateMachine, Transition};

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum BugState {
    Open,
    Assigned,
    Deferred,
    Closed,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum Op {
    Assign,
    Defer,
    Close,
}

struct Bug {
    title: String,
    assignee: Arc<Mutex<Option<String>>>,
    machine: StateMachine<BugState, Op, Option<String>>,
}

impl Bug {
    fn new(title: impl Into<String>) -> Self {
        let assignee = Arc::new(Mutex::new(None));
        let mut machine: StateMachine<BugState, Op, Option<String>> =
            StateMachine::new(BugState::Open);

        machine
            .configure(BugState::Open)
            .permit(Op::Assign, BugState::Assigned);

        let on_assigned = {
            let assignee = assignee.clone();
            move |_: &Transition<BugState, Op>, name: &Option<String>| {
                if let Some(name) = name {
                    println!("  {} is now assigned to the bug", name);
                    *assignee.lock().unwrap() = Some(name.clone());
                }
            }
        };
        let on_released = {
            let assignee = assignee.clone();
            move |_: &Transition<BugState, Op>| {
                if let Some(name) = assignee.lock().unwrap().take() {
                    println!("  {} is off the hook", name);
                }
            }
        };
        machine
            .configure(BugState::Assigned)
            .substate_of(BugState::Open)
            .permit(Op::Assign, BugState::Assigned)
            .permit(Op::Defer, BugState::Deferred)
            .permit(Op::Close, BugState::Closed)
            .on_entry_from(Op::Assign, on_assigned, "record assignee")
            .on_exit(on_released, "release assignee");

        machine
            .configure(BugState::Deferred)
            .permit(Op::Assign, BugState::Assigned)
            .on_entry(
                |_, _| println!("  bug shelved for later"),
                "shelve the bug",
            );

        Bug {
            title: title.into(),
            assignee,
            machine,
        }
    }

    fn assign(&mut self, name: &str) {
        println!("assign {:?} to {}", self.title, name);
        self.machine
            .fire_with(Op::Assign, Some(name.to_string()))
            .expect("assignment should be permitted");
    }

    fn defer(&mut self) {
        println!("defer {:?}", self.title);
        self.machine.fire(Op::Defer).expect("defer should be permitted");
    }

    fn close(&mut self) {
        println!("close {:?}", self.title);
        self.machine.fire(Op::Close).expect("close should be permitted");
    }
}

fn main() {
    let mut bug = Bug::new("Incorrect stock count");

    bug.assign("Joe");
    bug.defer();
    bug.assign("Harry");
    bug.assign("Fred");
    bug.close();

    println!("final state: {:?}", bug.machine.state());
    println!("last assignee: {:?}", bug.assignee.lock().unwrap());

    // A closed bug accepts no further work.
    if let Err(error) = bug.machine.fire(Op::Assign) {
        println!("as expected: {error}");
    }

    println!("\n{}", bug.machine.to_dot_graph());
}
