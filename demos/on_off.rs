//! A light switch: two states, one trigger, and a look at what happens when
//! an unconfigured trigger arrives.

use trellis::StateMachine;

fn main() {
    let mut switch: StateMachine<&str, char> = StateMachine::new("Off");
    switch.configure("Off").permit(' ', "On");
    switch.configure("On").permit(' ', "Off");

    println!("switch starts {}", switch.state());

    for _ in 0..3 {
        switch.fire(' ').expect("toggle is always permitted");
        println!("toggled, switch is {}", switch.state());
    }

    match switch.fire('q') {
        Ok(()) => unreachable!("'q' is not configured"),
        Err(error) => println!("rejected: {error}"),
    }
    println!("switch is still {}", switch.state());
}
