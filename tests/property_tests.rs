//! Property-based tests for timers and transition ordering.

use std::sync::{Arc, Mutex};

use lance_ai::engine::timer::{Timer, TimerEvent};
use lance_ai::fsm::{Predicate, State, StateMachine};
use proptest::prelude::*;

struct Flags {
    any: bool,
    edges: [bool; 3],
}

struct Node(&'static str);

impl State<Flags> for Node {
    fn name(&self) -> &'static str {
        self.0
    }
}

proptest! {
    #[test]
    fn timer_elapsed_is_monotonic_and_bounded(
        duration in 0.0f32..5.0,
        steps in prop::collection::vec(0.0f32..0.5, 1..64),
    ) {
        let mut timer = Timer::new("prop", duration).unwrap();
        timer.start();
        let mut last = timer.elapsed();
        let mut stops = 0;
        for dt in steps {
            let was_running = timer.is_running();
            let event = timer.tick(dt);
            if event == Some(TimerEvent::Stopped) {
                stops += 1;
            }
            if was_running && timer.is_running() {
                prop_assert!(timer.elapsed() >= last);
            }
            prop_assert!((0.0..=1.0).contains(&timer.progress()));
            last = timer.elapsed();
        }
        prop_assert!(stops <= 1);
    }

    #[test]
    fn listeners_see_alternating_start_stop(ops in prop::collection::vec(0u8..3, 1..40)) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut timer = Timer::new("prop", 0.25).unwrap();
        let sink = Arc::clone(&seen);
        timer.subscribe(move |event| sink.lock().unwrap().push(event));

        for op in ops {
            match op {
                0 => timer.start(),
                1 => timer.stop(),
                _ => {
                    timer.tick(0.1);
                }
            }
        }

        let seen = seen.lock().unwrap();
        for pair in seen.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
        if let Some(first) = seen.first() {
            prop_assert_eq!(*first, TimerEvent::Started);
        }
    }

    #[test]
    fn first_satisfied_transition_wins(global_fires in any::<bool>(), edges in any::<[bool; 3]>()) {
        let mut machine = StateMachine::new();
        let start = machine.add_state(Node("start"));
        let targets = [
            machine.add_state(Node("a")),
            machine.add_state(Node("b")),
            machine.add_state(Node("c")),
        ];
        let global = machine.add_state(Node("global"));

        machine.add_any_transition(global, Predicate::new(|f: &mut Flags| f.any)).unwrap();
        for (i, &target) in targets.iter().enumerate() {
            machine
                .add_transition(start, target, Predicate::new(move |f: &mut Flags| f.edges[i]))
                .unwrap();
        }

        let mut flags = Flags { any: global_fires, edges };
        machine.set_state(start, &mut flags).unwrap();
        machine.update(&mut flags).unwrap();

        let expected = if global_fires {
            global
        } else {
            edges
                .iter()
                .position(|&fired| fired)
                .map_or(start, |i| targets[i])
        };
        prop_assert_eq!(machine.current(), Some(expected));
    }
}
