//! A traffic light cycling Red -> Green -> Yellow on a tick budget, with a
//! pedestrian button that shortens green at runtime.

use std::cell::Cell;
use std::rc::Rc;
use tickstate::{
    impl_state, Container, Enter, Guard, PreUpdate, State, StateMachineBuilder, Transition,
    Transitions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ticks spent in the current light, shared by all three states.
#[derive(Clone, Default)]
struct Clock(Rc<Cell<u32>>);

impl Clock {
    fn elapsed_at_least(&self, ticks: u32) -> impl Fn() -> bool + 'static {
        let clock = self.clone();
        move || clock.0.get() >= ticks
    }

    fn reset(&self) {
        self.0.set(0);
    }

    fn advance(&self) {
        self.0.set(self.0.get() + 1);
    }
}

macro_rules! light {
    ($name:ident, $next:ident, $ticks:expr) => {
        struct $name {
            transitions: Transitions,
            clock: Clock,
        }

        impl_state!($name, transitions, hooks: [PreUpdate]);

        impl $name {
            fn new(clock: Clock) -> Self {
                Self {
                    transitions: Transitions::new()
                        .with(Transition::to::<$next>(clock.elapsed_at_least($ticks))),
                    clock,
                }
            }
        }

        impl Enter for $name {
            fn on_enter(&mut self) {
                self.clock.reset();
                info!(light = stringify!($name), "switched");
            }
        }

        impl PreUpdate for $name {
            fn on_pre_update(&mut self) {
                self.clock.advance();
            }
        }
    };
}

light!(Red, Green, 4);
light!(Green, Yellow, 6);
light!(Yellow, Red, 2);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clock = Clock::default();
    let container = Container::new()
        .bind_instance(clock.clone())
        .bind_state(|c: &Container| Ok(Red::new(c.resolve()?)))
        .bind_state(|c: &Container| Ok(Green::new(c.resolve()?)))
        .bind_state(|c: &Container| Ok(Yellow::new(c.resolve()?)));

    let mut machine = StateMachineBuilder::new(container)
        .name("traffic-light")
        .state::<Red>()
        .state::<Green>()
        .state::<Yellow>()
        .build()?;

    machine.change_state::<Red>()?;
    for _ in 0..20 {
        machine.update()?;
    }

    // Pedestrian pressed the button: green now lasts a single tick.
    let replaced = machine
        .get_state_mut::<Green>()?
        .change_transition_condition::<Yellow>(Guard::new(clock.elapsed_at_least(1)));
    info!(replaced, "pedestrian button pressed");

    for _ in 0..12 {
        machine.update()?;
    }

    machine.stop();
    info!(changes = machine.history().len(), "stopped");
    Ok(())
}
