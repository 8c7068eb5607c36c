//! Game boot flow: Bootstrap waits for an async load, then hands the menu
//! scene name to LoadScene, which moves on to Menu.
//!
//! Run with `RUST_LOG=tickstate=debug cargo run --example game_state_machine`
//! to see the machine's own events.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tickstate::{
    impl_state, Container, Enter, EnterWith, Exit, StateMachineBuilder, Tick, Transition,
    Transitions, Update,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const MENU_SCENE_NAME: &str = "Example Menu Scene";

trait BootService {
    /// Start loading. `done` flips to `true` when the load completes.
    fn load(&self, done: Arc<AtomicBool>);
}

struct TimedBootService {
    delay: Duration,
}

impl BootService for TimedBootService {
    fn load(&self, done: Arc<AtomicBool>) {
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            done.store(true, Ordering::Release);
        });
    }
}

struct Bootstrap {
    transitions: Transitions,
    boot_service: Rc<dyn BootService>,
    done: Arc<AtomicBool>,
}

impl_state!(Bootstrap, transitions, hooks: [Update]);

impl Bootstrap {
    fn new(boot_service: Rc<dyn BootService>) -> Self {
        let done = Arc::new(AtomicBool::new(false));
        let loaded = Arc::clone(&done);
        Self {
            transitions: Transitions::new().with(Transition::with_payload::<LoadScene, String, _>(
                move || loaded.load(Ordering::Acquire),
                || MENU_SCENE_NAME.to_string(),
            )),
            boot_service,
            done,
        }
    }
}

impl Enter for Bootstrap {
    fn on_enter(&mut self) {
        info!("booting");
        self.done.store(false, Ordering::Release);
        self.boot_service.load(Arc::clone(&self.done));
    }
}

impl Update for Bootstrap {
    fn on_update(&mut self) {
        info!("still loading");
    }
}

struct LoadScene {
    transitions: Transitions,
}

impl_state!(LoadScene, transitions);

impl EnterWith<String> for LoadScene {
    fn on_enter_with(&mut self, scene: String) {
        info!(%scene, "loading scene");
    }
}

struct Menu {
    transitions: Transitions,
    frames: u32,
}

impl_state!(Menu, transitions, hooks: [Update, Exit]);

impl Enter for Menu {
    fn on_enter(&mut self) {
        self.frames = 0;
    }
}

impl Update for Menu {
    fn on_update(&mut self) {
        self.frames += 1;
    }
}

impl Exit for Menu {
    fn on_exit(&mut self) {
        info!(frames = self.frames, "leaving menu");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let boot_service: Rc<dyn BootService> = Rc::new(TimedBootService {
        delay: Duration::from_millis(120),
    });

    let container = Container::new()
        .bind_instance(boot_service)
        .bind_state(|c: &Container| Ok(Bootstrap::new(c.resolve()?)))
        .bind_state(|_: &Container| {
            Ok(LoadScene {
                transitions: Transitions::new().with(Transition::to::<Menu>(|| true)),
            })
        })
        .bind_state(|_: &Container| {
            Ok(Menu {
                transitions: Transitions::new(),
                frames: 0,
            })
        });

    let mut machine = StateMachineBuilder::new(container)
        .name("game")
        .state::<Bootstrap>()
        .state::<LoadScene>()
        .state::<Menu>()
        .build()?;

    machine.on_state_changed(|current, previous| {
        info!(
            to = %current.state_id(),
            from = ?previous.map(|state| state.state_id().name()),
            "state changed"
        );
    });

    machine.change_state::<Bootstrap>()?;

    let mut ticker = tokio::time::interval(Duration::from_millis(50));
    for _ in 0..10 {
        ticker.tick().await;
        if machine.update()? == Tick::Transitioned {
            info!(state = ?machine.current_state_id().map(|id| id.name()), "transitioned");
        }
    }

    machine.stop();
    let path: Vec<_> = machine
        .history()
        .get_path()
        .iter()
        .map(|id| id.name())
        .collect();
    info!(?path, "done");
    Ok(())
}
