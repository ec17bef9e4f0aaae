//! Pipe Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pipe_dash::Tuning;
    use pipe_dash::platform::{FrameLoop, GameDriver, RafScheduler};
    use pipe_dash::renderer::CanvasSurface;
    use pipe_dash::sim::Session;

    /// Game instance holding all state
    struct Game {
        driver: GameDriver<CanvasSurface>,
        frames: FrameLoop<RafScheduler>,
    }

    impl Game {
        fn on_frame(&mut self, time: f64) {
            let control = self.driver.on_frame(time);
            self.frames.on_callback(control);
            for event in self.driver.take_events() {
                log::debug!("{event:?}");
            }
        }

        fn press(&mut self) {
            if self.driver.press() {
                self.frames.start();
            }
        }

        fn toggle_autopilot(&mut self) {
            let enabled = !self.driver.autopilot();
            self.driver.set_autopilot(enabled);
        }

        fn teardown(&mut self) {
            self.frames.stop();
            log::info!("Frame loop stopped");
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Pipe Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.world_width as u32);
        canvas.set_height(tuning.world_height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let surface = CanvasSurface::new(
            ctx,
            f64::from(tuning.world_width),
            f64::from(tuning.world_height),
        );
        let session = Session::new(tuning, seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let weak = weak.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if let Some(game) = weak.upgrade() {
                    game.borrow_mut().on_frame(time);
                }
            });
            RefCell::new(Game {
                driver: GameDriver::new(session, surface),
                frames: FrameLoop::new(RafScheduler::new(window.clone(), callback)),
            })
        });

        // Paint the idle world so the canvas is not blank before the first press
        game.borrow_mut().driver.redraw();

        setup_input_handlers(&canvas, game.clone())?;
        setup_teardown(game);

        log::info!("Pipe Dash ready - click or press Space to start");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Click / tap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        game.borrow_mut().press();
                    }
                    "KeyI" => game.borrow_mut().toggle_autopilot(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Cancel the pending frame when the page goes away
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().teardown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().inspect_err(|e| log::error!("Failed to start: {e:?}"))
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use pipe_dash::platform::{GameDriver, run_headless};
    use pipe_dash::renderer::QuadBatch;
    use pipe_dash::sim::Session;
    use pipe_dash::{Tuning, TuningError};

    /// Headless Pipe Dash run (the playable build targets the browser)
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// RNG seed for gap placement
        #[arg(short, long, default_value_t = 1)]
        seed: u64,

        /// JSON file overriding the default tuning
        #[arg(short, long)]
        tuning: Option<PathBuf>,

        /// Maximum number of display callbacks to run
        #[arg(short, long, default_value_t = 3_600)]
        frames: usize,

        /// Simulated display refresh interval in milliseconds
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        frame_ms: f64,

        /// Let the actor fall instead of flying the autopilot
        #[arg(long)]
        no_autopilot: bool,
    }

    pub fn run() -> Result<(), TuningError> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        log::info!("Pipe Dash (headless) starting with seed {}", args.seed);

        let session = Session::new(tuning, args.seed);
        let mut driver = GameDriver::new(session, QuadBatch::new());
        driver.set_autopilot(!args.no_autopilot);

        let report = run_headless(&mut driver, args.frames, args.frame_ms);
        log::info!(
            "Finished after {} callbacks ({} ticks, {} obstacles): {:?}, score {}, high score {}",
            report.callbacks,
            report.ticks,
            report.obstacles_spawned,
            report.phase,
            report.score,
            report.high_score
        );
        log::info!(
            "Last frame: {} quads, {} bytes of vertex data",
            driver.surface().quad_count(),
            driver.surface().vertex_bytes().len()
        );

        if log::log_enabled!(log::Level::Debug) {
            let session = driver.session();
            match serde_json::to_string(&(&session.actor, &session.obstacles)) {
                Ok(json) => log::debug!("Final state: {json}"),
                Err(e) => log::warn!("Could not serialize final state: {e}"),
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), pipe_dash::TuningError> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
