//! PWA Game Kit demo
//!
//! A grid walker steered by swipes or the on-screen D-pad, running on the
//! fixed-step harness. Native builds replay a scripted session; the web
//! build wires canvas pointer events and `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use pwa_game_kit::input::Direction;
use pwa_game_kit::rng::RandomSource;
use pwa_game_kit::sim::StepContext;

/// Demo simulation rate (cells per second)
const WALKER_HZ: f64 = 8.0;
const GRID_W: i32 = 16;
const GRID_H: i32 = 12;

/// Walker state: position, heading, one pickup on the board
#[derive(Debug, Clone, PartialEq)]
struct Walker {
    pos: (i32, i32),
    heading: Direction,
    /// Turn requested since the last step
    queued: Option<Direction>,
    food: (i32, i32),
    score: u32,
}

impl Walker {
    fn new() -> Self {
        Self {
            pos: (GRID_W / 2, GRID_H / 2),
            heading: Direction::Right,
            queued: None,
            food: (0, 0),
            score: 0,
        }
    }

    /// Reversing in place is ignored
    fn turn(&mut self, dir: Direction) {
        if dir != self.heading.opposite() {
            self.queued = Some(dir);
        }
    }

    fn step<R: RandomSource + ?Sized>(&mut self, ctx: &mut StepContext<'_, R>) {
        if ctx.tick == 1 {
            self.place_food(ctx);
        }
        if let Some(dir) = self.queued.take() {
            self.heading = dir;
        }
        let (dx, dy) = self.heading.delta();
        self.pos = (
            (self.pos.0 + dx).rem_euclid(GRID_W),
            (self.pos.1 + dy).rem_euclid(GRID_H),
        );
        if self.pos == self.food {
            self.score += 1;
            log::info!("Pickup at {:?} on tick {} (score {})", self.pos, ctx.tick, self.score);
            self.place_food(ctx);
        }
    }

    /// Random cell, nudged one column over if it lands under the walker
    fn place_food<R: RandomSource + ?Sized>(&mut self, ctx: &mut StepContext<'_, R>) {
        let cell = (
            ctx.random_int(GRID_W as u32) as i32,
            ctx.random_int(GRID_H as u32) as i32,
        );
        self.food = if cell == self.pos {
            ((cell.0 + 1) % GRID_W, cell.1)
        } else {
            cell
        };
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use pwa_game_kit::{
        DPadOptions, DPadOverlay, GestureClassifier, HostConfig, Settings, Simulation,
        SystemRandom, platform,
    };

    use super::{WALKER_HZ, Walker};

    /// Merge JSON overrides over the defaults and return the engine config JSON
    #[wasm_bindgen]
    pub fn host_config(overrides_json: &str) -> Result<String, JsValue> {
        let config = HostConfig::from_json(overrides_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(config.engine_config().to_string())
    }

    /// Demo instance holding all state
    struct Game {
        sim: Simulation<SystemRandom>,
        walker: Walker,
        swipes: GestureClassifier,
        dpad: Option<DPadOverlay>,
        last_time: f64,
    }

    impl Game {
        fn new(settings: &Settings) -> Self {
            let dpad = settings.show_dpad.then(|| {
                DPadOverlay::new(DPadOptions {
                    anchor: settings.dpad_anchor,
                    ..DPadOptions::default()
                })
            });
            let settings = Settings {
                tick_rate_hz: WALKER_HZ,
                ..settings.clone()
            };
            Self {
                sim: Simulation::from_settings(&settings, SystemRandom),
                walker: Walker::new(),
                swipes: GestureClassifier::new(settings.swipe, platform::device_pixel_ratio()),
                dpad,
                last_time: 0.0,
            }
        }

        fn update(&mut self, time: f64) {
            let delta = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            while let Some(sample) = self.swipes.consume() {
                self.walker.turn(sample.dir);
            }
            let walker = &mut self.walker;
            self.sim.frame(delta, |ctx| walker.step(ctx));
        }
    }

    fn canvas_point(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("PWA Game Kit demo starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(&settings)));

        let viewport = Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32);
        if let Some(dpad) = game.borrow_mut().dpad.as_mut() {
            dpad.attach(viewport, platform::safe_area());
        }

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Demo running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down: D-pad first, otherwise start a swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let g = &mut *g;
                let point = canvas_point(&event);
                let now = platform::now_ms();
                let pressed = g
                    .dpad
                    .as_mut()
                    .and_then(|pad| pad.press_at(point, now).map(|p| p.dir));
                match pressed {
                    Some(dir) => g.walker.turn(dir),
                    None => g.swipes.on_down(point, now, event.pointer_id()),
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up: finish the swipe, drop any D-pad highlight
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if let Some(pad) = g.dpad.as_mut() {
                    pad.release();
                }
                g.swipes
                    .on_up(canvas_point(&event), platform::now_ms(), event.pointer_id());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize: keep the D-pad clear of the edges
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let viewport = Vec2::new(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                if let Some(pad) = game.borrow_mut().dpad.as_mut() {
                    pad.resize(viewport, platform::safe_area());
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("PWA Game Kit (native) starting...");
    log::info!("Native mode replays a scripted session - build for wasm32 for the touch demo");

    match pwa_game_kit::HostConfig::from_json(r#"{ "width": 360, "height": 640 }"#) {
        Ok(config) => log::info!("Engine config: {}", config.engine_config()),
        Err(e) => log::error!("Bad host config: {e}"),
    }

    let first = scripted_session(42);
    let replay = scripted_session(42);
    if first != replay {
        log::error!("Replay diverged: {first:?} vs {replay:?}");
    }
    log::info!(
        "Scripted session finished at {:?} heading {:?}, score {}",
        first.pos,
        first.heading,
        first.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Feed a fixed script of frames, swipes and D-pad presses through the kit
#[cfg(not(target_arch = "wasm32"))]
fn scripted_session(seed: u32) -> Walker {
    use glam::Vec2;
    use pwa_game_kit::{
        DPadOverlay, GestureClassifier, SafeArea, Simulation, SwipeOptions, XorShiftRandom,
    };

    const FRAME_MS: f64 = 1000.0 / 60.0;
    let viewport = Vec2::new(360.0, 640.0);

    let mut sim = Simulation::new(WALKER_HZ, XorShiftRandom::new(seed));
    let mut swipes = GestureClassifier::new(SwipeOptions::default(), 1.0);
    let mut dpad = DPadOverlay::default();
    dpad.attach(viewport, SafeArea::default());
    let mut walker = Walker::new();

    for frame in 0..600u32 {
        let now = f64::from(frame) * FRAME_MS;

        // A swipe every 90 frames, cycling through the directions
        if frame % 90 == 30 {
            let dir = Direction::ALL[(frame / 90) as usize % 4];
            let (dx, dy) = dir.delta();
            swipes.on_down(Vec2::new(180.0, 320.0), now, 1);
            swipes.on_up(
                Vec2::new(180.0 + dx as f32 * 60.0, 320.0 + dy as f32 * 60.0),
                now + 120.0,
                1,
            );
        }
        // Taps are ignored
        if frame % 90 == 60 {
            swipes.on_down(Vec2::new(100.0, 100.0), now, 2);
            swipes.on_up(Vec2::new(103.0, 98.0), now + 40.0, 2);
        }
        // D-pad press on the up button once
        if frame == 450 {
            if let Some(up) = dpad.layout().map(|l| l.up) {
                if let Some(press) = dpad.press_at(up, now) {
                    log::info!("D-pad event '{}'", press.event);
                    walker.turn(press.dir);
                }
            }
        }

        while let Some(sample) = swipes.consume() {
            walker.turn(sample.dir);
        }
        sim.frame(FRAME_MS, |ctx| walker.step(ctx));
    }

    log::info!("Ran {} ticks", sim.tick());
    walker
}
