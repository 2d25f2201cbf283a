use coinhunter_core::events::GameEvent;
use coinhunter_core::input::{InputState, bindings, frame_input};
use coinhunter_core::progress::Progress;
use coinhunter_game::{CoinHunter, GameStatus};

use crate::audio::{AudioEvent, AudioEventQueue, AudioManager, Bgm};
use crate::storage;

#[cfg(target_family = "wasm")]
use std::cell::{Cell, RefCell};
#[cfg(target_family = "wasm")]
use std::rc::Rc;
#[cfg(target_family = "wasm")]
use wasm_bindgen::closure::Closure;

/// Everything the browser shell owns: the world, input, audio, and the
/// saved progress. Pure state transitions live here so they are
/// testable natively; the WASM glue below only wires events and the
/// animation-frame loop to it.
pub struct App {
    pub game: CoinHunter,
    pub input: InputState,
    pub audio: AudioManager,
    pub sfx: AudioEventQueue,
    pub bgm: Bgm,
    pub progress: Progress,
    pub muted: bool,
}

impl App {
    pub fn new(game: CoinHunter, progress: Progress) -> Self {
        Self {
            game,
            input: InputState::new(),
            audio: AudioManager::new(),
            sfx: AudioEventQueue::default(),
            bgm: Bgm::new(),
            progress,
            muted: false,
        }
    }

    /// Key-down hook. The title and terminal screens react to Enter by
    /// (re)starting play; returns true when the lapsed frame loop must
    /// be kicked off again.
    pub fn on_key_down(&mut self, code: &str) -> bool {
        self.input.on_key_down(code.to_string());
        if code != bindings::CONFIRM {
            return false;
        }
        match self.game.status {
            GameStatus::Start => {
                self.game.start();
                self.start_music();
                true
            },
            GameStatus::GameOver | GameStatus::LevelComplete => {
                self.game.restart();
                self.start_music();
                true
            },
            _ => false,
        }
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.input.on_key_up(code.to_string());
    }

    fn start_music(&mut self) {
        if !self.muted {
            self.bgm.start(&self.audio);
        }
    }

    /// One animation frame: meta keys, one world step, event fan-out.
    /// Returns whether the loop should reschedule itself — it lapses on
    /// every transition out of play, and `on_key_down` kicks a new one.
    pub fn frame(&mut self) -> bool {
        if self.input.is_key_just_pressed(bindings::MUTE) {
            self.muted = !self.muted;
            if self.muted {
                self.bgm.stop();
            } else if self.game.status == GameStatus::Playing {
                self.bgm.start(&self.audio);
            }
        }
        if self.input.is_key_just_pressed(bindings::PAUSE) {
            match self.game.status {
                GameStatus::Playing => {
                    self.game.pause();
                    self.bgm.stop();
                },
                GameStatus::Paused => {
                    self.game.resume();
                    self.start_music();
                },
                _ => {},
            }
        }

        let events = self.game.step(frame_input(&self.input));
        self.handle_events(&events);
        self.sfx.process(&self.audio, self.muted);
        self.input.end_frame();

        let keep_running = matches!(
            self.game.status,
            GameStatus::Playing | GameStatus::Paused
        );
        if !keep_running {
            self.bgm.stop();
        }
        keep_running
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(sound) = AudioEvent::from_game_event(event) {
                self.sfx.push(sound);
            }
            if let GameEvent::LevelComplete { score, time } = event {
                let stage = self.game.level().id.clone();
                self.progress.record_result(&stage, *score, *time);
                storage::save_progress(&self.progress);
            }
        }
    }
}

/// Async entry: fetch the level (with built-in fallback), restore saved
/// progress, wire the listeners, and show the title screen. The frame
/// loop itself starts on the first Enter press.
#[cfg(target_family = "wasm")]
pub fn boot() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = boot_inner().await {
            crate::diag::console_error!("Boot failed: {e:?}");
        }
    });
}

#[cfg(target_family = "wasm")]
async fn boot_inner() -> Result<(), wasm_bindgen::JsValue> {
    use coinhunter_game::camera::{VIEW_HEIGHT, VIEW_WIDTH};
    use coinhunter_game::physics::CoinHunterConfig;
    use wasm_bindgen::{JsCast, JsValue};

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: web_sys::HtmlCanvasElement = document
        .get_element_by_id("game-canvas")
        .ok_or_else(|| JsValue::from_str("no #game-canvas element"))?
        .dyn_into()?;
    canvas.set_width(VIEW_WIDTH as u32);
    canvas.set_height(VIEW_HEIGHT as u32);
    let ctx: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let level = crate::loader::fetch_level("levels/stage1.json").await;
    let progress = storage::load_progress(&[level.id.as_str()]);
    let game = CoinHunter::new(level, CoinHunterConfig::default());

    let app = Rc::new(RefCell::new(App::new(game, progress)));
    let ctx = Rc::new(ctx);
    let running = Rc::new(Cell::new(false));

    {
        let app = Rc::clone(&app);
        let ctx = Rc::clone(&ctx);
        let running = Rc::clone(&running);
        let onkeydown = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
            let code = e.code();
            // Keep the page from scrolling under the game keys.
            if matches!(
                code.as_str(),
                "Space" | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
            ) {
                e.prevent_default();
            }
            let kick = app.borrow_mut().on_key_down(&code);
            if kick {
                kick_loop(&app, &ctx, &running);
            }
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let app = Rc::clone(&app);
        let onkeyup = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
            app.borrow_mut().on_key_up(&e.code());
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
        window.add_event_listener_with_callback("keyup", onkeyup.as_ref().unchecked_ref())?;
        onkeyup.forget();
    }

    // Title screen before any loop runs.
    crate::render::draw(&ctx, &app.borrow().game);
    Ok(())
}

/// Start the requestAnimationFrame loop unless one is already running.
/// The callback reschedules itself only while `App::frame` says so; a
/// final draw still happens on the lapsing frame so terminal screens
/// are shown.
#[cfg(target_family = "wasm")]
fn kick_loop(
    app: &Rc<RefCell<App>>,
    ctx: &Rc<web_sys::CanvasRenderingContext2d>,
    running: &Rc<Cell<bool>>,
) {
    if running.get() {
        return;
    }
    running.set(true);

    let app = Rc::clone(app);
    let ctx = Rc::clone(ctx);
    let running = Rc::clone(running);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let holder_inner = Rc::clone(&holder);

    *holder.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let keep_running = {
            let mut app = app.borrow_mut();
            let keep_running = app.frame();
            crate::render::draw(&ctx, &app.game);
            keep_running
        };
        if keep_running {
            if let Some(cb) = holder_inner.borrow().as_ref() {
                request_frame(cb);
            }
        } else {
            running.set(false);
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = holder.borrow().as_ref() {
        request_frame(cb);
    }
}

#[cfg(target_family = "wasm")]
fn request_frame(cb: &Closure<dyn FnMut()>) {
    use wasm_bindgen::JsCast;
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
