//! Orb Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent, MouseEvent};

    use orb_pop::audio::AudioManager;
    use orb_pop::persistence::LocalStore;
    use orb_pop::platform::input::{Command, ORB_ATTR, command_for_key, parse_orb_id};
    use orb_pop::platform::{now_ms, prefers_reduced_motion};
    use orb_pop::surface::dom::{DomSurface, ids};
    use orb_pop::surface::{DisplaySurface, SurfaceInput};
    use orb_pop::{RoundConfig, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        surface: DomSurface,
        audio: AudioManager,
        settings: Settings,
        /// An animation frame is already requested
        frame_pending: bool,
    }

    impl Game {
        /// Push queued session events to the page and the speakers
        fn flush(&mut self) {
            for event in self.session.drain_events() {
                self.surface.apply(&event);
                self.audio.apply(&event);
            }
        }

        fn send(&mut self, input: SurfaceInput) {
            self.session.handle_input(input, now_ms());
            self.flush();
        }

        fn toggle_mute(&mut self) {
            let sound = self.settings.toggle_sound();
            self.audio.set_muted(!sound);
            self.settings.save();
            log::info!("Sound {}", if sound { "on" } else { "off" });
        }

        /// Orb id of the focused element, if it is an orb
        fn focused_orb(&self) -> Option<u32> {
            web_sys::window()?
                .document()?
                .active_element()?
                .get_attribute(ORB_ATTR)
                .and_then(|v| parse_orb_id(&v))
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orb Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let config = RoundConfig::with_reduced_motion(
            settings.effective_reduced_motion(prefers_reduced_motion()),
        );

        let Some(surface) = DomSurface::new(document, config.orb_radius) else {
            log::error!("Page has no #{} element", ids::ARENA);
            return;
        };
        let (width, height) = surface.size();

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(config, width, height, seed, Box::new(LocalStore::new()))
        {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid round config: {}", e);
                return;
            }
        };

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(!settings.sound);

        let game = Rc::new(RefCell::new(Game {
            session,
            surface,
            audio,
            settings,
            frame_pending: false,
        }));
        game.borrow_mut().flush();

        log::info!("Session ready ({}x{}, seed {})", width, height, seed);

        setup_start_button(game.clone());
        setup_arena_clicks(game.clone());
        setup_keyboard(game.clone());
        setup_resize(game);
    }

    /// Forward an input and make sure frames run if a round is now live
    fn dispatch(game: &Rc<RefCell<Game>>, input: SurfaceInput) {
        game.borrow_mut().send(input);
        ensure_frames(game.clone());
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id(ids::START) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                // Audio can only start after a user gesture
                game.borrow().audio.resume();
                dispatch(&game, SurfaceInput::StartRequested);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_arena_clicks(game: Rc<RefCell<Game>>) {
        let arena = game.borrow().surface.arena().clone();
        let game_ref = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let id = target
                .closest(&format!("[{}]", ORB_ATTR))
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute(ORB_ATTR))
                .and_then(|v| parse_orb_id(&v));
            if let Some(id) = id {
                dispatch(&game_ref, SurfaceInput::Activate(id));
            }
        });
        let _ = arena.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let command = {
                let g = game.borrow();
                command_for_key(&event.key(), g.session.is_running(), g.focused_orb())
            };
            let Some(command) = command else {
                return;
            };
            // Keeps Enter/Space from also firing a click on the focused orb
            event.prevent_default();
            match command {
                Command::Session(input) => {
                    game.borrow().audio.resume();
                    dispatch(&game, input);
                }
                Command::ToggleMute => game.borrow_mut().toggle_mute(),
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = game.borrow().surface.size();
            dispatch(&game, SurfaceInput::Resized { width, height });
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn ensure_frames(game: Rc<RefCell<Game>>) {
        let wanted = {
            let g = game.borrow();
            g.session.is_running() && !g.frame_pending
        };
        if wanted {
            request_animation_frame(game);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame_pending = true;
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;
            let running = g.session.advance(time);
            g.flush();
            running
        };

        // Frames stop with the round; the next start requests them again
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use orb_pop::persistence::MemoryStore;
    use orb_pop::surface::{LogSurface, SurfaceInput};
    use orb_pop::{RoundConfig, Session, Settings};

    env_logger::init();
    log::info!("Orb Pop (native) starting...");
    log::info!("Native mode plays one headless autoplay round - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let config = RoundConfig::with_reduced_motion(
        settings.effective_reduced_motion(orb_pop::platform::prefers_reduced_motion()),
    );
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut session = match Session::new(config, 800.0, 600.0, seed, Box::new(MemoryStore::new())) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid round config: {}", e);
            std::process::exit(1);
        }
    };
    let mut surface = LogSurface;

    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut next_click = 300.0;
    session.handle_input(SurfaceInput::StartRequested, now);

    // Scripted clicker: bursts of quick hits with an occasional pause
    while session.advance(now) {
        if now >= next_click {
            let target = session.orbs().iter().find(|o| o.alive).map(|o| o.pos);
            if let Some(id) = target.and_then(|pos| session.orb_at(pos)) {
                session.handle_input(SurfaceInput::Activate(id), now);
            }
            next_click += if (now as u64 / 1000) % 4 == 3 { 1100.0 } else { 320.0 };
        }
        session.flush(&mut surface);
        now += frame_ms;
    }
    session.flush(&mut surface);

    println!(
        "Round over: score {} (best {})",
        session.round().score,
        session.best()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
