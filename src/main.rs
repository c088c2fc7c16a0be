//! Flappy Fire Pole entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use flappy_fire_pole::audio::{AudioManager, SoundEffect};
    use flappy_fire_pole::platform::web::DomPresenter;
    use flappy_fire_pole::platform::{Presenter, detect_tier};
    use flappy_fire_pole::sim::{GameEvent, GameLoop, GamePhase, TickOutcome};
    use flappy_fire_pole::{Character, DeviceTier, HighScore, Settings};

    const SCREENS: [&str; 5] = [
        "startScreen",
        "characterScreen",
        "gameScreen",
        "pauseScreen",
        "gameOverScreen",
    ];

    /// Game instance holding all state
    struct Game {
        document: Document,
        tier: DeviceTier,
        settings: Settings,
        high_score: HighScore,
        audio: AudioManager,
        game: Option<GameLoop>,
        presenter: Option<DomPresenter>,
        /// A frame callback is already queued
        frame_pending: bool,
    }

    impl Game {
        fn new(document: Document, tier: DeviceTier) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new(settings.music_enabled);
            Self {
                document,
                tier,
                settings,
                high_score: HighScore::load(),
                audio,
                game: None,
                presenter: None,
                frame_pending: false,
            }
        }

        fn show_screen(&self, id: &str) {
            for screen in SCREENS {
                if let Some(el) = self.document.get_element_by_id(screen) {
                    let _ = el.class_list().remove_1("active");
                }
            }
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().add_1("active");
            }
        }

        fn update_music_buttons(&self) {
            let on = self.settings.music_enabled;
            if let Some(el) = self.document.get_element_by_id("musicToggle") {
                el.set_text_content(Some(if on { "Music: ON" } else { "Music: OFF" }));
            }
            if let Some(el) = self.document.get_element_by_id("gameMusicToggle") {
                el.set_text_content(Some(if on { "🔊" } else { "🔇" }));
            }
        }

        fn is_running(&self) -> bool {
            self.game
                .as_ref()
                .is_some_and(|g| g.phase() == GamePhase::Running)
        }

        /// Build a fresh loop for the selected character and start it
        fn start(&mut self, now: f64) {
            let Some(area) = self.document.get_element_by_id("gameArea") else {
                log::error!("#gameArea missing");
                return;
            };
            let width = area.client_width() as f32;
            let height = area.client_height() as f32;
            let config = self.settings.tuning(self.tier, width, height);

            let mut game = match GameLoop::new(config, self.high_score.best()) {
                Ok(game) => game,
                Err(e) => {
                    log::error!("Cannot start run: {}", e);
                    return;
                }
            };

            self.presenter = None;
            match DomPresenter::new(self.document.clone(), area, self.settings.character, height) {
                Ok(presenter) => self.presenter = Some(presenter),
                Err(e) => log::error!("Failed to build game area: {:?}", e),
            }

            game.start(js_sys::Date::now() as u64, now);
            if let Some(presenter) = self.presenter.as_mut() {
                presenter.show_score(0);
                presenter.render(game.player(), game.obstacles());
            }
            self.game = Some(game);

            self.show_screen("gameScreen");
            self.audio.reset_run();
            self.audio.start_music();
        }

        fn pause(&mut self) {
            let paused = self.game.as_mut().is_some_and(|g| g.pause());
            if paused {
                self.audio.stop_music();
                self.show_screen("pauseScreen");
            }
        }

        fn resume(&mut self, now: f64) -> bool {
            let resumed = self.game.as_mut().is_some_and(|g| g.resume(now));
            if resumed {
                self.show_screen("gameScreen");
                self.audio.start_music();
            }
            resumed
        }

        fn quit_to_menu(&mut self) {
            if let Some(game) = self.game.as_mut() {
                game.return_to_menu();
            }
            self.audio.stop_music();
            self.show_screen("startScreen");
        }

        fn jump(&mut self) {
            if let Some(game) = self.game.as_mut() {
                game.request_jump();
            }
            self.dispatch_events();
        }

        fn dispatch_events(&mut self) {
            let Some(game) = self.game.as_mut() else { return };
            for event in game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::Scored { score } => {
                        if let Some(p) = self.presenter.as_mut() {
                            p.show_score(score);
                        }
                    }
                    GameEvent::GameOver { score, .. } => {
                        self.high_score.report(score);
                        self.audio.stop_music();
                    }
                    _ => {}
                }
            }
        }

        /// One animation frame; returns whether another frame is needed
        fn frame(&mut self, now: f64) -> bool {
            let Some(game) = self.game.as_mut() else {
                return false;
            };

            let outcome = game.tick(now);
            if matches!(outcome, TickOutcome::Continue | TickOutcome::GameOver) {
                if let Some(p) = self.presenter.as_mut() {
                    p.render(game.player(), game.obstacles());
                }
            }
            self.dispatch_events();

            let Some(game) = self.game.as_mut() else {
                return false;
            };
            match game.phase() {
                GamePhase::Running => true,
                GamePhase::Ended => match game.poll_game_over(now) {
                    Some(summary) => {
                        if let Some(p) = self.presenter.as_mut() {
                            p.show_game_over(&summary);
                        }
                        self.show_screen("gameOverScreen");
                        self.audio.play(SoundEffect::Dialogue);
                        false
                    }
                    None => true,
                },
                _ => false,
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_pending {
                return;
            }
            g.frame_pending = true;
        }
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let again = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;
            g.frame(time)
        };
        if again {
            request_animation_frame(game);
        }
    }

    fn on_click<F>(document: &Document, id: &str, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                handler();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "playButton", move || {
                game.borrow().show_screen("characterScreen");
            });
        }
        {
            let game = game.clone();
            on_click(document, "backButton", move || {
                game.borrow().show_screen("startScreen");
            });
        }
        {
            let game = game.clone();
            on_click(document, "restartButton", move || {
                game.borrow_mut().start(now_ms());
                request_animation_frame(game.clone());
            });
        }
        for id in ["menuButton", "quitButton"] {
            let game = game.clone();
            on_click(document, id, move || game.borrow_mut().quit_to_menu());
        }
        {
            let game = game.clone();
            on_click(document, "pauseButton", move || game.borrow_mut().pause());
        }
        {
            let game = game.clone();
            on_click(document, "resumeButton", move || {
                if game.borrow_mut().resume(now_ms()) {
                    request_animation_frame(game.clone());
                }
            });
        }
        for id in ["musicToggle", "gameMusicToggle"] {
            let game = game.clone();
            on_click(document, id, move || {
                let mut g = game.borrow_mut();
                let enabled = g.settings.toggle_music();
                g.settings.save();
                g.audio.set_enabled(enabled);
                if enabled && g.is_running() {
                    g.audio.start_music();
                }
                g.update_music_buttons();
            });
        }

        // Character selection starts the run
        let Ok(nodes) = document.query_selector_all(".character") else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
                continue;
            };
            let id = el
                .get_attribute("data-character")
                .and_then(|s| s.parse::<u8>().ok())
                .and_then(Character::new);
            let Some(character) = id else { continue };

            if character == game.borrow().settings.character {
                let _ = el.class_list().add_1("selected");
            }

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                {
                    let mut g = game.borrow_mut();
                    g.settings.character = character;
                    g.settings.save();
                    g.start(now_ms());
                }
                request_animation_frame(game.clone());
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Keyboard: Space jumps, Escape toggles pause
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        let mut g = game.borrow_mut();
                        if g.is_running() {
                            event.prevent_default();
                            g.jump();
                        }
                    }
                    "Escape" => {
                        event.prevent_default();
                        let phase = game.borrow().game.as_ref().map(|g| g.phase());
                        match phase {
                            Some(GamePhase::Running) => game.borrow_mut().pause(),
                            Some(GamePhase::Paused) => {
                                if game.borrow_mut().resume(now_ms()) {
                                    request_animation_frame(game.clone());
                                }
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            });
            let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap/click anywhere jumps (touch on mobile)
        let event_name = if game.borrow().tier.is_mobile() {
            "touchstart"
        } else {
            "click"
        };
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.is_running() {
                    event.prevent_default();
                    g.jump();
                }
            });
            let target = document
                .get_element_by_id("gameScreen")
                .map(|el| el.unchecked_into::<web_sys::EventTarget>())
                .unwrap_or_else(|| document.clone().unchecked_into());
            let _ = target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.is_running() {
                        g.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.is_running() {
                    g.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let tier = detect_tier(&user_agent);
        log::info!("Flappy Fire Pole starting... tier: {}", tier.as_str());

        let game = Rc::new(RefCell::new(Game::new(document.clone(), tier)));
        game.borrow().update_music_buttons();

        setup_buttons(&document, game.clone());
        setup_input_handlers(&document, game.clone());
        setup_auto_pause(&document, game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Longest headless run before giving up (about five minutes of play)
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_FRAMES: u32 = 5 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Fire Pole (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    if let Err(e) = run_headless(seed) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) -> Result<(), flappy_fire_pole::ConfigError> {
    use flappy_fire_pole::consts::{BASELINE_FRAME_MS, SETTLE_DELAY_MS};
    use flappy_fire_pole::platform::{HeadlessPresenter, Presenter};
    use flappy_fire_pole::sim::{GameEvent, GameLoop, TickOutcome, autopilot};
    use flappy_fire_pole::{DeviceTier, HighScore, Settings};

    let settings = Settings::load();
    let mut high_score = HighScore::load();
    let config = settings.tuning(DeviceTier::Desktop, 800.0, 600.0);
    let mut game = GameLoop::new(config, high_score.best())?;
    let mut presenter = HeadlessPresenter::default();

    let mut now = 0.0;
    game.start(seed, now);

    for _ in 0..MAX_DEMO_FRAMES {
        if autopilot::wants_jump(&game) {
            game.request_jump();
        }
        now += BASELINE_FRAME_MS;
        let outcome = game.tick(now);
        presenter.render(game.player(), game.obstacles());

        for event in game.drain_events() {
            match event {
                GameEvent::Scored { score } => presenter.show_score(score),
                GameEvent::Collision(kind) => log::info!("Collision: {:?}", kind),
                GameEvent::GameOver { score, .. } => {
                    high_score.report(score);
                }
                _ => {}
            }
        }

        if outcome == TickOutcome::GameOver {
            break;
        }
    }

    match game.poll_game_over(now + SETTLE_DELAY_MS) {
        Some(summary) => {
            presenter.show_game_over(&summary);
            println!(
                "Game over after {} frames: score {} (best {}{})",
                presenter.frames,
                summary.score,
                summary.high_score,
                if summary.new_record { ", new record" } else { "" }
            );
        }
        None => println!(
            "Autopilot still flying after {} frames with score {}",
            presenter.frames, presenter.score
        ),
    }

    Ok(())
}
