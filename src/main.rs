//! Plummet entry point
//!
//! Browser: wires DOM input into the simulation and runs the frame loop.
//! Native: plays a short headless session with a scripted pilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, PointerEvent};

    use plummet::consts::PLAYER_SIZE;
    use plummet::persistence::LocalStorage;
    use plummet::platform::{now_seconds, random_seed};
    use plummet::sim::{GamePhase, Snapshot, Viewport};
    use plummet::{Game, GameConfig, Key};

    /// Browser app: the game plus the DOM nodes it draws into
    struct App {
        game: Game,
        document: Document,
        /// Entity id -> DOM node
        nodes: HashMap<u32, HtmlElement>,
        // FPS tracking
        last_time: f64,
        fps: f64,
    }

    impl App {
        fn new(document: Document, viewport: Viewport) -> Self {
            let mut storage = LocalStorage::new();
            let config = GameConfig::load(&storage);
            // Write back normalized values so the stored copy is editable
            config.save(&mut storage);

            let seed = random_seed();
            log::info!("Game initialized with seed: {}", seed);

            Self {
                game: Game::new(config, viewport, seed, Box::new(storage)),
                document,
                nodes: HashMap::new(),
                last_time: 0.0,
                fps: 0.0,
            }
        }

        fn viewport(&self) -> Viewport {
            self.game.state.viewport
        }

        /// Screen pixel (y down) to world (y up)
        fn to_world(&self, x: f32, y: f32) -> Vec2 {
            Vec2::new(x, self.viewport().height - y)
        }

        fn update(&mut self, time_ms: f64) {
            if self.last_time > 0.0 {
                let dt = (time_ms - self.last_time) / 1000.0;
                if dt > 0.0 {
                    self.fps = 1.0 / dt;
                }
            }
            self.last_time = time_ms;

            self.game.frame(now_seconds());
        }

        fn render(&mut self) {
            let snapshot = self.game.snapshot(now_seconds());
            self.render_world(&snapshot);
            self.update_hud(&snapshot);
        }

        /// Position entity glyphs; create and drop nodes as the pool changes
        fn render_world(&mut self, snapshot: &Snapshot) {
            let Some(world) = self.document.get_element_by_id("world") else {
                return;
            };
            let height = self.viewport().height;

            let mut seen = Vec::with_capacity(snapshot.entities.len());
            for entity in &snapshot.entities {
                seen.push(entity.id);
                let node = match self.nodes.get(&entity.id) {
                    Some(node) => node.clone(),
                    None => {
                        let Some(node) = self.create_glyph(entity.glyph) else {
                            continue;
                        };
                        let _ = world.append_child(&node);
                        self.nodes.insert(entity.id, node.clone());
                        node
                    }
                };
                place(&node, entity.pos, height, entity.vx > 0.0, false);
            }

            self.nodes.retain(|id, node| {
                let keep = seen.contains(id);
                if !keep {
                    node.remove();
                }
                keep
            });

            if let Some(player) = self.element("player") {
                let visible = snapshot.phase == GamePhase::Running;
                let _ = player
                    .style()
                    .set_property("display", if visible { "block" } else { "none" });
                place(
                    &player,
                    snapshot.player.pos,
                    height,
                    snapshot.player.vel.x > 0.0,
                    snapshot.player.diving,
                );
            }
        }

        fn create_glyph(&self, glyph: &str) -> Option<HtmlElement> {
            let node = self
                .document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            node.set_class_name("entity");
            node.set_text_content(Some(glyph));
            Some(node)
        }

        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn show(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snapshot: &Snapshot) {
            let running = snapshot.phase == GamePhase::Running;
            let post_game = snapshot.phase == GamePhase::PostGame;

            self.show("hud", running || post_game);
            self.set_text("hud-score", &format!("Score: {}", snapshot.score.round()));
            if let Some(remaining) = snapshot.remaining_time {
                self.set_text("hud-time", &format!("{}s", remaining.round()));
            }
            self.show("hud-time", running);
            if self.game.state.config.lives > 1 {
                self.set_text("hud-lives", &"🦅".repeat(usize::from(snapshot.lives)));
            }

            if let Some(meter) = self.element("breath-meter") {
                let width = format!("{:.1}%", snapshot.breath_ratio * 100.0);
                let _ = meter.style().set_property("width", &width);
            }

            self.show("launch-screen", snapshot.phase == GamePhase::Idle);
            self.show("game-over", post_game);
            if post_game {
                self.set_text("end-reason", snapshot.end_reason.as_deref().unwrap_or_default());
            }
            if let Some(best) = snapshot.high_score {
                self.set_text("high-score", &format!("High score: {}", best.round()));
            }

            self.show("debug", snapshot.debug);
            if snapshot.debug {
                let p = &snapshot.player;
                let text = format!(
                    "fps  {:.0}\nx    {:.0}\ny    {:.0}\nvx   {:.0}\nvy   {:.0}\nmode {:?}",
                    self.fps, p.pos.x, p.pos.y, p.vel.x, p.vel.y, snapshot.control_mode
                );
                self.set_text("debug", &text);
            }
        }
    }

    /// Translate a glyph so its center sits on the world position
    fn place(node: &HtmlElement, pos: Vec2, height: f32, facing_right: bool, diving: bool) {
        let flip = if facing_right { 180 } else { 0 };
        let tilt = if diving { -45 } else { 0 };
        let transform = format!(
            "translate({}px, {}px) translate(-50%, -50%) rotateY({flip}deg) rotateZ({tilt}deg)",
            pos.x,
            height - pos.y
        );
        let style = node.style();
        let _ = style.set_property("transform", &transform);
        let _ = style.set_property("font-size", &format!("{PLAYER_SIZE}px"));
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Viewport::new(width as f32, height as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Plummet starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let app = Rc::new(RefCell::new(App::new(document, window_viewport(&window))));

        setup_input_handlers(&window, app.clone());
        setup_retry_button(app.clone());
        request_animation_frame(app);

        log::info!("Plummet running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    if key == Key::Space || key == Key::ArrowDown {
                        event.prevent_default();
                    }
                    app.borrow_mut().game.input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    app.borrow_mut().game.input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer (mouse and touch)
        let world = app.borrow().document.get_element_by_id("world");
        if let Some(world) = world {
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    let pos = a.to_world(event.client_x() as f32, event.client_y() as f32);
                    a.game.input.press_down(pos);
                });
                let _ = world
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    let mut a = app.borrow_mut();
                    let pos = a.to_world(event.client_x() as f32, event.client_y() as f32);
                    a.game.input.press_move(pos);
                });
                let _ = world
                    .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            for name in ["pointerup", "pointercancel", "pointerleave"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    app.borrow_mut().game.input.press_up();
                });
                let _ = world.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Window blur: held keys would otherwise stick
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.input.release_all();
                log::info!("Input released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    app.borrow_mut().game.resize(window_viewport(&window));
                }
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_retry_button(app: Rc<RefCell<App>>) {
        let btn = app.borrow().document.get_element_by_id("retry-btn");
        let Some(btn) = btn else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.stop_propagation();
            app.borrow_mut().game.retry();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }

        request_animation_frame(app);
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
    log::info!("Plummet (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one session at 60 fps with a simple pilot: dive under the nearest
/// fish, let go once something is caught.
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use plummet::platform::{default_storage, random_seed};
    use plummet::sim::{GamePhase, Transition, Viewport};
    use plummet::{Game, GameConfig, Key};

    const FRAME: f64 = 1.0 / 60.0;

    let seed = random_seed();
    let mut game = Game::new(
        GameConfig::default(),
        Viewport::new(1280.0, 720.0),
        seed,
        default_storage(),
    );
    log::info!("Headless session with seed {seed}");

    game.input.key_down(Key::Space);
    let mut now = 0.0;
    while game.state.phase != GamePhase::PostGame && now < 120.0 {
        let player = game.state.player.pos;
        let nearest_fish = game
            .state
            .entities
            .iter()
            .filter(|e| !e.is_enemy())
            .map(|e| e.pos.x - player.x)
            .min_by(|a, b| a.abs().total_cmp(&b.abs()));

        // Come up for air well before the breath limit
        let air_left = game.state.dive_start.is_none_or(|start| now - start < 1.5);
        let holding = game.state.caught.is_some();

        match nearest_fish {
            Some(dx) if !holding && air_left => {
                game.input.key_down(if dx < 0.0 { Key::ArrowLeft } else { Key::ArrowRight });
                game.input.key_down(Key::Space);
            }
            _ => {
                game.input.key_up(Key::Space);
                game.input.key_up(Key::ArrowLeft);
                game.input.key_up(Key::ArrowRight);
            }
        }

        for transition in game.frame(now) {
            match transition {
                Transition::Scored(points) => log::info!("Scored {points:.2}"),
                Transition::Ended { reason, score } => {
                    println!("Game over: {reason}. Final score {score:.1}");
                }
                _ => {}
            }
        }
        now += FRAME;
    }

    if let Some(best) = game.high_score() {
        println!("High score this process: {best:.1}");
    }
}
