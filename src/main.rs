//! Ambulance Dash entry point
//!
//! Browser builds export a `Game` handle for the page script; native builds
//! run a headless autopilot drive and print the outcome.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    use ambulance_dash::platform::{FrameClock, Keyboard, SwipeTracker};
    use ambulance_dash::sim::TickInput;
    use ambulance_dash::{GamePhase, Session, Settings};

    /// Game instance owned by the page script
    #[wasm_bindgen]
    pub struct Game {
        session: Session,
        clock: FrameClock,
        keyboard: Keyboard,
        swipe: SwipeTracker,
    }

    #[wasm_bindgen]
    impl Game {
        #[wasm_bindgen(constructor)]
        pub fn new(settings_json: Option<String>) -> Game {
            let settings = settings_json
                .as_deref()
                .map(Settings::from_json_or_default)
                .unwrap_or_default();
            let seed = js_sys::Date::now() as u64;
            log::info!("Ambulance Dash ready (seed {seed})");
            Game {
                session: Session::new(settings, seed),
                clock: FrameClock::new(),
                keyboard: Keyboard::default(),
                swipe: SwipeTracker::default(),
            }
        }

        pub fn start(&mut self) {
            self.release_inputs();
            self.session.start();
        }

        pub fn restart(&mut self) {
            self.release_inputs();
            self.session.restart();
        }

        pub fn toggle_pause(&mut self) {
            self.release_inputs();
            self.session.toggle_pause();
        }

        pub fn on_key_down(&mut self, event: &KeyboardEvent) {
            let playing = self.playing();
            if self.keyboard.key_down(&event.key(), playing) {
                event.prevent_default();
            }
        }

        pub fn on_key_up(&mut self, event: &KeyboardEvent) {
            self.keyboard.key_up(&event.key());
        }

        pub fn on_touch_start(&mut self, event: &TouchEvent) {
            if let Some(touch) = event.touches().get(0) {
                let playing = self.playing();
                self.swipe.touch_start(touch.client_x() as f32, playing);
            }
        }

        pub fn on_touch_move(&mut self, event: &TouchEvent) {
            if let Some(touch) = event.touches().get(0) {
                let playing = self.playing();
                self.swipe.touch_move(touch.client_x() as f32, playing);
            }
        }

        pub fn on_touch_end(&mut self) {
            self.swipe.touch_end();
        }

        /// requestAnimationFrame callback body
        pub fn frame(&mut self, now_ms: f64) {
            let dt = self.clock.delta(now_ms);
            let keys = self.keyboard.held();
            let touch = self.swipe.held();
            let input = TickInput {
                left: keys.left || touch.left,
                right: keys.right || touch.right,
            };
            self.session.set_input(input.left, input.right);
            self.session.elapse(dt);
            self.session.frame();
        }

        /// Current world state for the renderer and HUD
        pub fn snapshot_json(&self) -> String {
            serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|e| {
                log::error!("Snapshot serialization failed: {e}");
                String::from("{}")
            })
        }

        /// Events since the last call (Started, ObstacleHit, Won, Lost, ...)
        pub fn drain_events_json(&mut self) -> String {
            let events = self.session.drain_events();
            serde_json::to_string(&events).unwrap_or_else(|e| {
                log::error!("Event serialization failed: {e}");
                String::from("[]")
            })
        }
    }

    impl Game {
        fn playing(&self) -> bool {
            self.session.phase() == GamePhase::Playing
        }

        fn release_inputs(&mut self) {
            self.keyboard.release_all();
            self.swipe.touch_end();
            self.clock.reset();
        }
    }

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ambulance_dash::{GameEvent, QualityPreset, Session};

    env_logger::init();
    log::info!("Ambulance Dash (native) starting headless drive...");

    // ambulance-dash [settings.json|-] [seed] [low|medium|high]
    let mut args = std::env::args().skip(1);
    let mut settings = load_settings(args.next().as_deref().filter(|p| *p != "-"));
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    if let Some(arg) = args.next() {
        match QualityPreset::parse(&arg) {
            Some(quality) => settings.quality = quality,
            None => log::warn!(
                "Unknown quality preset {arg:?}, keeping {}",
                settings.quality.as_str()
            ),
        }
    }

    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings: {json}"),
        Err(e) => log::warn!("Could not serialize settings: {e}"),
    }

    let mut session = Session::new(settings, seed);
    session.start();

    // ~60 Hz display frames, capped at ten minutes of driving
    const FRAME_MS: f64 = 1000.0 / 60.0;
    for _ in 0..36_000 {
        let (left, right) = autopilot(&session);
        session.set_input(left, right);
        session.elapse(FRAME_MS);
        session.frame();
        if session.phase().is_terminal() {
            break;
        }
    }

    for event in session.drain_events() {
        match event {
            GameEvent::Won { score } => println!("Reached the hospital! Score: {score}"),
            GameEvent::Lost { score, distance } => {
                println!("Ambulance wrecked at {distance}m. Score: {score}")
            }
            GameEvent::ObstacleHit { kind, health } => {
                log::info!("Hit {:?}, health {}", kind, health)
            }
            other => log::debug!("{:?}", other),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: Option<&str>) -> ambulance_dash::Settings {
    use ambulance_dash::Settings;

    let Some(path) = path else {
        return Settings::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Settings::from_json_or_default(&json),
        Err(e) => {
            log::warn!("Could not read settings from {path}: {e}");
            Settings::default()
        }
    }
}

/// Steer away from obstacles closing in on the ambulance, else toward pickups
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(session: &ambulance_dash::Session) -> (bool, bool) {
    use ambulance_dash::consts::*;

    let snapshot = session.snapshot();
    let car_left = snapshot.vehicle_x;
    let car_center = car_left + VEHICLE_WIDTH / 2.0;
    let margin = 15.0;

    let threat = snapshot
        .obstacles
        .iter()
        .filter(|o| o.pos.y > VEHICLE_Y - 250.0 && o.pos.y < VEHICLE_Y + VEHICLE_HEIGHT)
        .filter(|o| {
            let (w, _) = o.kind.size();
            o.pos.x < car_left + VEHICLE_WIDTH + margin && o.pos.x + w > car_left - margin
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(obstacle) = threat {
        let (w, _) = obstacle.kind.size();
        let go_right = obstacle.pos.x + w / 2.0 < car_center;
        return match (go_right, car_left) {
            (true, x) if x >= LANE_MAX_X => (true, false),
            (false, x) if x <= LANE_MIN_X => (false, true),
            (true, _) => (false, true),
            (false, _) => (true, false),
        };
    }

    let target = snapshot
        .power_ups
        .iter()
        .filter(|p| p.pos.y < VEHICLE_Y + VEHICLE_HEIGHT)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match target {
        Some(p) if p.center().x < car_center - STEER_VELOCITY => (true, false),
        Some(p) if p.center().x > car_center + STEER_VELOCITY => (false, true),
        _ => (false, false),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
