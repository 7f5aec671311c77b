//! Session: the command/observation boundary used by the UI shell
//!
//! The shell drives two clocks: `frame()` once per display frame and
//! `elapse(ms)` with wall-clock time for the spawners. A terminal transition
//! cancels the spawners before the call that caused it returns.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::spawn::Spawner;
use super::state::{GameEvent, GamePhase, GameState, Obstacle, Particle, PowerUp, TickInput};
use super::tick::tick;
use crate::settings::Settings;

/// Read-only view of a session for renderers and HUDs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub health: i32,
    pub distance: f32,
    pub max_distance: f32,
    pub score: u64,
    pub speed_boost_active: bool,
    pub damage_flash: f32,
    pub vehicle_x: f32,
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
}

/// One playable run plus its spawn schedule and random source
pub struct Session<R = Pcg32> {
    settings: Settings,
    state: GameState,
    spawner: Spawner,
    rng: R,
}

impl Session<Pcg32> {
    /// Create an idle session with a seeded PCG random source
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create an idle session drawing randomness from `rng`
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self {
            state: GameState::new(&settings),
            spawner: Spawner::new(&settings),
            settings,
            rng,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted setups and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// True while the spawn timers are running
    pub fn spawners_armed(&self) -> bool {
        self.spawner.is_armed()
    }

    /// Begin a run from Idle or a finished run. Ignored mid-run.
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Idle | GamePhase::Won | GamePhase::Lost => self.begin_run(),
            GamePhase::Playing | GamePhase::Paused => {
                log::debug!("start() ignored: run already in progress");
            }
        }
    }

    /// Reset everything and begin a fresh run from any phase
    pub fn restart(&mut self) {
        log::info!("Restarting run");
        self.begin_run();
    }

    fn begin_run(&mut self) {
        self.state.reset_for_run(&self.settings);
        self.spawner = Spawner::new(&self.settings);
        self.spawner.arm();
        self.state.events.push(GameEvent::Started);
        log::info!(
            "Run started: {} to go at base speed {}",
            self.settings.max_distance,
            self.settings.base_speed
        );
    }

    /// Update held steering keys. Ignored unless Playing.
    pub fn set_input(&mut self, left: bool, right: bool) {
        if self.state.phase != GamePhase::Playing {
            log::trace!("set_input ignored in {:?}", self.state.phase);
            return;
        }
        self.state.input = TickInput { left, right };
    }

    /// Playing <-> Paused. Ignored in other phases.
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Playing => {
                self.state.input = TickInput::default();
                GamePhase::Paused
            }
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Advance one display frame
    pub fn frame(&mut self) {
        let input = self.state.input;
        tick(&mut self.state, &input, &mut self.rng, &self.settings);
        self.teardown_if_finished();
    }

    /// Let wall-clock time pass for the spawners
    pub fn elapse(&mut self, dt_ms: f64) {
        self.spawner.advance(&mut self.state, &mut self.rng, dt_ms);
    }

    fn teardown_if_finished(&mut self) {
        if self.state.phase.is_terminal() && self.spawner.is_armed() {
            self.spawner.cancel();
            self.state.input = TickInput::default();
            log::debug!("Spawners stopped after {:?}", self.state.phase);
        }
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            health: state.displayed_health(),
            distance: state.distance.max(0.0),
            max_distance: self.settings.max_distance,
            score: state.score,
            speed_boost_active: state.boost_active(),
            damage_flash: state.damage_flash,
            vehicle_x: state.vehicle.x,
            obstacles: &state.obstacles,
            power_ups: &state.power_ups,
            particles: &state.particles,
        }
    }
}
