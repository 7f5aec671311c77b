//! Wall-clock spawning
//!
//! Spawn cadence is measured in elapsed milliseconds fed in by the driver,
//! independent of how many frames were rendered in between.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::consts::{OBSTACLE_SPAWN_Y, POWER_UP_SPAWN_Y};
use crate::lane_position;
use crate::settings::Settings;

/// Most intervals one `advance` call may fire; older backlog is dropped
pub const MAX_CATCH_UP: u32 = 4;

/// Repeating timer driven by externally supplied elapsed time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalTimer {
    pub interval_ms: f64,
    elapsed_ms: f64,
    armed: bool,
}

impl IntervalTimer {
    /// A disarmed timer; call `arm` to start counting
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
            armed: false,
        }
    }

    /// Start (or restart) counting from zero
    pub fn arm(&mut self) {
        self.elapsed_ms = 0.0;
        self.armed = true;
    }

    /// Stop firing; pending time is discarded
    pub fn cancel(&mut self) {
        self.elapsed_ms = 0.0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance by `dt_ms`, returning how many intervals completed
    ///
    /// Non-finite or non-positive time is ignored. At most `MAX_CATCH_UP`
    /// intervals fire per call.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        let valid_interval = self.interval_ms.is_finite() && self.interval_ms > 0.0;
        if !self.armed || !valid_interval || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let due = (self.elapsed_ms / self.interval_ms).floor();
        if due >= f64::from(MAX_CATCH_UP) {
            log::debug!("Spawn timer {} intervals behind, dropping backlog", due);
            self.elapsed_ms %= self.interval_ms;
            return MAX_CATCH_UP;
        }
        self.elapsed_ms -= due * self.interval_ms;
        due as u32
    }
}

/// The two independent spawn generators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacles: IntervalTimer,
    pub power_ups: IntervalTimer,
}

impl Spawner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            obstacles: IntervalTimer::new(settings.obstacle_interval_ms),
            power_ups: IntervalTimer::new(settings.power_up_interval_ms),
        }
    }

    pub fn arm(&mut self) {
        self.obstacles.arm();
        self.power_ups.arm();
    }

    pub fn cancel(&mut self) {
        self.obstacles.cancel();
        self.power_ups.cancel();
    }

    pub fn is_armed(&self) -> bool {
        self.obstacles.is_armed() || self.power_ups.is_armed()
    }

    /// Let `dt_ms` of wall-clock pass, appending whatever comes due.
    ///
    /// Time spent outside Playing is not counted.
    pub fn advance<R: Rng + ?Sized>(&mut self, state: &mut GameState, rng: &mut R, dt_ms: f64) {
        if state.phase != GamePhase::Playing {
            return;
        }
        for _ in 0..self.obstacles.advance(dt_ms) {
            spawn_obstacle(state, rng);
        }
        for _ in 0..self.power_ups.advance(dt_ms) {
            spawn_power_up(state, rng);
        }
    }
}

/// Append one obstacle of a uniformly random kind above the road
pub fn spawn_obstacle<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let kind: ObstacleKind = rng.random();
    let x = lane_position(rng.random::<f32>());
    let id = state.next_entity_id();
    log::trace!("Spawn {:?} #{} at x={:.0}", kind, id, x);
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos: Vec2::new(x, OBSTACLE_SPAWN_Y),
    });
}

/// Append one power-up of a uniformly random kind above the road
pub fn spawn_power_up<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let kind: PowerUpKind = rng.random();
    let x = lane_position(rng.random::<f32>());
    let id = state.next_entity_id();
    log::trace!("Spawn {:?} power-up #{} at x={:.0}", kind, id, x);
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(x, POWER_UP_SPAWN_Y),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LANE_MAX_X, LANE_MIN_X};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing(settings: &Settings) -> GameState {
        let mut state = GameState::new(settings);
        state.reset_for_run(settings);
        state
    }

    #[test]
    fn test_timer_fires_on_exact_interval() {
        let mut timer = IntervalTimer::new(1200.0);
        timer.arm();
        assert_eq!(timer.advance(1199.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(1199.0), 0);
        assert_eq!(timer.advance(1.0), 1);
    }

    #[test]
    fn test_timer_catches_up_after_long_gap() {
        let mut timer = IntervalTimer::new(1200.0);
        timer.arm();
        assert_eq!(timer.advance(3700.0), 3);
        assert_eq!(timer.advance(1100.0), 1);
    }

    #[test]
    fn test_timer_backlog_capped() {
        let mut timer = IntervalTimer::new(1200.0);
        timer.arm();
        assert_eq!(timer.advance(60_000.0), MAX_CATCH_UP);
        // Leftover is only the partial interval
        assert_eq!(timer.advance(1199.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(1e300), MAX_CATCH_UP);
    }

    #[test]
    fn test_timer_ignores_non_finite_time() {
        let mut timer = IntervalTimer::new(1200.0);
        timer.arm();
        assert_eq!(timer.advance(f64::NAN), 0);
        assert_eq!(timer.advance(f64::INFINITY), 0);
        assert_eq!(timer.advance(f64::NEG_INFINITY), 0);
        // Still counting normally afterwards
        assert_eq!(timer.advance(2400.0), 2);
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = IntervalTimer::new(1200.0);
        assert_eq!(timer.advance(10_000.0), 0);
        timer.arm();
        timer.advance(1000.0);
        timer.cancel();
        assert_eq!(timer.advance(10_000.0), 0);
        // Re-arming starts from zero
        timer.arm();
        assert_eq!(timer.advance(200.0), 0);
    }

    #[test]
    fn test_spawner_cadence() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut state = playing(&settings);
        let mut spawner = Spawner::new(&settings);
        spawner.arm();

        // 16ms frames for 12 seconds
        for _ in 0..750 {
            spawner.advance(&mut state, &mut rng, 16.0);
        }
        assert_eq!(state.obstacles.len(), 10);
        assert_eq!(state.power_ups.len(), 3);

        for obstacle in &state.obstacles {
            assert_eq!(obstacle.pos.y, -60.0);
            assert!(obstacle.pos.x >= LANE_MIN_X && obstacle.pos.x <= LANE_MAX_X);
        }
        for power_up in &state.power_ups {
            assert_eq!(power_up.pos.y, -50.0);
        }
    }

    #[test]
    fn test_no_spawns_outside_playing() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut state = GameState::new(&settings);
        let mut spawner = Spawner::new(&settings);
        spawner.arm();

        spawner.advance(&mut state, &mut rng, 10_000.0);
        assert!(state.obstacles.is_empty());

        state.phase = GamePhase::Lost;
        spawner.advance(&mut state, &mut rng, 10_000.0);
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_entity_ids_unique() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = playing(&settings);
        spawn_obstacle(&mut state, &mut rng);
        spawn_power_up(&mut state, &mut rng);
        spawn_obstacle(&mut state, &mut rng);
        assert_ne!(state.obstacles[0].id, state.obstacles[1].id);
        assert_ne!(state.obstacles[0].id, state.power_ups[0].id);
    }
}
