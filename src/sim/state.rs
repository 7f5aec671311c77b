//! Game state and core simulation types
//!
//! Everything a renderer or HUD needs to observe lives here.

use glam::Vec2;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run started yet
    Idle,
    /// Active driving
    Playing,
    /// Run suspended by the shell
    Paused,
    /// Reached the hospital (terminal)
    Won,
    /// Health ran out (terminal)
    Lost,
}

impl GamePhase {
    /// Won or Lost: nothing advances until a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Pothole,
    Traffic,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Rock,
        ObstacleKind::Pothole,
        ObstacleKind::Traffic,
    ];

    /// Hitbox (width, height)
    pub fn size(&self) -> (f32, f32) {
        match self {
            ObstacleKind::Traffic => TRAFFIC_SIZE,
            ObstacleKind::Rock | ObstacleKind::Pothole => DEBRIS_SIZE,
        }
    }
}

impl Distribution<ObstacleKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ObstacleKind {
        ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary scroll speed multiplier
    Speed,
    /// Restores health
    Health,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Speed, PowerUpKind::Health];

    /// Burst color when collected
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Speed => COLOR_BOOST,
            PowerUpKind::Health => COLOR_DAMAGE,
        }
    }
}

impl Distribution<PowerUpKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PowerUpKind {
        PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]
    }
}

/// An obstacle scrolling down the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
}

impl Obstacle {
    pub fn hitbox(&self) -> Aabb {
        let (w, h) = self.kind.size();
        Aabb::new(self.pos, Vec2::new(w, h))
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
}

impl PowerUp {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(POWER_UP_SIZE))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(POWER_UP_SIZE / 2.0)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32, // 0xRRGGBB
    pub size: f32,
    pub life: f32,  // 0-1, decreases every tick
    pub decay: f32, // life lost per tick
}

/// The player's ambulance. Only x moves; the row is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub x: f32,
    pub vel: f32,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            x: VEHICLE_START_X,
            vel: 0.0,
        }
    }
}

impl Vehicle {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, VEHICLE_Y),
            Vec2::new(VEHICLE_WIDTH, VEHICLE_HEIGHT),
        )
    }

    /// Apply held steering (left wins over right) or coast with friction
    pub fn steer(&mut self, input: &TickInput) {
        if input.left {
            self.vel = -STEER_VELOCITY;
        } else if input.right {
            self.vel = STEER_VELOCITY;
        } else {
            // Asymptotic decay, never snapped to zero
            self.vel *= FRICTION;
        }
        self.x = crate::clamp_to_lane(self.x + self.vel);
    }
}

/// Held steering keys for a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Notable things that happened, drained by the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    ObstacleHit { kind: ObstacleKind, health: i32 },
    PowerUpCollected { kind: PowerUpKind },
    BoostExpired,
    Won { score: u64 },
    Lost { score: u64, distance: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Player health; dips below 0 only inside the tick that ends the run
    pub health: i32,
    /// Distance travelled toward `Settings::max_distance`
    pub distance: f32,
    /// Survival ticks plus pickup bonuses
    pub score: u64,
    /// Unboosted scroll speed
    pub speed: f32,
    /// Remaining boost time in ms (None = no boost)
    pub boost_ms: Option<f32>,
    /// Steering keys currently held
    pub input: TickInput,
    pub vehicle: Vehicle,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Full-screen damage overlay intensity (0-1)
    pub damage_flash: f32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state waiting for a start command
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: GamePhase::Idle,
            health: MAX_HEALTH,
            distance: 0.0,
            score: 0,
            speed: settings.base_speed,
            boost_ms: None,
            input: TickInput::default(),
            vehicle: Vehicle::default(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            damage_flash: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset all counters and enter Playing
    pub fn reset_for_run(&mut self, settings: &Settings) {
        *self = Self::new(settings);
        self.phase = GamePhase::Playing;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn boost_active(&self) -> bool {
        self.boost_ms.is_some()
    }

    /// Scroll speed for this tick (boosted or base)
    pub fn effective_speed(&self, settings: &Settings) -> f32 {
        if self.boost_active() {
            self.speed * settings.boost_multiplier
        } else {
            self.speed
        }
    }

    /// Health as shown to the HUD
    pub fn displayed_health(&self) -> i32 {
        self.health.clamp(0, MAX_HEALTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_steer_left_wins() {
        let mut vehicle = Vehicle::default();
        vehicle.steer(&TickInput {
            left: true,
            right: true,
        });
        assert_eq!(vehicle.vel, -STEER_VELOCITY);
        assert_eq!(vehicle.x, VEHICLE_START_X - STEER_VELOCITY);
    }

    #[test]
    fn test_friction_never_zeroes() {
        let mut vehicle = Vehicle {
            x: 300.0,
            vel: 8.0,
        };
        for _ in 0..50 {
            vehicle.steer(&TickInput::default());
        }
        assert!(vehicle.vel > 0.0);
        assert!(vehicle.vel < 0.1);
    }

    #[test]
    fn test_hitbox_sizes() {
        let traffic = Obstacle {
            id: 1,
            kind: ObstacleKind::Traffic,
            pos: Vec2::new(300.0, 10.0),
        };
        assert_eq!(traffic.hitbox().size, Vec2::new(45.0, 75.0));

        let pothole = Obstacle {
            id: 2,
            kind: ObstacleKind::Pothole,
            pos: Vec2::ZERO,
        };
        assert_eq!(pothole.hitbox().size, Vec2::new(50.0, 50.0));
        assert_eq!(Vehicle::default().hitbox().min, Vec2::new(375.0, 480.0));
    }

    #[test]
    fn test_kind_sampling_covers_all() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let kind: ObstacleKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));

        let mut speed = 0;
        for _ in 0..200 {
            if rng.random::<PowerUpKind>() == PowerUpKind::Speed {
                speed += 1;
            }
        }
        assert!(speed > 50 && speed < 150);
    }

    #[test]
    fn test_effective_speed() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings);
        assert_eq!(state.effective_speed(&settings), 5.0);
        state.boost_ms = Some(100.0);
        assert_eq!(state.effective_speed(&settings), 7.5);
    }
}
