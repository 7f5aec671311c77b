//! Ambulance Dash - a top-down dodge-and-collect driving arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (update engine, collisions, spawning, session)
//! - `platform`: Input adapters and frame clock for the browser/native shell
//! - `settings`: Data-driven tuning and particle quality

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};
pub use sim::{GameEvent, GamePhase, Session, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration used for boost countdown (ms)
    pub const NOMINAL_FRAME_MS: f32 = 16.0;

    /// Road lane bounds for the vehicle's left edge
    pub const LANE_MIN_X: f32 = 220.0;
    pub const LANE_MAX_X: f32 = 540.0;
    /// Horizontal spread used for spawn positions
    pub const LANE_SPREAD: f32 = LANE_MAX_X - LANE_MIN_X;

    /// Vehicle defaults - fixed row near the bottom of the canvas
    pub const VEHICLE_START_X: f32 = 375.0;
    pub const VEHICLE_Y: f32 = 480.0;
    pub const VEHICLE_WIDTH: f32 = 60.0;
    pub const VEHICLE_HEIGHT: f32 = 90.0;
    /// Lateral velocity while a steering key is held
    pub const STEER_VELOCITY: f32 = 8.0;
    /// Per-tick velocity multiplier when no key is held
    pub const FRICTION: f32 = 0.9;

    /// Entities at or below this y have left the play band
    pub const PLAY_BAND_BOTTOM: f32 = 650.0;
    pub const OBSTACLE_SPAWN_Y: f32 = -60.0;
    pub const POWER_UP_SPAWN_Y: f32 = -50.0;

    /// Hitboxes
    pub const TRAFFIC_SIZE: (f32, f32) = (45.0, 75.0);
    pub const DEBRIS_SIZE: (f32, f32) = (50.0, 50.0); // rock + pothole
    pub const POWER_UP_SIZE: f32 = 40.0;

    /// Health / scoring
    pub const MAX_HEALTH: i32 = 100;
    pub const HIT_DAMAGE: i32 = 20;
    pub const HEAL_AMOUNT: i32 = 25;
    pub const PICKUP_SCORE: u64 = 50;

    /// Particle bursts
    pub const HIT_BURST_COUNT: usize = 15;
    pub const PICKUP_BURST_COUNT: usize = 10;
    /// Hit burst origin relative to vehicle x (absolute y)
    pub const HIT_BURST_OFFSET_X: f32 = 30.0;
    pub const HIT_BURST_Y: f32 = 500.0;
    /// Downward acceleration applied to particles each tick
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// Burst colors (0xRRGGBB)
    pub const COLOR_DAMAGE: u32 = 0xCC0000;
    pub const COLOR_BOOST: u32 = 0x00FF00;
}

/// Clamp a vehicle x coordinate to the drivable lane
#[inline]
pub fn clamp_to_lane(x: f32) -> f32 {
    x.clamp(consts::LANE_MIN_X, consts::LANE_MAX_X)
}

/// Map a unit sample in [0, 1) onto the spawnable lane span
#[inline]
pub fn lane_position(unit: f32) -> f32 {
    consts::LANE_MIN_X + unit * consts::LANE_SPREAD
}
