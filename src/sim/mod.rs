//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Nominal per-frame steps, wall-clock time only for spawning
//! - Injected RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod particle;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_obstacle_hits, resolve_pickups};
pub use particle::{spawn_burst, update_particles};
pub use session::{Session, Snapshot};
pub use spawn::{IntervalTimer, Spawner, spawn_obstacle, spawn_power_up};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Particle, PowerUp, PowerUpKind,
    TickInput, Vehicle,
};
pub use tick::tick;
