//! Collision detection and response
//!
//! Axis-aligned boxes only: the ambulance, obstacles and power-ups are all
//! upright rectangles. Obstacles are resolved before power-ups.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::spawn_burst;
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::consts::*;
use crate::settings::Settings;

/// Axis-aligned bounding box (top-left + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only touch edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Remove every obstacle touching the vehicle, applying damage for each.
///
/// Returns the number of hits this tick.
pub fn resolve_obstacle_hits<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    settings: &Settings,
) -> usize {
    let vehicle_box = state.vehicle.hitbox();
    let mut hits = Vec::new();
    state.obstacles.retain(|obstacle| {
        if vehicle_box.overlaps(&obstacle.hitbox()) {
            hits.push(obstacle.kind);
            false
        } else {
            true
        }
    });

    for kind in &hits {
        state.health -= HIT_DAMAGE;
        state.damage_flash = 1.0;
        let origin = Vec2::new(state.vehicle.x + HIT_BURST_OFFSET_X, HIT_BURST_Y);
        spawn_burst(
            &mut state.particles,
            rng,
            origin,
            COLOR_DAMAGE,
            HIT_BURST_COUNT,
            settings.max_particles(),
        );
        log::debug!("Hit {:?}, health now {}", kind, state.health);
        state.events.push(GameEvent::ObstacleHit {
            kind: *kind,
            health: state.health,
        });
    }

    hits.len()
}

/// Collect every power-up touching the vehicle.
///
/// Returns the number of pickups this tick.
pub fn resolve_pickups<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    settings: &Settings,
) -> usize {
    let vehicle_box = state.vehicle.hitbox();
    let mut collected = Vec::new();
    state.power_ups.retain(|power_up| {
        if vehicle_box.overlaps(&power_up.hitbox()) {
            collected.push((power_up.kind, power_up.center()));
            false
        } else {
            true
        }
    });

    for (kind, center) in &collected {
        match kind {
            PowerUpKind::Speed => {
                // Replaces any running boost rather than extending it
                state.boost_ms = Some(settings.boost_duration_ms);
            }
            PowerUpKind::Health => {
                state.health = (state.health + HEAL_AMOUNT).min(MAX_HEALTH);
            }
        }
        state.score += PICKUP_SCORE;
        spawn_burst(
            &mut state.particles,
            rng,
            *center,
            kind.color(),
            PICKUP_BURST_COUNT,
            settings.max_particles(),
        );
        log::debug!("Collected {:?} power-up", kind);
        state.events.push(GameEvent::PowerUpCollected { kind: *kind });
    }

    collected.len()
}
