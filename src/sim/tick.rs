//! Per-frame simulation tick
//!
//! One call advances the run by one display frame. Step order:
//! steer, scroll, obstacle hits, pickups, boost countdown, distance/score,
//! particles, then the terminal check (Lost before Won).

use rand::Rng;

use super::collision::{resolve_obstacle_hits, resolve_pickups};
use super::particle::update_particles;
use super::state::{GameEvent, GamePhase, GameState, TickInput};
use crate::consts::*;
use crate::settings::Settings;

/// Advance the game state by one frame
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut R,
    settings: &Settings,
) {
    // Only an active run moves
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    state.vehicle.steer(input);

    // Decay damage overlay
    state.damage_flash *= 0.9;
    if state.damage_flash < 0.01 {
        state.damage_flash = 0.0;
    }

    // Sampled once: a boost picked up this frame applies from the next one
    let speed = state.effective_speed(settings);
    scroll_entities(state, speed);

    resolve_obstacle_hits(state, rng, settings);
    resolve_pickups(state, rng, settings);

    tick_boost(state);

    state.distance = (state.distance + speed / 10.0).min(settings.max_distance);
    state.score += 1;

    update_particles(&mut state.particles);

    check_terminal(state, settings);
}

/// Move obstacles and power-ups down the road, dropping those past the band
fn scroll_entities(state: &mut GameState, speed: f32) {
    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.y += speed;
    }
    state.obstacles.retain(|o| o.pos.y < PLAY_BAND_BOTTOM);

    for power_up in state.power_ups.iter_mut() {
        power_up.pos.y += speed;
    }
    state.power_ups.retain(|p| p.pos.y < PLAY_BAND_BOTTOM);
}

/// Count down an active boost by one nominal frame
fn tick_boost(state: &mut GameState) {
    if let Some(remaining) = state.boost_ms {
        let remaining = remaining - NOMINAL_FRAME_MS;
        if remaining <= 0.0 {
            state.boost_ms = None;
            state.events.push(GameEvent::BoostExpired);
            log::debug!("Speed boost expired");
        } else {
            state.boost_ms = Some(remaining);
        }
    }
}

/// Enter Won/Lost if the run is over. Health is checked first.
fn check_terminal(state: &mut GameState, settings: &Settings) {
    if state.health <= 0 {
        state.health = 0;
        state.phase = GamePhase::Lost;
        let distance = state.distance.round().max(0.0) as u32;
        log::info!("Run lost: score {} at distance {}", state.score, distance);
        state.events.push(GameEvent::Lost {
            score: state.score,
            distance,
        });
    } else if state.distance >= settings.max_distance {
        state.phase = GamePhase::Won;
        log::info!("Run won: score {}", state.score);
        state.events.push(GameEvent::Won { score: state.score });
    }
}
