//! Particle bursts and decay
//!
//! Purely visual; nothing here affects health, score or distance.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::PARTICLE_GRAVITY;

/// Spawn `count` particles at `origin`, dropping the oldest past `max_particles`
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: u32,
    count: usize,
    max_particles: usize,
) {
    if max_particles == 0 {
        return;
    }

    for _ in 0..count {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 10.0,
            (rng.random::<f32>() - 0.5) * 10.0,
        );
        particles.push(Particle {
            pos: origin,
            vel,
            color,
            size: rng.random::<f32>() * 8.0 + 4.0,
            life: 1.0,
            decay: rng.random::<f32>() * 0.02 + 0.01,
        });
    }

    if particles.len() > max_particles {
        let excess = particles.len() - max_particles;
        particles.drain(..excess);
    }
}

/// Move, fall and fade every particle; remove the ones that burned out
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life -= particle.decay;
    }
    particles.retain(|p| p.life > 0.0);
}
