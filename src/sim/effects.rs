//! Bounded particle pool and local explosion flashes
//!
//! Purely cosmetic: nothing here feeds back into collision or scoring.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;

/// A short-lived visual effect token
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Elapsed life in seconds
    pub age: f32,
    pub ttl: f32,
    pub size: f32,
    pub color: [u8; 3],
}

impl Particle {
    /// Engine flame puff, biased backwards along the thrust direction
    pub fn flame(pos: Vec2, heading: Vec2, rng: &mut Pcg32) -> Self {
        let vel = -heading * rng.random_range(40.0..160.0)
            + Vec2::new(rng.random_range(-30.0..30.0), rng.random_range(-30.0..30.0));
        Self {
            pos,
            vel,
            age: 0.0,
            ttl: 0.32,
            size: rng.random_range(1.0..3.0),
            color: [255, 160 + rng.random_range(0..=80u8), 60],
        }
    }

    /// Muzzle spark kicked back from the ship's nose
    pub fn spark(pos: Vec2, heading: Vec2, rng: &mut Pcg32) -> Self {
        let vel = -heading * rng.random_range(60.0..220.0)
            + Vec2::new(rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0));
        Self {
            pos,
            vel,
            age: 0.0,
            ttl: 0.25,
            size: 1.0,
            color: [255, 255, 200],
        }
    }

    /// Explosion debris scattered uniformly around `pos`
    pub fn burst(
        pos: Vec2,
        spread: f32,
        ttl: f32,
        size: f32,
        color: [u8; 3],
        rng: &mut Pcg32,
    ) -> Self {
        let vel = Vec2::new(
            rng.random_range(-spread..spread),
            rng.random_range(-spread..spread),
        );
        Self {
            pos,
            vel,
            age: 0.0,
            ttl,
            size,
            color,
        }
    }

    /// Render alpha: 255 at birth fading linearly to 0 at expiry
    pub fn alpha(&self) -> u8 {
        (255.0 * (1.0 - self.age / self.ttl)).clamp(0.0, 255.0) as u8
    }
}

/// Integrate and age the pool, then enforce the hard cap. Survivors keep
/// insertion order; anything past the cap is dropped this frame.
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.age += dt;
        p.pos += p.vel * dt;
    }
    particles.retain(|p| p.age < p.ttl);
    particles.truncate(MAX_PARTICLES);
}

/// Localized explosion flash. The renderer derives radius and alpha from the
/// remaining fraction of its lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Flash {
    pub pos: Vec2,
    /// Remaining life in seconds
    pub ttl: f32,
    pub max_ttl: f32,
    pub radius: f32,
}

impl Flash {
    pub fn new(pos: Vec2, max_ttl: f32, radius: f32) -> Self {
        Self {
            pos,
            ttl: max_ttl,
            max_ttl,
            radius,
        }
    }

    /// Fraction of life remaining, 1 at birth to 0 at expiry
    pub fn fraction(&self) -> f32 {
        (self.ttl / self.max_ttl).clamp(0.0, 1.0)
    }

    /// The flash grows slightly as it fades
    pub fn current_radius(&self) -> f32 {
        self.radius * (1.0 + (1.0 - self.fraction()) * 0.5)
    }

    pub fn alpha(&self) -> u8 {
        (180.0 * self.fraction()) as u8
    }
}

pub fn update_flashes(flashes: &mut Vec<Flash>, dt: f32) {
    for f in flashes.iter_mut() {
        f.ttl -= dt;
    }
    flashes.retain(|f| f.ttl > 0.0);
}
