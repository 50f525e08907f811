//! Vector Rocks - a touch-controlled Asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//!
//! Rendering, audio playback, and raw touch capture are external
//! collaborators. The embedder polls its input devices into a
//! [`sim::TickInput`], calls [`sim::tick`] once per frame, draws from the
//! [`sim::RenderSnapshot`] the core hands back, and plays whatever
//! [`sim::GameEvent`]s the frame produced.

pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the per-tick damping factors were tuned at
    pub const NOMINAL_FPS: f32 = 60.0;
    /// Largest dt fed to one simulation step (guards against stalls and
    /// device sleep producing a huge catch-up step)
    pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;

    /// Ship collision radius
    pub const SHIP_RADIUS: f32 = 13.0;
    /// Forward thrust at full stick deflection (units/s²)
    pub const SHIP_THRUST: f32 = 200.0;
    pub const SHIP_MAX_SPEED: f32 = 480.0;
    /// Heading interpolation rate (fraction of the remaining turn per second)
    pub const SHIP_TURN_RATE: f32 = 12.0;
    /// Per-tick velocity damping at 60 Hz
    pub const SHIP_FRICTION: f32 = 0.997;
    /// Extra per-tick damping when the stick opposes the heading
    pub const SHIP_BRAKE: f32 = 0.995;
    /// Distance from ship center to the nose (bullet muzzle, flame tail)
    pub const SHIP_NOSE_OFFSET: f32 = 14.0;
    pub const STEER_DEADZONE: f32 = 0.12;
    pub const RESPAWN_DELAY: f32 = 0.8;
    pub const RESPAWN_INVULN: f32 = 2.0;

    /// Bullet muzzle speed relative to the ship (units/s)
    pub const BULLET_SPEED: f32 = 680.0;
    pub const BULLET_LIFETIME: f32 = 1.1;
    /// Minimum time between shots while auto-firing
    pub const FIRE_INTERVAL: f32 = 0.12;

    /// Asteroid speed range at level 1; each level-up raises both bounds by
    /// 2% up to the caps
    pub const ASTEROID_BASE_MIN_SPEED: f32 = 28.0;
    pub const ASTEROID_BASE_MAX_SPEED: f32 = 110.0;
    pub const ASTEROID_MIN_SPEED_CAP: f32 = 120.0;
    pub const ASTEROID_MAX_SPEED_CAP: f32 = 220.0;
    pub const LEVEL_SPEED_GROWTH: f32 = 0.02;
    /// Wave spawns this close to the ship are re-rolled once
    pub const SAFE_SPAWN_DISTANCE: f32 = 120.0;

    /// Hard cap on live particles
    pub const MAX_PARTICLES: usize = 350;

    /// Shield active window and recharge, both in seconds
    pub const SHIELD_DURATION: f32 = 3.0;
    pub const SHIELD_COOLDOWN: f32 = 8.0;
    /// Halo radius as a multiple of the ship radius
    pub const SHIELD_HALO_SCALE: f32 = 2.6;

    /// Combo streak resets after this many seconds without a kill
    pub const COMBO_TIMEOUT: f32 = 2.2;
    /// Bonus per kill: base * rate * combo-before-this-kill
    pub const COMBO_BONUS_RATE: f32 = 0.1;
    /// Bonus life every time the score crosses this tracked threshold
    pub const EXTRA_LIFE_STEP: u64 = 10_000;

    pub const STARTING_LIVES: u32 = 3;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a heading angle
#[inline]
pub fn angle_to_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap a position into the `[0, w) × [0, h)` toroidal field
#[inline]
pub fn wrap_position(pos: Vec2, w: f32, h: f32) -> Vec2 {
    Vec2::new(pos.x.rem_euclid(w), pos.y.rem_euclid(h))
}
