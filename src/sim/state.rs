//! Game state and core simulation types
//!
//! Everything gameplay-visible lives here. `tick` mutates it, the collision
//! pass scores it, and the snapshot module borrows it for rendering.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::effects::{Flash, Particle};
use crate::consts::*;
use crate::{angle_to_vec, normalize_angle, wrap_position};

/// Asteroid size class. Larger rocks are slower and worth fewer points;
/// destroying one spawns two of the next tier down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Small,
    Medium,
    Large,
}

impl Tier {
    /// Size rank: 1 = small, 3 = large
    pub fn rank(self) -> u32 {
        match self {
            Tier::Small => 1,
            Tier::Medium => 2,
            Tier::Large => 3,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            Tier::Small => 18.0,
            Tier::Medium => 34.0,
            Tier::Large => 56.0,
        }
    }

    /// Points before the combo bonus: 10 for large, 30 for small
    pub fn base_score(self) -> u64 {
        (10 * (4 - self.rank())) as u64
    }

    /// The tier fragments shrink to, `None` for the smallest
    pub fn split(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }

    /// Smaller rocks drift faster than the one they came from
    pub fn speed_scale(self) -> f32 {
        1.0 + (3 - self.rank()) as f32 * 0.15
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading angle in radians
    pub angle: f32,
    pub dead: bool,
    /// Post-respawn grace period, seconds remaining
    pub invulnerable: f32,
}

impl Ship {
    pub fn new(field: Vec2) -> Self {
        Self {
            pos: field * 0.5,
            vel: Vec2::ZERO,
            angle: -FRAC_PI_2,
            dead: false,
            invulnerable: 0.0,
        }
    }

    /// Back to the field center with a fresh invulnerability window
    pub fn respawn(&mut self, field: Vec2) {
        self.pos = field * 0.5;
        self.vel = Vec2::ZERO;
        self.angle = -FRAC_PI_2;
        self.dead = false;
        self.invulnerable = RESPAWN_INVULN;
    }

    /// Steer, thrust, damp, integrate, and wrap. `steer` is the normalized
    /// joystick vector (clamped here, never rejected); flame particles from
    /// the engine go into `particles`.
    pub fn update(
        &mut self,
        dt: f32,
        steer: Vec2,
        particles: &mut Vec<Particle>,
        rng: &mut Pcg32,
        field: Vec2,
    ) {
        let steer = steer.clamp_length_max(1.0);
        let mag = steer.length();
        if mag > STEER_DEADZONE {
            // Shortest angular path toward where the stick points, with the
            // nose 90° off the stick axis so "up" means thrust upward
            let target = steer.y.atan2(steer.x) + FRAC_PI_2;
            let diff = normalize_angle(target - self.angle);
            self.angle += diff * (SHIP_TURN_RATE * dt).min(1.0);

            let heading = angle_to_vec(self.angle);
            self.vel += heading * SHIP_THRUST * mag * dt;

            let tail = self.pos - heading * SHIP_NOSE_OFFSET;
            for _ in 0..3 {
                particles.push(Particle::flame(tail, heading, rng));
            }

            // Brake feel when the stick opposes the current heading
            if steer.dot(heading) < -0.25 {
                self.vel *= SHIP_BRAKE.powf(dt * NOMINAL_FPS);
            }
        }

        self.vel *= SHIP_FRICTION.powf(dt * NOMINAL_FPS);
        self.vel = self.vel.clamp_length_max(SHIP_MAX_SPEED);
        self.pos = wrap_position(self.pos + self.vel * dt, field.x, field.y);

        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }
    }

    /// Blink policy: while invulnerable the ship is visible on alternating
    /// ~1/12 s slots (≈6 Hz flicker)
    pub fn visible(&self) -> bool {
        !self.dead && (self.invulnerable <= 0.0 || (self.invulnerable * 6.0) as i32 % 2 == 0)
    }
}

/// A fired projectile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Elapsed life in seconds
    pub age: f32,
}

impl Bullet {
    /// Integrate and wrap; returns false once the lifetime is spent.
    /// Bullets wrap like everything else, they never despawn at an edge.
    pub fn update(&mut self, dt: f32, field: Vec2) -> bool {
        self.age += dt;
        self.pos = wrap_position(self.pos + self.vel * dt, field.x, field.y);
        self.age < BULLET_LIFETIME
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tier: Tier,
    pub radius: f32,
    /// Current rotation angle
    pub angle: f32,
    /// Rotation rate in radians/s
    pub rot_rate: f32,
    /// Local outline vertices, generated once at creation; the renderer
    /// rotates them by `angle` each frame, they are never regenerated
    pub silhouette: Vec<Vec2>,
}

impl Asteroid {
    /// Large asteroid entering from a random field edge
    pub fn spawn_edge(field: Vec2, bounds: (f32, f32), rng: &mut Pcg32) -> Self {
        let pos = match rng.random_range(0..4u8) {
            0 => Vec2::new(-10.0, rng.random_range(0.0..field.y)),
            1 => Vec2::new(field.x + 10.0, rng.random_range(0.0..field.y)),
            2 => Vec2::new(rng.random_range(0.0..field.x), -10.0),
            _ => Vec2::new(rng.random_range(0.0..field.x), field.y + 10.0),
        };
        Self::new(wrap_position(pos, field.x, field.y), Tier::Large, bounds, rng)
    }

    /// Fragment spawned where its parent broke apart
    pub fn fragment(pos: Vec2, tier: Tier, bounds: (f32, f32), rng: &mut Pcg32) -> Self {
        Self::new(pos, tier, bounds, rng)
    }

    fn new(pos: Vec2, tier: Tier, bounds: (f32, f32), rng: &mut Pcg32) -> Self {
        let heading = rng.random_range(0.0..TAU);
        let speed = rng.random_range(bounds.0..bounds.1) * tier.speed_scale();
        let radius = tier.radius();
        Self {
            pos,
            vel: angle_to_vec(heading) * speed,
            tier,
            radius,
            angle: rng.random_range(0.0..TAU),
            rot_rate: rng.random_range(-1.0..1.0),
            silhouette: gen_silhouette(radius, rng),
        }
    }

    pub fn update(&mut self, dt: f32, field: Vec2) {
        self.angle += self.rot_rate * dt;
        self.pos = wrap_position(self.pos + self.vel * dt, field.x, field.y);
    }
}

/// Jagged outline: at least six vertices, radius perturbed per vertex
fn gen_silhouette(radius: f32, rng: &mut Pcg32) -> Vec<Vec2> {
    let steps = ((radius / 4.0) as usize + 3).max(6);
    (0..steps)
        .map(|i| {
            let a = i as f32 / steps as f32 * TAU;
            angle_to_vec(a) * (radius * rng.random_range(0.7..1.12))
        })
        .collect()
}

/// Shield ability state machine: Ready → Active → Cooldown → Ready.
/// Activation anywhere but Ready is a no-op, so the shield can never be
/// active while the cooldown is still running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shield {
    Ready,
    Active { remaining: f32 },
    Cooldown { remaining: f32 },
}

impl Shield {
    pub fn is_active(self) -> bool {
        matches!(self, Shield::Active { .. })
    }

    pub fn is_ready(self) -> bool {
        matches!(self, Shield::Ready)
    }

    /// Returns whether activation actually happened
    pub fn activate(&mut self) -> bool {
        if self.is_ready() {
            *self = Shield::Active {
                remaining: SHIELD_DURATION,
            };
            true
        } else {
            false
        }
    }

    /// Advance timers. The cooldown is measured from the moment the active
    /// window runs out, not from activation.
    pub fn tick(&mut self, dt: f32) {
        match self {
            Shield::Ready => {}
            Shield::Active { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *self = Shield::Cooldown {
                        remaining: SHIELD_COOLDOWN,
                    };
                }
            }
            Shield::Cooldown { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *self = Shield::Ready;
                }
            }
        }
    }

    /// HUD label
    pub fn status_label(self) -> String {
        match self {
            Shield::Ready => "READY".into(),
            Shield::Active { .. } => "ACTIVE".into(),
            Shield::Cooldown { remaining } => format!("CHARGING {}s", remaining.ceil() as u32),
        }
    }
}

/// Discrete triggers for the audio collaborator, queued during the frame and
/// drained by the embedder afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    AsteroidDestroyed,
    ShieldActivated,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Field dimensions; both axes wrap
    pub field: Vec2,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub flashes: Vec<Flash>,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Consecutive-kill streak
    pub combo: u32,
    /// Seconds until the streak resets
    pub combo_timer: f32,
    pub shield: Shield,
    /// False until the first fire input (attract screen)
    pub started: bool,
    pub paused: bool,
    /// Seconds until the next shot is allowed
    pub shot_cooldown: f32,
    /// Countdown to respawn after the ship is destroyed
    pub respawn_timer: Option<f32>,
    /// Score at which the next bonus life is granted. Tracked, not derived
    /// via modulo, so a jump past the threshold still grants exactly once.
    pub next_extra_life: u64,
    /// Session-owned asteroid speed range, raised on each level-up
    pub speed_min: f32,
    pub speed_max: f32,
    /// Elapsed simulated time in seconds
    pub time: f32,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// New session on a `field_w × field_h` field, with the first wave
    /// already drifting in from the edges
    pub fn new(seed: u64, field_w: f32, field_h: f32) -> Self {
        let field = Vec2::new(field_w, field_h);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            ship: Ship::new(field),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            particles: Vec::new(),
            flashes: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            combo: 0,
            combo_timer: 0.0,
            shield: Shield::Ready,
            started: false,
            paused: false,
            shot_cooldown: 0.0,
            respawn_timer: None,
            next_extra_life: EXTRA_LIFE_STEP,
            speed_min: ASTEROID_BASE_MIN_SPEED,
            speed_max: ASTEROID_BASE_MAX_SPEED,
            time: 0.0,
            events: Vec::new(),
        };
        state.spawn_wave();
        state
    }

    /// Spawn `2 + level` large asteroids at the field edges, re-rolling once
    /// any spawn that lands inside the ship's safe radius
    pub fn spawn_wave(&mut self) {
        let count = 2 + self.level;
        for _ in 0..count {
            let bounds = (self.speed_min, self.speed_max);
            let mut rock = Asteroid::spawn_edge(self.field, bounds, &mut self.rng);
            if rock.pos.distance(self.ship.pos) < SAFE_SPAWN_DISTANCE {
                rock = Asteroid::spawn_edge(self.field, bounds, &mut self.rng);
            }
            self.asteroids.push(rock);
        }
    }

    pub fn game_over(&self) -> bool {
        self.lives == 0
    }

    /// Drain the audio triggers queued since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
