//! Collision detection, asteroid splitting, and scoring
//!
//! Removals are deferred: hits are marked by index during the pass and the
//! collections are compacted afterwards, so no pair is skipped or processed
//! twice. Fragments spawn only after the pass.

use glam::Vec2;

use super::effects::{Flash, Particle};
use super::state::{Asteroid, GameEvent, GameState, Tier};
use crate::consts::*;

/// Circle proximity test
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// One full collision pass: bullet × asteroid, then ship × asteroid
/// (shielded rocks die, unshielded contact kills the ship).
pub fn resolve_collisions(state: &mut GameState) {
    let mut dead_bullets: Vec<usize> = Vec::new();
    let mut dead_asteroids: Vec<usize> = Vec::new();

    // Bullet hits. Each bullet is spent on the first rock it touches.
    for (bi, bullet) in state.bullets.iter().enumerate() {
        for (ai, rock) in state.asteroids.iter().enumerate() {
            if dead_asteroids.contains(&ai) {
                continue;
            }
            if within(bullet.pos, rock.pos, rock.radius) {
                dead_bullets.push(bi);
                dead_asteroids.push(ai);
                break;
            }
        }
    }

    if !state.ship.dead {
        if state.shield.is_active() {
            // The halo is area denial: anything it touches dies like a kill
            for (ai, rock) in state.asteroids.iter().enumerate() {
                if dead_asteroids.contains(&ai) {
                    continue;
                }
                if within(state.ship.pos, rock.pos, rock.radius + SHIP_RADIUS) {
                    dead_asteroids.push(ai);
                }
            }
        } else if state.ship.invulnerable <= 0.0 && !state.game_over() {
            // Hull hits are slightly forgiving (-5 on the combined radius)
            let hit = state.asteroids.iter().enumerate().any(|(ai, rock)| {
                !dead_asteroids.contains(&ai)
                    && within(state.ship.pos, rock.pos, rock.radius + SHIP_RADIUS - 5.0)
            });
            if hit {
                destroy_ship(state);
            }
        }
    }

    // Compact, highest index first so earlier indices stay valid
    dead_bullets.sort_unstable_by(|a, b| b.cmp(a));
    for bi in dead_bullets {
        state.bullets.remove(bi);
    }

    dead_asteroids.sort_unstable_by(|a, b| b.cmp(a));
    let destroyed: Vec<Asteroid> = dead_asteroids
        .into_iter()
        .map(|ai| state.asteroids.remove(ai))
        .collect();

    for rock in destroyed {
        split_asteroid(state, rock.pos, rock.tier);
    }
}

/// Score a destroyed asteroid and spawn its fragments. Large and medium
/// rocks break into two of the next tier down; small rocks just vanish.
pub fn split_asteroid(state: &mut GameState, pos: Vec2, tier: Tier) {
    state.flashes.push(Flash::new(pos, 0.16, (tier.radius() * 1.2).max(36.0)));
    for _ in 0..18 {
        state.particles.push(Particle::burst(
            pos,
            160.0,
            0.9,
            2.0,
            [255, 180, 80],
            &mut state.rng,
        ));
    }

    let base = tier.base_score();
    let bonus = (base as f32 * COMBO_BONUS_RATE * state.combo as f32).floor() as u64;
    state.score += base + bonus;
    state.combo += 1;
    state.combo_timer = COMBO_TIMEOUT;

    if state.score >= state.next_extra_life {
        state.lives += 1;
        state.next_extra_life += EXTRA_LIFE_STEP;
        log::info!("extra life at {} points, now {}", state.score, state.lives);
    }

    if let Some(child) = tier.split() {
        let bounds = (state.speed_min, state.speed_max);
        for _ in 0..2 {
            state
                .asteroids
                .push(Asteroid::fragment(pos, child, bounds, &mut state.rng));
        }
    }

    state.events.push(GameEvent::AsteroidDestroyed);
}

/// Unshielded hull contact: spend a life, park the ship off-field, and
/// schedule the respawn countdown if any lives remain
pub(crate) fn destroy_ship(state: &mut GameState) {
    state.flashes.push(Flash::new(state.ship.pos, 0.22, 48.0));
    for _ in 0..26 {
        state.particles.push(Particle::burst(
            state.ship.pos,
            180.0,
            0.7,
            2.5,
            [255, 120, 60],
            &mut state.rng,
        ));
    }

    state.lives = state.lives.saturating_sub(1);
    state.ship.dead = true;
    state.ship.vel = Vec2::ZERO;
    state.ship.pos = Vec2::new(-1000.0, -1000.0);
    state.combo = 0;
    state.combo_timer = 0.0;

    if state.lives > 0 {
        state.respawn_timer = Some(RESPAWN_DELAY);
        log::debug!("ship destroyed, {} lives left", state.lives);
    } else {
        state.respawn_timer = None;
        log::info!("game over at {} points, level {}", state.score, state.level);
    }
}
