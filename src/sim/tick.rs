//! Per-frame session update
//!
//! The embedder calls [`tick`] once per frame with the elapsed wall-clock
//! time and the normalized input snapshot. Frame order: input edges, ship,
//! bullets, asteroids, collisions, shield timers, effects, respawn and
//! combo countdowns, level progression.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::effects::{Particle, update_flashes, update_particles};
use super::state::{Bullet, GameEvent, GameState};
use crate::angle_to_vec;
use crate::consts::*;

/// One frame of normalized input. The steering vector is deadzone-filtered
/// by the input collaborator but clamped again in the core; the booleans are
/// press edges except `fire_held`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub steer: Vec2,
    pub fire_held: bool,
    pub fire_pressed: bool,
    pub shield_pressed: bool,
    pub pause_toggled: bool,
    pub restart_requested: bool,
}

/// Advance the session by `dt` seconds (clamped to [`MAX_FRAME_DT`]).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    // Restart and pause edges are live even while paused or game over
    if input.restart_requested {
        restart(state);
        return;
    }
    if input.pause_toggled && state.started && !state.game_over() {
        state.paused = !state.paused;
        log::debug!("paused: {}", state.paused);
    }
    if state.paused {
        return;
    }

    let fire = input.fire_held || input.fire_pressed;

    // Attract screen: the shield cooldown keeps recharging while idle,
    // everything else is frozen until the first fire input
    if !state.started {
        if fire {
            state.started = true;
            log::info!("session started, seed {}", state.seed);
        } else {
            state.shield.tick(dt);
            return;
        }
    }

    state.time += dt;

    state.shot_cooldown = (state.shot_cooldown - dt).max(0.0);
    if fire && !state.ship.dead && !state.game_over() && state.shot_cooldown <= 0.0 {
        fire_bullet(state);
    }

    // Activation lands before the collision pass so the halo protects the
    // ship on the very frame the button is pressed
    if input.shield_pressed && !state.game_over() && state.shield.activate() {
        state.events.push(GameEvent::ShieldActivated);
        log::debug!("shield up at t={:.2}", state.time);
    }

    if !state.ship.dead {
        let field = state.field;
        state
            .ship
            .update(dt, input.steer, &mut state.particles, &mut state.rng, field);
    }

    let field = state.field;
    state.bullets.retain_mut(|b| b.update(dt, field));
    for rock in &mut state.asteroids {
        rock.update(dt, field);
    }

    resolve_collisions(state);

    state.shield.tick(dt);
    update_particles(&mut state.particles, dt);
    update_flashes(&mut state.flashes, dt);

    if let Some(remaining) = state.respawn_timer {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            state.respawn_timer = None;
            if state.lives > 0 {
                state.ship.respawn(state.field);
            }
        } else {
            state.respawn_timer = Some(remaining);
        }
    }

    if state.combo_timer > 0.0 {
        state.combo_timer -= dt;
        if state.combo_timer <= 0.0 {
            state.combo = 0;
        }
    }

    if state.asteroids.is_empty() && !state.game_over() {
        state.level += 1;
        state.speed_min = (state.speed_min * (1.0 + LEVEL_SPEED_GROWTH)).min(ASTEROID_MIN_SPEED_CAP);
        state.speed_max = (state.speed_max * (1.0 + LEVEL_SPEED_GROWTH)).min(ASTEROID_MAX_SPEED_CAP);
        log::info!(
            "level {} cleared, next wave at {:.0}-{:.0} u/s",
            state.level - 1,
            state.speed_min,
            state.speed_max
        );
        state.spawn_wave();
    }
}

/// Spawn a bullet at the ship's nose, inheriting the ship's velocity
fn fire_bullet(state: &mut GameState) {
    state.shot_cooldown = FIRE_INTERVAL;
    let heading = angle_to_vec(state.ship.angle);
    let nose = state.ship.pos + heading * SHIP_NOSE_OFFSET;
    state.bullets.push(Bullet {
        pos: nose,
        vel: state.ship.vel + heading * BULLET_SPEED,
        age: 0.0,
    });
    for _ in 0..4 {
        state
            .particles
            .push(Particle::spark(nose, heading, &mut state.rng));
    }
    state.events.push(GameEvent::ShotFired);
}

/// Fresh session on the same field, seeded from the old session's RNG so
/// consecutive runs differ but the whole sequence stays reproducible
pub fn restart(state: &mut GameState) {
    let seed = state.rng.random::<u64>();
    log::info!(
        "restart after {} points, new seed {}",
        state.score,
        seed
    );
    *state = GameState::new(seed, state.field.x, state.field.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::destroy_ship;

    const DT: f32 = 1.0 / 60.0;

    fn started_state() -> GameState {
        let mut state = GameState::new(2024, 1920.0, 1080.0);
        state.started = true;
        state
    }

    fn run(state: &mut GameState, input: TickInput, frames: usize) {
        for _ in 0..frames {
            tick(state, &input, DT);
        }
    }

    #[test]
    fn test_idle_session_drifts_without_scoring() {
        let mut state = started_state();
        let before: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();

        run(&mut state, TickInput::default(), 600);

        assert_eq!(state.score, 0);
        assert_eq!(state.asteroids.len(), 3);
        for (rock, old) in state.asteroids.iter().zip(&before) {
            assert_ne!(rock.pos, *old);
            assert!((0.0..state.field.x).contains(&rock.pos.x));
            assert!((0.0..state.field.y).contains(&rock.pos.y));
        }
        assert!((state.time - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_attract_screen_frozen_until_fire() {
        let mut state = GameState::new(5, 1920.0, 1080.0);
        let before: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();

        run(&mut state, TickInput::default(), 120);
        assert!(!state.started);
        assert_eq!(state.time, 0.0);
        let after: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
        assert_eq!(before, after);

        tick(
            &mut state,
            &TickInput {
                fire_pressed: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.started);
        // The starting tap also fires the first shot
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_fire_rate_limit() {
        let mut state = started_state();
        state.asteroids.clear();
        state.level = 0; // keep the refill wave small and out of the way
        let input = TickInput {
            fire_held: true,
            ..Default::default()
        };
        run(&mut state, input, 60);

        // One shot every 0.12 s at 60 Hz is a shot every 8th frame
        let shots = state
            .take_events()
            .iter()
            .filter(|e| **e == GameEvent::ShotFired)
            .count();
        assert!((7..=9).contains(&shots), "{shots}");
    }

    #[test]
    fn test_bullet_expires() {
        let mut state = started_state();
        state.asteroids.clear();
        state.level = 0;
        tick(
            &mut state,
            &TickInput {
                fire_pressed: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.bullets.len(), 1);

        run(&mut state, TickInput::default(), 70);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_combo_decays_after_timeout() {
        let mut state = started_state();
        state.combo = 5;
        state.combo_timer = 0.05;

        run(&mut state, TickInput::default(), 6);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = started_state();
        tick(
            &mut state,
            &TickInput {
                pause_toggled: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.paused);

        let positions: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
        let time = state.time;
        run(&mut state, TickInput::default(), 120);

        assert_eq!(state.time, time);
        let after: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
        assert_eq!(positions, after);

        tick(
            &mut state,
            &TickInput {
                pause_toggled: true,
                ..Default::default()
            },
            DT,
        );
        assert!(!state.paused);
        run(&mut state, TickInput::default(), 1);
        assert!(state.time > time);
    }

    #[test]
    fn test_restart_reseeds() {
        let mut state = started_state();
        state.score = 480;
        state.lives = 1;

        tick(
            &mut state,
            &TickInput {
                restart_requested: true,
                ..Default::default()
            },
            DT,
        );

        assert_ne!(state.seed, 2024);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.started);
        assert_eq!(state.asteroids.len(), 3);
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut state = started_state();
        state.asteroids.clear();
        state.level = 0;
        destroy_ship(&mut state);
        assert!(state.ship.dead);

        // 0.8 s countdown at 60 Hz
        run(&mut state, TickInput::default(), 49);
        assert!(!state.ship.dead);
        assert_eq!(state.ship.pos, state.field * 0.5);
        assert!(state.ship.invulnerable > 0.0);
    }

    #[test]
    fn test_no_respawn_when_out_of_lives() {
        let mut state = started_state();
        state.asteroids.clear();
        state.level = 0;
        state.lives = 1;
        destroy_ship(&mut state);
        assert!(state.game_over());

        run(&mut state, TickInput::default(), 120);
        assert!(state.ship.dead);
    }

    #[test]
    fn test_shield_press_edge_activates_once() {
        let mut state = started_state();
        let input = TickInput {
            shield_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.shield.is_active());
        assert!(state.take_events().contains(&GameEvent::ShieldActivated));

        // Holding the edge high keeps re-requesting; all no-ops
        run(&mut state, input, 10);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_level_up_spawns_bigger_faster_wave() {
        let mut state = started_state();
        state.asteroids.clear();

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.level, 2);
        assert_eq!(state.asteroids.len(), 4);
        assert!((state.speed_min - ASTEROID_BASE_MIN_SPEED * 1.02).abs() < 1e-3);
        assert!((state.speed_max - ASTEROID_BASE_MAX_SPEED * 1.02).abs() < 1e-3);
    }

    #[test]
    fn test_speed_bounds_capped() {
        let mut state = started_state();
        state.speed_min = ASTEROID_MIN_SPEED_CAP - 0.5;
        state.speed_max = ASTEROID_MAX_SPEED_CAP - 0.5;
        for _ in 0..20 {
            state.asteroids.clear();
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.speed_min <= ASTEROID_MIN_SPEED_CAP);
        assert!(state.speed_max <= ASTEROID_MAX_SPEED_CAP);
    }

    #[test]
    fn test_dt_clamped() {
        let mut state = started_state();
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic_replay() {
        let script = |frame: usize| TickInput {
            steer: Vec2::new(
                (frame as f32 * 0.05).sin(),
                (frame as f32 * 0.03).cos() * 0.8,
            ),
            fire_held: frame % 3 == 0,
            shield_pressed: frame == 90,
            ..Default::default()
        };

        let mut a = started_state();
        let mut b = started_state();
        for frame in 0..600 {
            tick(&mut a, &script(frame), DT);
            tick(&mut b, &script(frame), DT);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.ship.pos, b.ship.pos);
        assert_eq!(a.bullets.len(), b.bullets.len());
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        for (ra, rb) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(ra.pos, rb.pos);
            assert_eq!(ra.vel, rb.vel);
        }
    }
}
