//! Read-only frame snapshot for the render collaborator
//!
//! Built after the simulation step; borrows the asteroid silhouettes rather
//! than cloning them, so taking a snapshot stays cheap at any rock count.

use glam::Vec2;

use super::state::GameState;
use crate::consts::{SHIELD_HALO_SCALE, SHIP_RADIUS};

#[derive(Debug, Clone, Copy)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
    /// Blink state while invulnerable; false also while dead
    pub visible: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct AsteroidView<'a> {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    /// Local outline, rotate by `angle` when drawing
    pub silhouette: &'a [Vec2],
}

#[derive(Debug, Clone, Copy)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: [u8; 3],
    pub alpha: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct FlashView {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct ShieldHalo {
    pub active: bool,
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub combo: u32,
    pub shield_status: String,
}

/// Full-screen overlay flags, mutually exclusive in practice but the
/// renderer decides precedence
#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    pub not_started: bool,
    pub paused: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView<'a>>,
    pub bullets: Vec<Vec2>,
    pub particles: Vec<ParticleView>,
    pub flashes: Vec<FlashView>,
    pub shield: ShieldHalo,
    pub hud: Hud,
    pub overlay: Overlay,
}

/// Capture everything the renderer needs for one frame
pub fn snapshot(state: &GameState) -> RenderSnapshot<'_> {
    RenderSnapshot {
        ship: ShipView {
            pos: state.ship.pos,
            angle: state.ship.angle,
            visible: state.ship.visible(),
        },
        asteroids: state
            .asteroids
            .iter()
            .map(|a| AsteroidView {
                pos: a.pos,
                angle: a.angle,
                radius: a.radius,
                silhouette: &a.silhouette,
            })
            .collect(),
        bullets: state.bullets.iter().map(|b| b.pos).collect(),
        particles: state
            .particles
            .iter()
            .map(|p| ParticleView {
                pos: p.pos,
                size: p.size,
                color: p.color,
                alpha: p.alpha(),
            })
            .collect(),
        flashes: state
            .flashes
            .iter()
            .map(|f| FlashView {
                pos: f.pos,
                radius: f.current_radius(),
                alpha: f.alpha(),
            })
            .collect(),
        shield: ShieldHalo {
            active: state.shield.is_active(),
            pos: state.ship.pos,
            radius: SHIP_RADIUS * SHIELD_HALO_SCALE,
        },
        hud: Hud {
            score: state.score,
            lives: state.lives,
            level: state.level,
            combo: state.combo,
            shield_status: state.shield.status_label(),
        },
        overlay: Overlay {
            not_started: !state.started,
            paused: state.paused,
            game_over: state.game_over(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Shield;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(7, 1920.0, 1080.0);
        state.score = 1_230;
        state.combo = 4;

        let snap = snapshot(&state);
        assert_eq!(snap.asteroids.len(), 3);
        assert_eq!(snap.hud.score, 1_230);
        assert_eq!(snap.hud.combo, 4);
        assert_eq!(snap.hud.shield_status, "READY");
        assert!(snap.overlay.not_started);
        assert!(!snap.overlay.game_over);
        assert!(snap.ship.visible);
        assert!(!snap.shield.active);
    }

    #[test]
    fn test_snapshot_shield_halo() {
        let mut state = GameState::new(7, 1920.0, 1080.0);
        state.shield = Shield::Active { remaining: 2.0 };

        let snap = snapshot(&state);
        assert!(snap.shield.active);
        assert_eq!(snap.shield.pos, state.ship.pos);
        assert!((snap.shield.radius - 33.8).abs() < 1e-3);
        assert_eq!(snap.hud.shield_status, "ACTIVE");
    }

    #[test]
    fn test_snapshot_silhouettes_borrowed() {
        let state = GameState::new(7, 1920.0, 1080.0);
        let snap = snapshot(&state);
        for (view, rock) in snap.asteroids.iter().zip(&state.asteroids) {
            assert!(std::ptr::eq(view.silhouette, rock.silhouette.as_slice()));
        }
    }

    #[test]
    fn test_snapshot_overlay_flags() {
        let mut state = GameState::new(7, 1920.0, 1080.0);
        state.started = true;
        state.paused = true;
        state.lives = 0;

        let snap = snapshot(&state);
        assert!(!snap.overlay.not_started);
        assert!(snap.overlay.paused);
        assert!(snap.overlay.game_over);
    }
}
