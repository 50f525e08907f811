//! Vector Rocks headless demo
//!
//! Runs the simulation core at a fixed 60 Hz with a scripted pilot: spiral
//! the stick, hold fire, pop the shield every ten seconds. Useful for
//! checking determinism and watching the scoring loop without a renderer.

use glam::Vec2;

use vector_rocks::sim::{GameEvent, GameState, TickInput, snapshot, tick};

const DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 60.0;

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut state = GameState::new(seed, 1920.0, 1080.0);
    log::info!("headless run, seed {seed}");

    let frames = (RUN_SECONDS / DT) as usize;
    let mut shots = 0u32;
    let mut kills = 0u32;

    for frame in 0..frames {
        let t = frame as f32 * DT;
        let input = TickInput {
            steer: Vec2::new((t * 0.7).sin(), (t * 0.9).cos()) * 0.9,
            fire_held: true,
            shield_pressed: frame % 600 == 300,
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        for event in state.take_events() {
            match event {
                GameEvent::ShotFired => shots += 1,
                GameEvent::AsteroidDestroyed => kills += 1,
                GameEvent::ShieldActivated => log::info!("shield up at t={t:.1}"),
            }
        }

        if state.game_over() {
            log::info!("game over at t={t:.1}");
            break;
        }
    }

    let snap = snapshot(&state);
    println!(
        "seed {seed}: score {} | level {} | lives {} | {} shots, {} kills, {} rocks left",
        snap.hud.score,
        snap.hud.level,
        snap.hud.lives,
        shots,
        kills,
        snap.asteroids.len(),
    );
}
