//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one `Pcg32` owned by the session)
//! - Single-threaded, synchronous per-frame steps
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{resolve_collisions, split_asteroid, within};
pub use effects::{Flash, Particle};
pub use snapshot::{RenderSnapshot, snapshot};
pub use state::{Asteroid, Bullet, GameEvent, GameState, Shield, Ship, Tier};
pub use tick::{TickInput, tick};
