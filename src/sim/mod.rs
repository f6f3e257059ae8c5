//! Particle simulation
//!
//! Pure and platform-free:
//! - Caller-supplied time only (no clocks in here)
//! - Seeded RNG only
//! - Stable iteration order (store order)
//! - No rendering or DOM dependencies

pub mod particle;
pub mod tick;
pub mod tracker;

pub use particle::{Particle, ParticleStore, particle_count};
pub use tick::{advance, step_particle, wrap};
pub use tracker::{PointerSnapshot, PointerState, PointerTracker};
