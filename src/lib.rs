//! Particle Field - an interactive particle background for web pages
//!
//! Core modules:
//! - `sim`: Pure simulation (particle store, pointer tracker, frame update)
//! - `renderer`: Drawing through a small surface trait (Canvas 2D on the web)
//! - `field`: One owned field instance tying the two together
//! - `platform`: Browser shell (canvas, listeners, animation-frame loop)
//! - `settings`: Tuning with LocalStorage overrides
//! - `schedule`: Frame-loop run/pause policy

pub mod error;
pub mod field;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod sim;

pub use error::FieldError;
pub use field::ParticleField;
pub use settings::FieldSettings;

/// Shared constants
pub mod consts {
    /// Element id the page entry point mounts into
    pub const DEFAULT_CONTAINER_ID: &str = "particles";
    /// Nominal frame length at 60 Hz, in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
