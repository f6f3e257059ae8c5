//! Field settings and tuning
//!
//! Defaults reproduce the stock look. A page can put a JSON override in
//! LocalStorage; missing keys fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::renderer::Rgb;

/// Surface area (px²) per particle for the stock density
pub const DEFAULT_AREA_PER_PARTICLE: f32 = 15_000.0;

/// Everything tunable about the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    // === Store ===
    /// Surface area per particle; count = floor(area / this)
    pub area_per_particle: f32,
    /// Initial velocity components are drawn from [-max_speed, max_speed]
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,

    // === Pointer interaction ===
    /// Pointer influence radius (exclusive)
    pub interaction_radius: f32,
    /// Peak pull strength at the pointer
    pub attraction: f32,
    /// Scale applied to the pull before it is added to velocity
    pub attraction_scale: f32,
    /// Per-frame velocity multiplier
    pub damping: f32,
    /// Pointer goes idle this long after the last move
    pub pointer_idle_ms: f64,

    // === Drawing ===
    pub color: Rgb,
    /// Pairs closer than this get a connecting line
    pub link_distance: f32,
    /// Line alpha for two coincident particles
    pub link_alpha: f32,
    pub link_width: f32,

    // === Lifecycle ===
    /// Stop the frame loop while the document is hidden
    pub pause_when_hidden: bool,
    /// Draw one static frame instead of animating under prefers-reduced-motion
    pub respect_reduced_motion: bool,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            area_per_particle: DEFAULT_AREA_PER_PARTICLE,
            max_speed: 0.25,
            min_size: 1.0,
            max_size: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,

            interaction_radius: 100.0,
            attraction: 0.5,
            attraction_scale: 0.01,
            damping: 0.99,
            pointer_idle_ms: 100.0,

            color: Rgb::WHITE,
            link_distance: 80.0,
            link_alpha: 0.1,
            link_width: 0.5,

            pause_when_hidden: true,
            respect_reduced_motion: true,
        }
    }
}

impl FieldSettings {
    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |msg: &str| Err(FieldError::InvalidSettings(msg.to_string()));

        if !(self.area_per_particle > 0.0) {
            return invalid("area_per_particle must be positive");
        }
        if !(self.max_speed >= 0.0) {
            return invalid("max_speed must not be negative");
        }
        if !(self.min_size > 0.0) || self.min_size > self.max_size {
            return invalid("size range must be positive and ordered");
        }
        if !(0.0..=1.0).contains(&self.min_opacity)
            || !(0.0..=1.0).contains(&self.max_opacity)
            || self.min_opacity > self.max_opacity
        {
            return invalid("opacity range must be ordered within [0, 1]");
        }
        if !(self.interaction_radius > 0.0) {
            return invalid("interaction_radius must be positive");
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return invalid("damping must be in (0, 1]");
        }
        if !(self.link_distance > 0.0) {
            return invalid("link_distance must be positive");
        }
        if !(self.pointer_idle_ms >= 0.0) {
            return invalid("pointer_idle_ms must not be negative");
        }
        Ok(())
    }

    /// Parse a JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| FieldError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from a stored JSON override, or the defaults
    ///
    /// A bad override is logged and ignored rather than failing the mount.
    pub fn from_stored(stored: Option<&str>) -> Self {
        let Some(json) = stored else {
            log::debug!("No stored particle settings, using defaults");
            return Self::default();
        };
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("Ignoring stored particle settings: {}", e);
            Self::default()
        })
    }

    /// Settings for this page: the LocalStorage override if there is one
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        const STORAGE_KEY: &str = "particle_field_settings";

        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        Self::from_stored(stored.as_deref())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_stored(None)
    }
}
