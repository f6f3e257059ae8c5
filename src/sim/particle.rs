//! Particle records and the store that owns them
//!
//! The store is only ever built whole: on creation and on every resize.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::FieldSettings;

/// A single animated point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Per-frame displacement
    pub vel: Vec2,
    /// Disc radius, fixed at creation
    pub size: f32,
    /// Opacity for the current frame
    pub opacity: f32,
    /// Resting opacity, fixed at creation
    pub base_opacity: f32,
}

impl Particle {
    /// A particle at rest with fixed opacity
    pub fn new(pos: Vec2, vel: Vec2, size: f32, base_opacity: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            opacity: base_opacity,
            base_opacity,
        }
    }

    /// Random particle somewhere on a `width` x `height` surface
    pub fn random<R: Rng>(
        rng: &mut R,
        width: f32,
        height: f32,
        settings: &FieldSettings,
    ) -> Self {
        let pos = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let vel = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * settings.max_speed,
            (rng.random::<f32>() * 2.0 - 1.0) * settings.max_speed,
        );
        let size = lerp(settings.min_size, settings.max_size, rng.random());
        // Starting opacity is drawn on its own; the first frame replaces it
        let opacity = lerp(settings.min_opacity, settings.max_opacity, rng.random());
        let base_opacity = lerp(settings.min_opacity, settings.max_opacity, rng.random());

        Self {
            pos,
            vel,
            size,
            opacity,
            base_opacity,
        }
    }
}

#[inline]
fn lerp(lo: f32, hi: f32, t: f32) -> f32 {
    lo + (hi - lo) * t
}

/// Number of particles for a surface: floor(area / area_per_particle)
pub fn particle_count(width: f32, height: f32, area_per_particle: f32) -> usize {
    if !(width > 0.0 && height > 0.0 && area_per_particle > 0.0) {
        return 0;
    }
    (width as f64 * height as f64 / area_per_particle as f64).floor() as usize
}

/// Ordered particle collection sized to its surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl ParticleStore {
    pub fn new<R: Rng>(
        width: f32,
        height: f32,
        settings: &FieldSettings,
        rng: &mut R,
    ) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let count = particle_count(width, height, settings.area_per_particle);
        let particles = (0..count)
            .map(|_| Particle::random(&mut *rng, width, height, settings))
            .collect();

        Self {
            particles,
            width,
            height,
        }
    }

    /// Replace every particle with a fresh set for the new surface size
    pub fn rebuild<R: Rng>(
        &mut self,
        width: f32,
        height: f32,
        settings: &FieldSettings,
        rng: &mut R,
    ) {
        *self = Self::new(width, height, settings, rng);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Surface size this store was built for
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
