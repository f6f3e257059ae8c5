//! The particle field: one owned instance per container
//!
//! Holds the store, pointer tracker, surface size, settings and RNG. The
//! browser shell feeds it events and frame timestamps; nothing here touches
//! the DOM.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::renderer::{Surface, render};
use crate::settings::FieldSettings;
use crate::sim::{ParticleStore, PointerTracker, advance};

pub struct ParticleField {
    store: ParticleStore,
    tracker: PointerTracker,
    settings: FieldSettings,
    rng: Pcg32,
    width: f32,
    height: f32,
    frames: u64,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, settings: FieldSettings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let width = width.max(0.0);
        let height = height.max(0.0);
        let store = ParticleStore::new(width, height, &settings, &mut rng);
        log::debug!(
            "Particle field {}x{} with {} particles",
            width,
            height,
            store.len()
        );

        Self {
            store,
            tracker: PointerTracker::new(settings.pointer_idle_ms),
            settings,
            rng,
            width,
            height,
            frames: 0,
        }
    }

    /// Rebuild the store for a new surface size
    ///
    /// The whole store is swapped at once; the next frame sees only the new
    /// particles.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.store
            .rebuild(self.width, self.height, &self.settings, &mut self.rng);
        log::debug!(
            "Resized to {}x{}, rebuilt {} particles",
            self.width,
            self.height,
            self.store.len()
        );
    }

    /// Pointer moved to container-relative `(x, y)` at `now_ms`
    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64) {
        self.tracker.pointer_moved(Vec2::new(x, y), now_ms);
    }

    pub fn pointer_left(&mut self) {
        self.tracker.pointer_left();
    }

    /// Advance the simulation one frame
    pub fn step(&mut self, now_ms: f64) {
        self.tracker.poll(now_ms);
        advance(
            self.store.particles_mut(),
            self.tracker.snapshot(),
            self.width,
            self.height,
            &self.settings,
        );
        self.frames += 1;
    }

    /// Draw the current state without advancing it
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        render(
            surface,
            self.store.particles(),
            self.width,
            self.height,
            &self.settings,
        );
    }

    /// One full frame: update, then draw
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        self.step(now_ms);
        self.draw(surface);
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Frames stepped since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
