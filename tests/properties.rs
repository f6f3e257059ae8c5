//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use particle_field::FieldSettings;
use particle_field::sim::{
    Particle, ParticleStore, PointerSnapshot, advance, particle_count, step_particle,
};

proptest! {
    #[test]
    fn count_matches_floor_of_area(w in 0u32..4000, h in 0u32..4000) {
        let expected = (w as u64 * h as u64 / 15_000) as usize;
        prop_assert_eq!(particle_count(w as f32, h as f32, 15_000.0), expected);

        let mut rng = Pcg32::seed_from_u64(w as u64 ^ (h as u64) << 32);
        let store = ParticleStore::new(w as f32, h as f32, &FieldSettings::default(), &mut rng);
        prop_assert_eq!(store.len(), expected);
    }

    #[test]
    fn particles_stay_on_surface(
        seed in any::<u64>(),
        w in 150.0f32..1600.0,
        h in 150.0f32..1200.0,
        px in -50.0f32..1650.0,
        py in -50.0f32..1250.0,
        steps in 1usize..300,
    ) {
        let settings = FieldSettings::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut store = ParticleStore::new(w, h, &settings, &mut rng);
        let pointer = PointerSnapshot { position: Vec2::new(px, py), moving: true };

        for _ in 0..steps {
            advance(store.particles_mut(), pointer, w, h, &settings);
        }
        for p in store.particles() {
            prop_assert!(p.pos.x >= 0.0 && p.pos.x <= w, "x {} outside 0..={}", p.pos.x, w);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y <= h, "y {} outside 0..={}", p.pos.y, h);
        }
    }

    #[test]
    fn idle_pointer_restores_base_opacity(
        x in 0.0f32..300.0,
        y in 0.0f32..300.0,
        base in 0.2f32..0.7,
        stale in 0.0f32..1.0,
    ) {
        let mut p = Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, base);
        p.opacity = stale;
        let idle = PointerSnapshot { position: Vec2::new(x, y), moving: false };
        step_particle(&mut p, idle, 300.0, 300.0, &FieldSettings::default());
        prop_assert_eq!(p.opacity, base);
    }

    #[test]
    fn damping_without_pointer(vx in -0.25f32..0.25, vy in -0.25f32..0.25) {
        let v = Vec2::new(vx, vy);
        let mut p = Particle::new(Vec2::new(150.0, 150.0), v, 1.0, 0.5);
        step_particle(&mut p, PointerSnapshot::IDLE, 300.0, 300.0, &FieldSettings::default());
        prop_assert!((p.vel - v * 0.99).length() < 1e-7);
    }

    #[test]
    fn no_force_at_or_beyond_radius(angle in 0.0f32..std::f32::consts::TAU, extra in 0.0f32..200.0) {
        let center = Vec2::new(500.0, 500.0);
        let pos = center + Vec2::from_angle(angle) * (100.0 + extra);
        let mut p = Particle::new(pos, Vec2::ZERO, 1.0, 0.4);
        let pointer = PointerSnapshot { position: center, moving: true };
        step_particle(&mut p, pointer, 1000.0, 1000.0, &FieldSettings::default());
        // Rounding can put a point a hair inside the radius; the pull there is negligible
        prop_assert!(p.vel.length() < 1e-6);
    }
}
