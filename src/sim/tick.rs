//! Per-frame particle update
//!
//! Each particle depends only on its own previous state and the pointer
//! snapshot, never on its neighbours.

use glam::Vec2;

use super::particle::Particle;
use super::tracker::PointerSnapshot;
use crate::settings::FieldSettings;

/// Advance every particle by one frame, in store order
pub fn advance(
    particles: &mut [Particle],
    pointer: PointerSnapshot,
    width: f32,
    height: f32,
    settings: &FieldSettings,
) {
    for particle in particles.iter_mut() {
        step_particle(particle, pointer, width, height, settings);
    }
}

/// One frame for one particle: move, wrap, pointer pull, damping
pub fn step_particle(
    particle: &mut Particle,
    pointer: PointerSnapshot,
    width: f32,
    height: f32,
    settings: &FieldSettings,
) {
    particle.pos += particle.vel;
    particle.pos = wrap(particle.pos, width, height);

    particle.opacity = particle.base_opacity;
    if pointer.moving {
        let to_pointer = pointer.position - particle.pos;
        let distance = to_pointer.length();
        let radius = settings.interaction_radius;

        if distance < radius {
            let falloff = (radius - distance) / radius;
            particle.opacity = (particle.base_opacity + falloff).min(1.0);

            // Sitting on the pointer: no direction to pull in
            if distance > 0.0 {
                let force = falloff * settings.attraction;
                particle.vel += to_pointer / distance * force * settings.attraction_scale;
            }
        }
    }

    particle.vel *= settings.damping;
}

/// Hard wrap to the opposite edge (not modulo)
#[inline]
pub fn wrap(mut pos: Vec2, width: f32, height: f32) -> Vec2 {
    if pos.x < 0.0 {
        pos.x = width;
    }
    if pos.x > width {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = height;
    }
    if pos.y > height {
        pos.y = 0.0;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FieldSettings {
        FieldSettings::default()
    }

    fn moving_at(x: f32, y: f32) -> PointerSnapshot {
        PointerSnapshot {
            position: Vec2::new(x, y),
            moving: true,
        }
    }

    #[test]
    fn test_moves_and_damps() {
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::new(0.2, -0.1), 2.0, 0.4);
        step_particle(&mut p, PointerSnapshot::IDLE, 300.0, 300.0, &settings());
        assert_eq!(p.pos, Vec2::new(50.2, 49.9));
        assert_eq!(p.vel, Vec2::new(0.2, -0.1) * 0.99);
    }

    #[test]
    fn test_wrap_edges() {
        assert_eq!(wrap(Vec2::new(-0.1, 10.0), 300.0, 200.0), Vec2::new(300.0, 10.0));
        assert_eq!(wrap(Vec2::new(300.1, 10.0), 300.0, 200.0), Vec2::new(0.0, 10.0));
        assert_eq!(wrap(Vec2::new(10.0, -3.0), 300.0, 200.0), Vec2::new(10.0, 200.0));
        assert_eq!(wrap(Vec2::new(10.0, 200.5), 300.0, 200.0), Vec2::new(10.0, 0.0));
        // Exactly on the edge stays put
        assert_eq!(wrap(Vec2::new(300.0, 0.0), 300.0, 200.0), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_wrapped_edge_reappears_next_step() {
        let mut p = Particle::new(Vec2::new(299.9, 100.0), Vec2::new(0.1, 0.0), 1.0, 0.3);
        step_particle(&mut p, PointerSnapshot::IDLE, 300.0, 300.0, &settings());
        // Lands on the edge without leaving the surface
        assert!(p.pos.x <= 300.0);
        p.vel = Vec2::new(0.5, 0.0);
        step_particle(&mut p, PointerSnapshot::IDLE, 300.0, 300.0, &settings());
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn test_idle_pointer_resets_opacity() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0, 0.35);
        p.opacity = 0.95;
        step_particle(&mut p, PointerSnapshot::IDLE, 300.0, 300.0, &settings());
        assert_eq!(p.opacity, 0.35);
    }

    #[test]
    fn test_pointer_pulls_and_brightens() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 1.0, 0.3);
        step_particle(&mut p, moving_at(150.0, 100.0), 300.0, 300.0, &settings());

        // falloff = 0.5 -> opacity 0.8, force 0.25 * 0.01 toward +x, then damped
        assert!((p.opacity - 0.8).abs() < 1e-6);
        assert!((p.vel.x - 0.0025 * 0.99).abs() < 1e-7);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_opacity_capped_at_one() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 1.0, 0.7);
        step_particle(&mut p, moving_at(101.0, 100.0), 300.0, 300.0, &settings());
        assert_eq!(p.opacity, 1.0);
    }

    #[test]
    fn test_radius_boundary_is_exclusive() {
        let mut p = Particle::new(Vec2::new(150.0, 100.0), Vec2::ZERO, 1.0, 0.4);
        step_particle(&mut p, moving_at(250.0, 100.0), 300.0, 300.0, &settings());
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.opacity, 0.4);
    }

    #[test]
    fn test_pointer_on_particle_no_force() {
        let mut p = Particle::new(Vec2::new(40.0, 40.0), Vec2::ZERO, 1.0, 0.5);
        step_particle(&mut p, moving_at(40.0, 40.0), 300.0, 300.0, &settings());
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.vel.is_finite());
        assert_eq!(p.opacity, 1.0);
    }

    #[test]
    fn test_advance_keeps_order_and_count() {
        let mut ps = vec![
            Particle::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), 1.0, 0.2),
            Particle::new(Vec2::new(2.0, 2.0), Vec2::new(0.0, 1.0), 1.0, 0.3),
        ];
        advance(&mut ps, PointerSnapshot::IDLE, 100.0, 100.0, &settings());
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].pos, Vec2::new(2.0, 1.0));
        assert_eq!(ps[1].pos, Vec2::new(2.0, 3.0));
    }
}
