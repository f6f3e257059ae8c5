//! Neighbour links between nearby particles
//!
//! Exhaustive pair scan, O(n²). Fine while the area rule keeps counts in
//! the low hundreds.

use glam::Vec2;

use crate::sim::Particle;

/// A line between two particles closer than the link distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f32,
    /// 1 for coincident particles, falling to 0 at the link distance
    pub strength: f32,
}

/// Every unordered pair `(i, j)`, `i < j`, closer than `max_distance`
pub fn connections(
    particles: &[Particle],
    max_distance: f32,
) -> impl Iterator<Item = Connection> + '_ {
    particles.iter().enumerate().flat_map(move |(i, a)| {
        particles[i + 1..].iter().filter_map(move |b| {
            let distance = a.pos.distance(b.pos);
            (distance < max_distance).then(|| Connection {
                from: a.pos,
                to: b.pos,
                distance,
                strength: (max_distance - distance) / max_distance,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, 0.5)
    }

    #[test]
    fn test_each_pair_once() {
        let ps = vec![at(0.0, 0.0), at(10.0, 0.0), at(0.0, 10.0)];
        let links: Vec<_> = connections(&ps, 80.0).collect();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].from, Vec2::ZERO);
        assert_eq!(links[0].to, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let ps = vec![at(0.0, 0.0), at(80.0, 0.0), at(160.0, 0.0)];
        assert_eq!(connections(&ps, 80.0).count(), 0);

        let ps = vec![at(0.0, 0.0), at(79.0, 0.0)];
        let link = connections(&ps, 80.0).next().unwrap();
        assert!((link.strength - 1.0 / 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_particles() {
        let ps = vec![at(20.0, 20.0), at(20.0, 20.0)];
        let link = connections(&ps, 80.0).next().unwrap();
        assert_eq!(link.distance, 0.0);
        assert_eq!(link.strength, 1.0);
        assert_eq!(link.from, link.to);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(connections(&[], 80.0).count(), 0);
        assert_eq!(connections(&[at(1.0, 1.0)], 80.0).count(), 0);
    }
}
