//! Verlet particle rope.
//!
//! Each step integrates free particles from their current and previous
//! positions, snaps pinned end particles to their anchors, then relaxes the
//! distance constraint between every neighbouring pair a fixed number of
//! times.

use crate::rand::RopeRng;
use crate::rope::RopeEnds;
use glam::Vec2;
use hookshot_core::math::{DOWN, EPSILON_SQ};
use hookshot_core::RopeConfig;

/// Current and previous position; velocity is implicit in their difference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerletParticle {
    pub position: Vec2,
    pub previous: Vec2,
}

impl VerletParticle {
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            previous: position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerletRope {
    particles: Vec<VerletParticle>,
    rest_length: f32,
    iterations: usize,
    gravity_accel: f32,
    damping: f32,
}

impl VerletRope {
    /// Scatter `particle_count` particles one rest length around `origin`.
    ///
    /// Random directions keep neighbours from starting on top of each other,
    /// which would leave their constraint without a direction.
    pub fn new(config: &RopeConfig, origin: Vec2, rng: &mut RopeRng) -> Self {
        let count = config.particle_count.max(2);
        let particles = (0..count)
            .map(|_| VerletParticle::at_rest(origin + rng.point_on_circle(config.rest_length)))
            .collect();

        Self {
            particles,
            rest_length: config.rest_length,
            iterations: config.iterations,
            gravity_accel: config.gravity_accel,
            damping: config.damping,
        }
    }

    /// Build from explicit particles, mostly for tests and replays. An empty
    /// rope is allowed and never moves.
    pub fn from_particles(particles: Vec<VerletParticle>, config: &RopeConfig) -> Self {
        Self {
            particles,
            rest_length: config.rest_length,
            iterations: config.iterations,
            gravity_accel: config.gravity_accel,
            damping: config.damping,
        }
    }

    pub fn particles(&self) -> &[VerletParticle] {
        &self.particles
    }

    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    pub fn step(&mut self, dt: f32, ends: RopeEnds) {
        self.integrate(dt, ends);
        for _ in 0..self.iterations {
            self.relax(ends);
        }
    }

    fn integrate(&mut self, dt: f32, ends: RopeEnds) {
        let Some(last) = self.particles.len().checked_sub(1) else {
            return;
        };
        let gravity = DOWN * self.gravity_accel * dt * dt;

        for (i, p) in self.particles.iter_mut().enumerate() {
            let anchor = match i {
                0 => ends.start,
                i if i == last => ends.end,
                _ => None,
            };
            if let Some(anchor) = anchor {
                *p = VerletParticle::at_rest(anchor);
                continue;
            }

            let current = p.position;
            p.position += (p.position - p.previous) * self.damping + gravity;
            p.previous = current;
        }
    }

    fn relax(&mut self, ends: RopeEnds) {
        let Some(last) = self.particles.len().checked_sub(1) else {
            return;
        };

        for i in 0..last {
            let a_pinned = i == 0 && ends.start.is_some();
            let b_pinned = i + 1 == last && ends.end.is_some();
            let (wa, wb) = match (a_pinned, b_pinned) {
                (true, true) => continue,
                (true, false) => (0.0, 1.0),
                (false, true) => (1.0, 0.0),
                (false, false) => (0.5, 0.5),
            };

            let a = self.particles[i].position;
            let b = self.particles[i + 1].position;
            let offset = a - b;
            if offset.length_squared() <= EPSILON_SQ {
                continue;
            }

            let distance = offset.length();
            let dir = offset / distance;
            let difference = self.rest_length - distance;

            self.particles[i].position += dir * difference * wa;
            self.particles[i + 1].position -= dir * difference * wb;
        }
    }

    /// Largest deviation of any neighbour distance from the rest length
    pub fn max_length_error(&self) -> f32 {
        self.particles
            .windows(2)
            .map(|w| ((w[0].position - w[1].position).length() - self.rest_length).abs())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize, iterations: usize, gravity: f32, damping: f32) -> RopeConfig {
        RopeConfig {
            particle_count: count,
            iterations,
            gravity_accel: gravity,
            rest_length: 10.0,
            damping,
            ..RopeConfig::default()
        }
    }

    #[test]
    fn particles_start_one_rest_length_out() {
        let mut rng = RopeRng::new(7);
        let rope = VerletRope::new(&config(6, 8, 0.0, 1.0), Vec2::new(5.0, 5.0), &mut rng);
        assert_eq!(rope.particles().len(), 6);
        for p in rope.particles() {
            assert!(((p.position - Vec2::new(5.0, 5.0)).length() - 10.0).abs() < 1e-3);
            assert_eq!(p.position, p.previous);
        }
    }

    #[test]
    fn free_particle_falls_with_gravity() {
        let cfg = config(2, 1, 600.0, 1.0);
        let mut rope = VerletRope::from_particles(
            vec![
                VerletParticle::at_rest(Vec2::ZERO),
                VerletParticle::at_rest(Vec2::new(10.0, 0.0)),
            ],
            &cfg,
        );
        let dt = 0.1;
        rope.step(dt, RopeEnds::start_only(Vec2::ZERO));

        // Pinned start stays put; free end drops g*dt² before relaxation
        // pulls it back toward rest length
        assert_eq!(rope.particles()[0].position, Vec2::ZERO);
        let end = rope.particles()[1].position;
        assert!(end.y > 0.0);
        assert!((end.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn pinned_ends_never_move_during_relaxation() {
        let cfg = config(5, 20, 980.0, 1.0);
        let mut rng = RopeRng::new(99);
        let mut rope = VerletRope::new(&cfg, Vec2::ZERO, &mut rng);
        let start = Vec2::new(-15.0, 0.0);
        let end = Vec2::new(15.0, 0.0);
        for _ in 0..10 {
            rope.step(1.0 / 60.0, RopeEnds::both(start, end));
            assert_eq!(rope.particles()[0].position, start);
            assert_eq!(rope.particles()[4].position, end);
        }
    }

    #[test]
    fn both_ends_pinned_converges() {
        let count = 8;
        let cfg = config(count, 16, 980.0, 0.98);
        let mut rng = RopeRng::new(1234);
        let start = Vec2::new(0.0, 0.0);
        // D = 0.8 * (N - 1) * rest
        let end = Vec2::new(56.0, 0.0);
        let mut rope = VerletRope::new(&cfg, start, &mut rng);

        for _ in 0..1200 {
            rope.step(1.0 / 60.0, RopeEnds::both(start, end));
            assert!(rope.positions().all(|p| p.is_finite()));
        }

        assert!(
            rope.max_length_error() < 0.01 * cfg.rest_length,
            "error {}",
            rope.max_length_error()
        );
        // Slack rope sags below the anchors
        assert!(rope.particles()[count / 2].position.y > 0.0);
    }

    #[test]
    fn default_integration_is_undamped() {
        let cfg = RopeConfig {
            particle_count: 1,
            gravity_accel: 100.0,
            ..RopeConfig::default()
        };
        let mut rope = VerletRope::from_particles(
            vec![VerletParticle {
                position: Vec2::new(3.0, 0.0),
                previous: Vec2::new(1.0, 0.0),
            }],
            &cfg,
        );
        let dt = 0.1;
        rope.step(dt, RopeEnds::free());

        // next = 2 * current - previous + g * dt^2 * down
        let p = rope.particles()[0];
        assert!((p.position - Vec2::new(5.0, 1.0)).length() < 1e-5);
        assert_eq!(p.previous, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn empty_rope_steps_without_panicking() {
        let mut rope = VerletRope::from_particles(Vec::new(), &config(2, 8, 980.0, 1.0));
        rope.step(1.0 / 60.0, RopeEnds::both(Vec2::ZERO, Vec2::X));
        assert!(rope.particles().is_empty());
        assert_eq!(rope.max_length_error(), 0.0);
    }

    #[test]
    fn coincident_neighbours_are_skipped() {
        let cfg = config(3, 4, 0.0, 1.0);
        let mut rope = VerletRope::from_particles(vec![VerletParticle::at_rest(Vec2::ZERO); 3], &cfg);
        rope.step(1.0 / 60.0, RopeEnds::free());
        assert!(rope.positions().all(|p| p == Vec2::ZERO));
    }
}
