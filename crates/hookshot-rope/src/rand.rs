//! Small seeded generator for scattering rope particles

use glam::Vec2;
use std::f32::consts::TAU;

/// Linear congruential generator with an xorshift output mix.
///
/// Deterministic per seed, so a replayed input script rebuilds identical
/// ropes.
#[derive(Debug, Clone)]
pub struct RopeRng {
    state: u32,
}

impl RopeRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let mut out = self.state;
        out ^= out >> 16;
        out = out.wrapping_mul(0x7FEB_352D);
        out ^ (out >> 15)
    }

    /// Uniform in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// A point `radius` away from the origin in a random direction
    pub fn point_on_circle(&mut self, radius: f32) -> Vec2 {
        Vec2::from_angle(self.range(0.0, TAU)) * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = RopeRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(-2.0, 10.0);
            assert!((-2.0..10.0).contains(&v));
        }
    }

    #[test]
    fn circle_points_have_radius() {
        let mut rng = RopeRng::new(123);
        for _ in 0..100 {
            let p = rng.point_on_circle(3.0);
            assert!((p.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RopeRng::new(0);
        let mut b = RopeRng::new(0);
        let xs: Vec<f32> = (0..8).map(|_| a.next_f32()).collect();
        let ys: Vec<f32> = (0..8).map(|_| b.next_f32()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs[0], xs[1]);
    }
}
