//! Rigid joint-chain rope.
//!
//! Segments are small bodies under gravity, linked by rigid joints of fixed
//! length. The first joint targets the rope root, the last one the hook. Joints
//! are enforced by alternating passes from the hook end and from the root end,
//! so the root joint is always exact and the hook joint converges toward it.

use crate::rope::RopeEnds;
use glam::Vec2;
use hookshot_core::math::{safe_normalize, DOWN};
use hookshot_core::RopeConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSegment {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct JointChain {
    segments: Vec<ChainSegment>,
    segment_length: f32,
    iterations: usize,
    gravity_accel: f32,
    /// Used when two joints coincide and the link has no direction of its own
    look_direction: Vec2,
}

impl JointChain {
    /// All segments start stacked on the root, pointing along `look_direction`.
    pub fn new(config: &RopeConfig, root: Vec2, look_direction: Vec2) -> Self {
        let count = config.segment_count.max(2);
        let look = safe_normalize(look_direction);
        Self {
            segments: vec![
                ChainSegment {
                    position: root,
                    velocity: Vec2::ZERO,
                };
                count
            ],
            segment_length: config.rest_length,
            iterations: config.iterations,
            gravity_accel: config.gravity_accel,
            look_direction: if look == Vec2::ZERO { Vec2::X } else { look },
        }
    }

    pub fn segments(&self) -> &[ChainSegment] {
        &self.segments
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    pub fn step(&mut self, dt: f32, ends: RopeEnds) {
        let before: Vec<Vec2> = self.segments.iter().map(|s| s.position).collect();

        let gravity = DOWN * self.gravity_accel * dt;
        for s in &mut self.segments {
            s.velocity += gravity;
            s.position += s.velocity * dt;
        }

        for _ in 0..self.iterations {
            if let Some(hook) = ends.end {
                self.pass_from_hook(hook);
            }
            match ends.start {
                Some(root) => self.pass_from_root(root),
                None if ends.end.is_none() => {
                    let first = self.segments[0].position;
                    self.pass_from_root(first);
                }
                None => {}
            }
        }

        if dt > 0.0 {
            for (s, prev) in self.segments.iter_mut().zip(before) {
                s.velocity = (s.position - prev) / dt;
            }
        }
    }

    fn pass_from_root(&mut self, root: Vec2) {
        self.segments[0].position = root;
        for i in 1..self.segments.len() {
            let anchor = self.segments[i - 1].position;
            let dir = self.link_direction(self.segments[i].position - anchor, self.look_direction);
            self.segments[i].position = anchor + dir * self.segment_length;
        }
    }

    fn pass_from_hook(&mut self, hook: Vec2) {
        let last = self.segments.len() - 1;
        self.segments[last].position = hook;
        for i in (0..last).rev() {
            let anchor = self.segments[i + 1].position;
            let dir = self.link_direction(self.segments[i].position - anchor, -self.look_direction);
            self.segments[i].position = anchor + dir * self.segment_length;
        }
    }

    fn link_direction(&self, offset: Vec2, fallback: Vec2) -> Vec2 {
        let dir = safe_normalize(offset);
        if dir == Vec2::ZERO {
            fallback
        } else {
            dir
        }
    }

    /// Distance from the last segment to where the hook wants it
    pub fn hook_gap(&self, hook: Vec2) -> f32 {
        self.segments
            .last()
            .map(|s| (s.position - hook).length())
            .unwrap_or(0.0)
    }
}
