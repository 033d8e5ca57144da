//! Spatial query provider.
//!
//! The host engine owns collision. The core only asks it to move a box by
//! some displacement and to report which hookable areas a box overlaps.
//! [`OpenSpace`] and [`BoxWorld`] are small stand-ins so the core runs
//! headless; a real host implements [`SpatialQuery`] over its own solver.

use glam::Vec2;
use hookshot_core::{AreaId, RectConfig, WorldConfig};
use std::collections::BTreeSet;

use crate::event::ContactEvent;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

impl From<RectConfig> for Aabb {
    fn from(rect: RectConfig) -> Self {
        Self::new(rect.min, rect.max)
    }
}

/// Outcome of a collision-resolved move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Center position after the move
    pub position: Vec2,
    pub collided: bool,
    /// Surface normal of the last contact, zero if none
    pub normal: Vec2,
}

impl MoveResult {
    fn free(position: Vec2) -> Self {
        Self {
            position,
            collided: false,
            normal: Vec2::ZERO,
        }
    }
}

/// Collision queries the gameplay core consumes from the engine
pub trait SpatialQuery {
    /// Move a box by `delta`, stopping where it first hits something
    fn move_and_collide(&self, position: Vec2, half_extents: Vec2, delta: Vec2) -> MoveResult;

    /// Move a box by `velocity * dt`, sliding along whatever it hits
    fn move_and_slide(&self, position: Vec2, half_extents: Vec2, velocity: Vec2, dt: f32)
        -> MoveResult;

    /// Hookable areas the given box currently overlaps
    fn hookable_overlaps(&self, bounds: Aabb) -> Vec<AreaId>;
}

/// Empty space: every move succeeds in full and nothing is hookable
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl SpatialQuery for OpenSpace {
    fn move_and_collide(&self, position: Vec2, _half_extents: Vec2, delta: Vec2) -> MoveResult {
        MoveResult::free(position + delta)
    }

    fn move_and_slide(
        &self,
        position: Vec2,
        _half_extents: Vec2,
        velocity: Vec2,
        dt: f32,
    ) -> MoveResult {
        MoveResult::free(position + velocity * dt)
    }

    fn hookable_overlaps(&self, _bounds: Aabb) -> Vec<AreaId> {
        Vec::new()
    }
}

/// Static solids and hookable areas, resolved one axis at a time
#[derive(Debug, Clone, Default)]
pub struct BoxWorld {
    pub solids: Vec<Aabb>,
    pub hookables: Vec<(AreaId, Aabb)>,
}

impl BoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hookable areas get their index as id
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            solids: config.solids.iter().map(|r| Aabb::from(*r)).collect(),
            hookables: config
                .hookables
                .iter()
                .enumerate()
                .map(|(i, r)| (AreaId(i as u32), Aabb::from(*r)))
                .collect(),
        }
    }

    pub fn with_solid(mut self, solid: Aabb) -> Self {
        self.solids.push(solid);
        self
    }

    pub fn with_hookable(mut self, id: AreaId, area: Aabb) -> Self {
        self.hookables.push((id, area));
        self
    }

    /// Move along x then y, pushing out of any solid entered on each axis
    fn resolve_axis_separated(&self, start: Aabb, delta: Vec2) -> (Aabb, Vec2) {
        let mut b = start.translated(Vec2::new(delta.x, 0.0));
        let mut normal = Vec2::ZERO;
        for s in &self.solids {
            if b.overlaps(s) {
                if delta.x > 0.0 {
                    b = b.translated(Vec2::new(s.min.x - b.max.x, 0.0));
                    normal = Vec2::NEG_X;
                } else if delta.x < 0.0 {
                    b = b.translated(Vec2::new(s.max.x - b.min.x, 0.0));
                    normal = Vec2::X;
                }
            }
        }

        b = b.translated(Vec2::new(0.0, delta.y));
        for s in &self.solids {
            if b.overlaps(s) {
                if delta.y > 0.0 {
                    b = b.translated(Vec2::new(0.0, s.min.y - b.max.y));
                    normal = Vec2::NEG_Y;
                } else if delta.y < 0.0 {
                    b = b.translated(Vec2::new(0.0, s.max.y - b.min.y));
                    normal = Vec2::Y;
                }
            }
        }

        (b, normal)
    }
}

impl SpatialQuery for BoxWorld {
    fn move_and_collide(&self, position: Vec2, half_extents: Vec2, delta: Vec2) -> MoveResult {
        let start = Aabb::from_center(position, half_extents);

        // Resolve x first; a blocked x shortens the y travel by the same
        // fraction so the box stops near the first contact instead of sliding
        let (after_x, normal_x) = self.resolve_axis_separated(start, Vec2::new(delta.x, 0.0));
        let travelled_x = after_x.center().x - position.x;
        let fraction = if normal_x != Vec2::ZERO && delta.x != 0.0 {
            (travelled_x / delta.x).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let (end, normal_y) = self.resolve_axis_separated(after_x, Vec2::new(0.0, delta.y * fraction));
        let normal = if normal_y != Vec2::ZERO { normal_y } else { normal_x };
        MoveResult {
            position: end.center(),
            collided: normal != Vec2::ZERO,
            normal,
        }
    }

    fn move_and_slide(
        &self,
        position: Vec2,
        half_extents: Vec2,
        velocity: Vec2,
        dt: f32,
    ) -> MoveResult {
        let start = Aabb::from_center(position, half_extents);
        let (end, normal) = self.resolve_axis_separated(start, velocity * dt);
        MoveResult {
            position: end.center(),
            collided: normal != Vec2::ZERO,
            normal,
        }
    }

    fn hookable_overlaps(&self, bounds: Aabb) -> Vec<AreaId> {
        self.hookables
            .iter()
            .filter(|(_, area)| area.overlaps(&bounds))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Turns per-step overlap sets into enter/exit contact events
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    overlapping: BTreeSet<AreaId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff against the previous overlap set; exits are reported before enters
    pub fn update(&mut self, overlaps: &[AreaId]) -> Vec<ContactEvent> {
        let now: BTreeSet<AreaId> = overlaps.iter().copied().collect();
        let mut events: Vec<ContactEvent> = self
            .overlapping
            .difference(&now)
            .map(|id| ContactEvent::exited(*id))
            .collect();
        events.extend(now.difference(&self.overlapping).map(|id| ContactEvent::entered(*id)));
        self.overlapping = now;
        events
    }

    /// Leave every area at once
    pub fn clear(&mut self) -> Vec<ContactEvent> {
        self.update(&[])
    }

    pub fn is_overlapping(&self) -> bool {
        !self.overlapping.is_empty()
    }
}
