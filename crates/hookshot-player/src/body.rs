//! Body capabilities backed by the engine's spatial queries

use glam::Vec2;
use hookshot_runtime::{Aabb, MoveResult, SpatialQuery};

/// Something with a world position
pub trait Movable {
    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);
}

/// A box-shaped body that moves through the spatial query provider
pub trait Collidable: Movable {
    fn half_extents(&self) -> Vec2;

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position(), self.half_extents())
    }

    /// Move by `delta`, stopping at the first contact
    fn move_and_collide(&mut self, space: &dyn SpatialQuery, delta: Vec2) -> MoveResult {
        let result = space.move_and_collide(self.position(), self.half_extents(), delta);
        self.set_position(result.position);
        result
    }

    /// Move by `velocity * dt`, sliding along contacts
    fn move_and_slide(&mut self, space: &dyn SpatialQuery, velocity: Vec2, dt: f32) -> MoveResult {
        let result = space.move_and_slide(self.position(), self.half_extents(), velocity, dt);
        self.set_position(result.position);
        result
    }
}

/// Plain kinematic box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub half_extents: Vec2,
}

impl KinematicBody {
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            half_extents,
        }
    }
}

impl Movable for KinematicBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl Collidable for KinematicBody {
    fn half_extents(&self) -> Vec2 {
        self.half_extents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookshot_runtime::{BoxWorld, OpenSpace};

    #[test]
    fn collide_writes_back_position() {
        let mut body = KinematicBody::new(Vec2::ZERO, Vec2::ONE);
        let r = body.move_and_collide(&OpenSpace, Vec2::new(3.0, -2.0));
        assert_eq!(body.position, Vec2::new(3.0, -2.0));
        assert_eq!(r.position, body.position);
    }

    #[test]
    fn slide_stops_at_wall() {
        let world = BoxWorld::new().with_solid(Aabb::new(Vec2::new(10.0, -50.0), Vec2::new(20.0, 50.0)));
        let mut body = KinematicBody::new(Vec2::ZERO, Vec2::ONE);
        let r = body.move_and_slide(&world, Vec2::new(100.0, 0.0), 1.0);
        assert!(r.collided);
        assert!((body.position.x - 9.0).abs() < 1e-5);
        assert_eq!(body.bounds().max.x, 10.0);
    }
}
