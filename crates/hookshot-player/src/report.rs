//! Per-step snapshot of the player body

use glam::Vec2;
use serde::Serialize;

/// Player kinematics after one physics step.
///
/// Replaced wholesale every step by the player and read by both guns on the
/// step after it was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PhysicsReport {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Previous velocity minus current velocity
    pub acceleration: Vec2,
}

impl PhysicsReport {
    pub fn new(position: Vec2, velocity: Vec2, previous_velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration: previous_velocity - velocity,
        }
    }

    /// Report for a body at rest
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
