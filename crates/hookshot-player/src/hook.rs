//! The grapple hook

use crate::body::{Collidable, KinematicBody, Movable};
use glam::Vec2;
use hookshot_core::math::safe_normalize;
use hookshot_runtime::{ContactEvent, ContactKind, ContactTracker, MoveResult, SpatialQuery};

/// Where the hook currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAttachment {
    /// Parked on the gun barrel, following it
    Barrel,
    /// Flying or being reeled in on its own
    Free,
}

/// Projectile that can latch onto hookable surfaces.
///
/// `touching_hookable` follows the last contact event received; overlapping
/// areas are not counted, so leaving any one of them clears the flag.
#[derive(Debug, Clone)]
pub struct Hook {
    body: KinematicBody,
    velocity: Vec2,
    /// Facing angle in radians
    facing: f32,
    touching_hookable: bool,
    attachment: HookAttachment,
    contacts: ContactTracker,
}

impl Hook {
    pub fn new(barrel: Vec2, half_extents: Vec2) -> Self {
        Self {
            body: KinematicBody::new(barrel, half_extents),
            velocity: Vec2::ZERO,
            facing: 0.0,
            touching_hookable: false,
            attachment: HookAttachment::Barrel,
            contacts: ContactTracker::new(),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn is_touching_hookable(&self) -> bool {
        self.touching_hookable
    }

    pub fn attachment(&self) -> HookAttachment {
        self.attachment
    }

    /// Leave the barrel at `position` flying with `velocity`
    pub fn detach(&mut self, position: Vec2, velocity: Vec2) {
        self.attachment = HookAttachment::Free;
        self.body.position = position;
        self.velocity = velocity;
        self.face_velocity();
    }

    /// Park on the barrel at its local origin
    pub fn reattach(&mut self, barrel: Vec2) {
        self.attachment = HookAttachment::Barrel;
        self.body.position = barrel;
        self.velocity = Vec2::ZERO;
    }

    /// Keep a parked hook on a moving barrel
    pub fn follow(&mut self, barrel: Vec2) {
        if self.attachment == HookAttachment::Barrel {
            self.body.position = barrel;
        }
    }

    /// Free flight: slide along the velocity and face it
    pub fn advance(&mut self, space: &dyn SpatialQuery, dt: f32) -> MoveResult {
        let velocity = self.velocity;
        let result = self.move_and_slide(space, velocity, dt);
        self.face_velocity();
        result
    }

    /// Kinematic move straight toward `target`, at most `max_step` far.
    /// Returns the distance left afterwards.
    pub fn move_toward(&mut self, target: Vec2, max_step: f32) -> f32 {
        let offset = target - self.body.position;
        let distance = offset.length();
        if distance <= max_step {
            self.body.position = target;
            return 0.0;
        }
        self.body.position += offset / distance * max_step;
        distance - max_step
    }

    fn face_velocity(&mut self) {
        let dir = safe_normalize(self.velocity);
        if dir != Vec2::ZERO {
            self.facing = dir.y.atan2(dir.x);
        }
    }

    /// Apply a contact event from a hookable area
    pub fn on_contact(&mut self, event: ContactEvent) {
        self.touching_hookable = match event.kind {
            ContactKind::Entered => true,
            ContactKind::Exited => false,
        };
    }

    /// Ask the provider what the hook overlaps and apply the resulting
    /// enter/exit events in order
    pub fn sense_contacts(&mut self, space: &dyn SpatialQuery) -> Vec<ContactEvent> {
        let overlaps = space.hookable_overlaps(self.bounds());
        let events = self.contacts.update(&overlaps);
        for event in &events {
            self.on_contact(*event);
        }
        events
    }
}

impl Movable for Hook {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.body.position = position;
    }
}

impl Collidable for Hook {
    fn half_extents(&self) -> Vec2 {
        self.body.half_extents
    }
}
