//! Player body integrator

use crate::body::{Collidable, KinematicBody, Movable};
use crate::report::PhysicsReport;
use glam::Vec2;
use hookshot_core::math::{safe_normalize, DOWN};
use hookshot_core::PlayerConfig;
use hookshot_runtime::{EventBus, GameEvent, SpatialQuery};

/// The body both guns pull on
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    body: KinematicBody,
    velocity: Vec2,
    last_velocity: Vec2,
    report: PhysicsReport,
    dead: bool,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        let body = KinematicBody::new(config.spawn, config.half_extents);
        Self {
            report: PhysicsReport::at_rest(config.spawn),
            config,
            body,
            velocity: Vec2::ZERO,
            last_velocity: Vec2::ZERO,
            dead: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn report(&self) -> PhysicsReport {
        self.report
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// One physics step.
    ///
    /// `pulls` are the gun accelerations already scaled by `dt`. `braking`
    /// adds linear drag on top of the quadratic drag.
    pub fn step(
        &mut self,
        dt: f32,
        pulls: &[Vec2],
        braking: bool,
        space: &dyn SpatialQuery,
        events: &mut EventBus,
    ) -> PhysicsReport {
        self.last_velocity = self.velocity;

        self.velocity += pulls.iter().copied().sum::<Vec2>();
        self.velocity += DOWN * self.config.gravity_accel * dt;

        let speed_sq = self.velocity.length_squared();
        self.velocity -= safe_normalize(self.velocity) * speed_sq * self.config.drag * dt;

        if braking {
            let factor = (self.config.brake_drag * dt).min(1.0);
            self.velocity -= self.velocity * factor;
        }

        let result = self.body.move_and_collide(space, self.velocity * dt);
        if result.collided && self.velocity.dot(result.normal) < 0.0 {
            // Lose the speed going into the surface
            self.velocity -= result.normal * self.velocity.dot(result.normal);
        }

        self.check_kill_floor(events);

        self.report = PhysicsReport::new(self.body.position, self.velocity, self.last_velocity);
        self.report
    }

    fn check_kill_floor(&mut self, events: &mut EventBus) {
        let position = self.body.position;
        if position.y <= self.config.kill_floor {
            return;
        }

        if self.config.debug_respawn {
            let spawn = self.config.spawn;
            self.body.set_position(spawn);
            self.velocity = Vec2::ZERO;
            self.last_velocity = Vec2::ZERO;
            tracing::info!(from = ?position, to = ?spawn, "player respawned");
            events.push(GameEvent::PlayerRespawned { position: spawn });
        } else if !self.dead {
            self.dead = true;
            tracing::warn!(at = ?position, "player fell below the kill floor");
            events.push(GameEvent::PlayerDied { position });
        }
    }
}

impl Movable for Player {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.body.position = position;
    }
}

impl Collidable for Player {
    fn half_extents(&self) -> Vec2 {
        self.body.half_extents
    }
}
