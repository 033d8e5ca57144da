//! Gun mode handlers

use super::GunContext;
use crate::body::Movable;
use glam::Vec2;
use hookshot_core::math::{project, reflect, safe_normalize, slerp};
use hookshot_core::{HookshotError, Result};
use hookshot_rope::{Rope, RopeEnds};
use hookshot_runtime::{GameEvent, Mode, ProcessType};

/// Squared-distance slack for the end-of-rope test
const END_OF_ROPE_SLACK: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GunMode {
    Idle,
    Shooting,
    Retracting,
    /// Experimental, only reachable with `loose_rope` enabled
    LooseRope,
}

impl GunMode {
    pub const ALL: [GunMode; 4] = [
        GunMode::Idle,
        GunMode::Shooting,
        GunMode::Retracting,
        GunMode::LooseRope,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GunMode::Idle => "idle",
            GunMode::Shooting => "shooting",
            GunMode::Retracting => "retracting",
            GunMode::LooseRope => "loose_rope",
        }
    }
}

impl std::fmt::Display for GunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn loose_rope() -> HookshotError {
    HookshotError::NotImplemented("loose rope mode".into())
}

impl<'a> Mode<GunContext<'a>> for GunMode {
    fn on_enter(self, ctx: &mut GunContext<'a>) -> Result<()> {
        match self {
            GunMode::Idle => {
                ctx.state.pull_acceleration = Vec2::ZERO;
                ctx.state.braking = false;
            }
            GunMode::Shooting => enter_shooting(ctx),
            GunMode::Retracting => {
                let barrel = ctx.barrel();
                let state = &mut *ctx.state;
                state.hooked = ctx.input.grab_held && state.hook.is_touching_hookable();
                state.retract_step = 0.0;
                state.rope = Some(Rope::taut_line(barrel, state.hook.position()));
                ctx.events.push(GameEvent::RopeSpawned {
                    gun: ctx.side,
                    taut: true,
                });
                if state.hooked {
                    tracing::debug!(gun = %ctx.side, at = ?state.hook.position(), "hook latched");
                }
            }
            GunMode::LooseRope => return Err(loose_rope()),
        }
        Ok(())
    }

    fn on_exit(self, ctx: &mut GunContext<'a>) -> Result<()> {
        match self {
            GunMode::Idle => {}
            GunMode::Shooting => destroy_rope(ctx),
            GunMode::Retracting => {
                destroy_rope(ctx);
                let barrel = ctx.barrel();
                ctx.state.hook.reattach(barrel);
                ctx.events.push(GameEvent::HookReattached { gun: ctx.side });
                ctx.state.pull_acceleration = Vec2::ZERO;
                ctx.state.braking = false;
                ctx.state.hooked = false;
            }
            GunMode::LooseRope => return Err(loose_rope()),
        }
        Ok(())
    }

    fn process(self, ctx: &mut GunContext<'a>, kind: ProcessType, dt: f32) -> Result<()> {
        match (self, kind) {
            (GunMode::LooseRope, _) => return Err(loose_rope()),
            (GunMode::Idle, ProcessType::Frame) => {
                let aim = ctx.state.aim;
                ctx.state.orientation = aim.y.atan2(aim.x);
                let barrel = ctx.barrel();
                ctx.state.hook.follow(barrel);
            }
            (GunMode::Idle, ProcessType::Physics) => {
                ctx.state.pull_acceleration = Vec2::ZERO;
                let barrel = ctx.barrel();
                ctx.state.hook.follow(barrel);
                sense_contacts(ctx);
            }
            (GunMode::Shooting, ProcessType::Physics) => shooting_physics(ctx, dt),
            (GunMode::Retracting, ProcessType::Physics) => retracting_physics(ctx, dt),
            (GunMode::Shooting | GunMode::Retracting, ProcessType::Frame) => {}
        }
        Ok(())
    }

    fn transition(self, ctx: &GunContext<'a>) -> Option<Self> {
        let state = &*ctx.state;
        let input = ctx.input;
        match self {
            GunMode::Idle => input.shoot_pressed.then_some(GunMode::Shooting),
            GunMode::Shooting => {
                let cooled = state.cooldown <= 0.0;
                let stopped = state.at_end_of_rope || state.blocked;
                if stopped && !input.shoot_held {
                    Some(GunMode::Retracting)
                } else if cooled && state.hook.is_touching_hookable() && input.grab_held {
                    Some(GunMode::Retracting)
                } else if state.at_end_of_rope && input.shoot_held && ctx.config.loose_rope {
                    Some(GunMode::LooseRope)
                } else if cooled && input.shoot_pressed {
                    Some(GunMode::Shooting)
                } else {
                    None
                }
            }
            GunMode::Retracting => {
                let distance = (state.hook.position() - ctx.barrel()).length();
                (!state.hooked && distance <= state.retract_step).then_some(GunMode::Idle)
            }
            GunMode::LooseRope => None,
        }
    }
}

fn enter_shooting(ctx: &mut GunContext<'_>) {
    // Leftovers from a retract that never exited cleanly
    destroy_rope(ctx);

    let barrel = ctx.barrel();
    let state = &mut *ctx.state;
    let velocity = state.aim * ctx.config.hook_exit_speed;
    state.hook.detach(barrel, velocity);
    ctx.events.push(GameEvent::HookDetached {
        gun: ctx.side,
        position: barrel,
    });

    state.rope = Some(Rope::from_config(
        ctx.rope_config,
        barrel,
        state.aim,
        &mut state.rng,
    ));
    ctx.events.push(GameEvent::RopeSpawned {
        gun: ctx.side,
        taut: false,
    });

    state.cooldown = ctx.config.retract_cooldown;
    state.at_end_of_rope = false;
    state.blocked = false;
    state.hooked = false;
    state.shots += 1;
}

fn destroy_rope(ctx: &mut GunContext<'_>) {
    if let Some(rope) = ctx.state.rope.take() {
        ctx.events.push(GameEvent::RopeDestroyed {
            gun: ctx.side,
            taut: rope.is_taut(),
        });
    }
}

fn sense_contacts(ctx: &mut GunContext<'_>) {
    for contact in ctx.state.hook.sense_contacts(ctx.space) {
        ctx.events.push(GameEvent::Contact {
            gun: ctx.side,
            contact,
        });
    }
}

fn step_rope(ctx: &mut GunContext<'_>, dt: f32) {
    let ends = RopeEnds::both(ctx.barrel(), ctx.state.hook.position());
    if let Some(rope) = ctx.state.rope.as_mut() {
        rope.step(dt, ends);
    }
}

fn shooting_physics(ctx: &mut GunContext<'_>, dt: f32) {
    let barrel = ctx.barrel();
    let max = ctx.config.max_rope_length;

    let flight = ctx.state.hook.advance(ctx.space, dt);
    ctx.state.blocked = flight.collided;

    let offset = ctx.state.hook.position() - barrel;
    ctx.state.at_end_of_rope = offset.length_squared() >= max * max - END_OF_ROPE_SLACK;
    if ctx.state.at_end_of_rope {
        // Hold the hook on the rope's reach
        let clamped = barrel + safe_normalize(offset) * max;
        ctx.state.hook.set_position(clamped);
    }
    ctx.state.cooldown -= dt;

    sense_contacts(ctx);
    step_rope(ctx, dt);
}

fn retracting_physics(ctx: &mut GunContext<'_>, dt: f32) {
    let barrel = ctx.barrel();
    let config = ctx.config;
    let state = &mut *ctx.state;

    if state.hooked && !ctx.input.grab_held {
        state.hooked = false;
        tracing::debug!(gun = %ctx.side, "hook released");
    }

    if state.hooked {
        let heading = state.hook.position() - barrel;
        if heading.length() <= config.stop_distance {
            state.pull_acceleration = Vec2::ZERO;
            state.braking = true;
        } else {
            let direction = pull_direction(heading, ctx.report.velocity, config.pull_correction);
            state.pull_acceleration = direction * config.pull_accel * dt;
            state.braking = false;
        }
    } else {
        state.pull_acceleration = Vec2::ZERO;
        state.braking = false;
        state.retract_step = config.retract_speed * dt;
        state.hook.move_toward(barrel, state.retract_step);
    }

    sense_contacts(ctx);
    step_rope(ctx, dt);
}

/// Direction to pull the player along a latched rope.
///
/// Heads for the hook while cancelling sideways drift, then turns toward the
/// velocity mirrored across the rope by `correction` of the angle between
/// them.
pub(crate) fn pull_direction(heading: Vec2, velocity: Vec2, correction: f32) -> Vec2 {
    let drift = velocity - project(velocity, heading);
    let base = safe_normalize(heading - drift);
    let mirrored = safe_normalize(reflect(velocity, heading));
    if base == Vec2::ZERO || mirrored == Vec2::ZERO {
        return base;
    }
    safe_normalize(slerp(base, mirrored, correction))
}
