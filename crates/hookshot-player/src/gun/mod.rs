//! Grapple gun.
//!
//! Each hand owns one gun. A gun reads its control group once per frame,
//! runs its active [`GunMode`] on frame and physics callbacks, and exposes a
//! pull acceleration plus a braking flag for the player integrator. The
//! player's [`PhysicsReport`] reaches the gun one step after it was produced.

mod modes;

pub use modes::GunMode;

use crate::hook::Hook;
use crate::report::PhysicsReport;
use glam::Vec2;
use hookshot_core::math::snap_direction;
use hookshot_core::{GunConfig, Result, RopeConfig};
use hookshot_rope::{Rope, RopeRng};
use hookshot_runtime::{
    ControlGroup, EventBus, GameEvent, GunInput, ProcessType, RenderSink, SpatialQuery,
    StateMachine,
};

/// Everything a gun mode reads or writes besides the mode itself
#[derive(Debug, Clone)]
pub struct GunState {
    /// Snapped unit aim direction
    pub aim: Vec2,
    /// Sprite orientation in radians
    pub orientation: f32,
    pub hook: Hook,
    /// In-flight rope while shooting, taut line while retracting
    pub rope: Option<Rope>,
    pub rng: RopeRng,
    /// Seconds until the hook may latch or be re-shot
    pub cooldown: f32,
    pub at_end_of_rope: bool,
    /// Hook flight was stopped by a solid on the last physics step
    pub blocked: bool,
    /// Pulling the player toward a latched hook
    pub hooked: bool,
    /// Hook travel per physics step while reeling in
    pub retract_step: f32,
    pub pull_acceleration: Vec2,
    pub braking: bool,
    pub shots: u32,
}

/// Borrowed view handed to mode handlers
pub struct GunContext<'a> {
    pub side: ControlGroup,
    pub config: &'a GunConfig,
    pub rope_config: &'a RopeConfig,
    pub state: &'a mut GunState,
    pub input: &'a GunInput,
    pub report: &'a PhysicsReport,
    pub space: &'a dyn SpatialQuery,
    pub events: &'a mut EventBus,
}

impl GunContext<'_> {
    /// Barrel position in world space
    pub fn barrel(&self) -> Vec2 {
        self.report.position + self.config.barrel_offset
    }
}

pub struct GrappleGun {
    side: ControlGroup,
    config: GunConfig,
    rope_config: RopeConfig,
    machine: StateMachine<GunMode>,
    state: GunState,
    input: GunInput,
    report: PhysicsReport,
}

impl GrappleGun {
    pub fn new(side: ControlGroup, config: GunConfig, rope_config: RopeConfig) -> Result<Self> {
        let machine = StateMachine::new(GunMode::Idle, &GunMode::ALL)?;
        let aim = snap_direction(config.initial_aim, config.snap_regions).unwrap_or(Vec2::X);
        let seed = rope_config.seed ^ (side as u32 + 1).wrapping_mul(0x9E37_79B9);
        let state = GunState {
            aim,
            orientation: aim.y.atan2(aim.x),
            hook: Hook::new(config.barrel_offset, config.hook_half_extents),
            rope: None,
            rng: RopeRng::new(seed),
            cooldown: 0.0,
            at_end_of_rope: false,
            blocked: false,
            hooked: false,
            retract_step: 0.0,
            pull_acceleration: Vec2::ZERO,
            braking: false,
            shots: 0,
        };

        Ok(Self {
            side,
            config,
            rope_config,
            machine,
            state,
            input: GunInput::default(),
            report: PhysicsReport::default(),
        })
    }

    pub fn side(&self) -> ControlGroup {
        self.side
    }

    pub fn mode(&self) -> GunMode {
        self.machine.current()
    }

    pub fn state(&self) -> &GunState {
        &self.state
    }

    pub fn hook(&self) -> &Hook {
        &self.state.hook
    }

    pub fn rope(&self) -> Option<&Rope> {
        self.state.rope.as_ref()
    }

    pub fn aim(&self) -> Vec2 {
        self.state.aim
    }

    pub fn is_hooked(&self) -> bool {
        self.state.hooked
    }

    pub fn pull_acceleration(&self) -> Vec2 {
        self.state.pull_acceleration
    }

    pub fn is_braking(&self) -> bool {
        self.state.braking
    }

    pub fn barrel_position(&self) -> Vec2 {
        self.report.position + self.config.barrel_offset
    }

    pub fn config(&self) -> &GunConfig {
        &self.config
    }

    /// Latest player report; used from the next physics step on
    pub fn set_report(&mut self, report: PhysicsReport) {
        self.report = report;
    }

    /// Enter the initial mode and park the hook on the barrel
    pub fn start(&mut self, space: &dyn SpatialQuery, events: &mut EventBus) -> Result<()> {
        let barrel = self.barrel_position();
        self.state.hook.reattach(barrel);
        let mut ctx = GunContext {
            side: self.side,
            config: &self.config,
            rope_config: &self.rope_config,
            state: &mut self.state,
            input: &self.input,
            report: &self.report,
            space,
            events,
        };
        self.machine.start(&mut ctx)
    }

    /// Per-frame update: read input, snap the aim, run frame logic.
    ///
    /// Press edges only count for the frame they arrive in; they are
    /// cleared before the physics steps of the same frame run.
    pub fn update_frame(
        &mut self,
        dt: f32,
        input: GunInput,
        space: &dyn SpatialQuery,
        events: &mut EventBus,
    ) -> Result<()> {
        self.input = input;
        match snap_direction(input.aim, self.config.snap_regions) {
            Some(aim) => self.state.aim = aim,
            None => {
                // Zero-length aim keeps the previous direction
            }
        }

        self.run(ProcessType::Frame, dt, space, events)?;

        self.input.shoot_pressed = false;
        self.input.grab_just_pressed = false;
        Ok(())
    }

    /// Per-physics-step update; call before the player integrates
    pub fn update_physics(
        &mut self,
        dt: f32,
        space: &dyn SpatialQuery,
        events: &mut EventBus,
    ) -> Result<()> {
        self.run(ProcessType::Physics, dt, space, events)
    }

    fn run(
        &mut self,
        kind: ProcessType,
        dt: f32,
        space: &dyn SpatialQuery,
        events: &mut EventBus,
    ) -> Result<()> {
        let mut ctx = GunContext {
            side: self.side,
            config: &self.config,
            rope_config: &self.rope_config,
            state: &mut self.state,
            input: &self.input,
            report: &self.report,
            space,
            events,
        };

        if let Some(t) = self.machine.process(&mut ctx, kind, dt)? {
            tracing::debug!(gun = %self.side, from = t.from.name(), to = t.to.name(), "gun mode changed");
            ctx.events.push(GameEvent::ModeChanged {
                gun: self.side,
                from: t.from.name(),
                to: t.to.name(),
            });
        }
        Ok(())
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        if let Some(rope) = &self.state.rope {
            rope.render(sink);
        }
    }
}
