//! Player plus both guns, ticked in a fixed order

use crate::body::Movable;
use crate::gun::GrappleGun;
use crate::player::Player;
use crate::report::PhysicsReport;
use hookshot_core::{GameConfig, Result};
use hookshot_runtime::{
    ControlGroup, EventBus, InputState, RenderSink, RuntimeSystem, SpatialQuery, TickContext,
};

/// Owns the player and its two guns.
///
/// Each physics step both guns compute their pull from the report of the
/// previous step, then the player integrates and the fresh report is handed
/// back to the guns for the next step.
pub struct PlayerRig {
    player: Player,
    left: GrappleGun,
    right: GrappleGun,
}

impl PlayerRig {
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let player = Player::new(config.player.clone());
        let report = player.report();

        let mut left = GrappleGun::new(ControlGroup::Left, config.left_gun.clone(), config.rope.clone())?;
        let mut right =
            GrappleGun::new(ControlGroup::Right, config.right_gun.clone(), config.rope.clone())?;
        left.set_report(report);
        right.set_report(report);

        Ok(Self {
            player,
            left,
            right,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn gun(&self, side: ControlGroup) -> &GrappleGun {
        match side {
            ControlGroup::Left => &self.left,
            ControlGroup::Right => &self.right,
        }
    }

    pub fn report(&self) -> PhysicsReport {
        self.player.report()
    }

    pub fn start(&mut self, space: &dyn SpatialQuery, events: &mut EventBus) -> Result<()> {
        self.left.start(space, events)?;
        self.right.start(space, events)?;
        tracing::info!(spawn = ?self.player.position(), "player rig ready");
        Ok(())
    }

    pub fn update_frame(
        &mut self,
        dt: f32,
        input: &InputState,
        space: &dyn SpatialQuery,
        events: &mut EventBus,
    ) -> Result<()> {
        self.left
            .update_frame(dt, input.snapshot(ControlGroup::Left), space, events)?;
        self.right
            .update_frame(dt, input.snapshot(ControlGroup::Right), space, events)?;
        Ok(())
    }

    pub fn update_physics(
        &mut self,
        dt: f32,
        space: &dyn SpatialQuery,
        events: &mut EventBus,
    ) -> Result<PhysicsReport> {
        self.left.update_physics(dt, space, events)?;
        self.right.update_physics(dt, space, events)?;

        let pulls = [self.left.pull_acceleration(), self.right.pull_acceleration()];
        let braking = self.left.is_braking() || self.right.is_braking();
        let report = self.player.step(dt, &pulls, braking, space, events);

        self.left.set_report(report);
        self.right.set_report(report);
        Ok(report)
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        self.left.render(sink);
        self.right.render(sink);
    }
}

impl RuntimeSystem for PlayerRig {
    fn initialize(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        self.start(ctx.space, ctx.events)
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> Result<()> {
        self.update_frame(dt, ctx.input, ctx.space, ctx.events)
    }

    fn fixed_update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> Result<()> {
        self.update_physics(dt, ctx.space, ctx.events).map(|_| ())
    }

    fn name(&self) -> &str {
        "player_rig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gun::GunMode;
    use glam::Vec2;
    use hookshot_core::{GunConfig, PlayerConfig};
    use hookshot_runtime::{AimAxes, DrawList, GroupLevels, OpenSpace};

    const DT: f32 = 1.0 / 60.0;

    fn floating() -> GameConfig {
        GameConfig {
            player: PlayerConfig {
                gravity_accel: 0.0,
                drag: 0.0,
                ..PlayerConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn fire_right() -> GroupLevels {
        GroupLevels {
            aim: AimAxes {
                right: 1.0,
                ..AimAxes::default()
            },
            shoot: true,
            grab: false,
        }
    }

    #[test]
    fn guns_see_report_one_step_late() {
        let mut rig = PlayerRig::from_config(&GameConfig::default()).unwrap();
        let mut events = EventBus::new();
        rig.start(&OpenSpace, &mut events).unwrap();

        let first = rig.update_physics(DT, &OpenSpace, &mut events).unwrap();
        assert_eq!(
            rig.gun(ControlGroup::Left).barrel_position(),
            first.position + GunConfig::left().barrel_offset
        );

        let second = rig.update_physics(DT, &OpenSpace, &mut events).unwrap();
        assert!(second.position.y > first.position.y);
        assert_eq!(
            rig.gun(ControlGroup::Right).barrel_position(),
            second.position + GunConfig::right().barrel_offset
        );
    }

    #[test]
    fn firing_one_hand_leaves_the_other_idle() {
        let mut rig = PlayerRig::from_config(&floating()).unwrap();
        let mut events = EventBus::new();
        let mut input = InputState::new();
        let mut ctx = TickContext {
            input: &input,
            space: &OpenSpace,
            events: &mut events,
        };
        rig.initialize(&mut ctx).unwrap();

        input.set_levels(ControlGroup::Right, fire_right());
        let mut ctx = TickContext {
            input: &input,
            space: &OpenSpace,
            events: &mut events,
        };
        rig.update(&mut ctx, DT).unwrap();
        rig.fixed_update(&mut ctx, DT).unwrap();

        assert_eq!(rig.gun(ControlGroup::Right).mode(), GunMode::Shooting);
        assert_eq!(rig.gun(ControlGroup::Left).mode(), GunMode::Idle);
        assert_eq!(rig.name(), "player_rig");

        let mut draw = DrawList::new();
        rig.render(&mut draw);
        assert_eq!(draw.len(), 1);
    }

    #[test]
    fn idle_guns_do_not_move_player() {
        let mut rig = PlayerRig::from_config(&floating()).unwrap();
        let mut events = EventBus::new();
        rig.start(&OpenSpace, &mut events).unwrap();
        for _ in 0..10 {
            rig.update_physics(DT, &OpenSpace, &mut events).unwrap();
        }
        assert_eq!(rig.report().position, Vec2::ZERO);
        assert_eq!(rig.report().velocity, Vec2::ZERO);
    }
}
