//! Scripted headless simulation

use super::script::InputScript;
use anyhow::{Context, Result};
use glam::Vec2;
use hookshot_core::GameConfig;
use hookshot_player::{Movable, PhysicsReport, PlayerRig};
use hookshot_runtime::{
    BoxWorld, ControlGroup, DrawCommand, DrawList, EventBus, GameClock, InputState,
    RuntimeSystem, TickContext,
};
use serde::Serialize;

/// Frames run without a script
const DEFAULT_FRAMES: u32 = 120;

pub struct SimulateArgs {
    pub config: String,
    pub script: Option<String>,
    pub frames: Option<u32>,
    pub format: String,
    pub ropes: bool,
}

#[derive(Serialize)]
struct GunRecord {
    mode: &'static str,
    hooked: bool,
    braking: bool,
    hook: Vec2,
    pull: Vec2,
}

#[derive(Serialize)]
struct FrameRecord {
    frame: u32,
    time: f64,
    physics_steps: u32,
    report: PhysicsReport,
    left: GunRecord,
    right: GunRecord,
    events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ropes: Option<Vec<DrawCommand>>,
}

fn gun_record(rig: &PlayerRig, side: ControlGroup) -> GunRecord {
    let gun = rig.gun(side);
    GunRecord {
        mode: gun.mode().name(),
        hooked: gun.is_hooked(),
        braking: gun.is_braking(),
        hook: gun.hook().position(),
        pull: gun.pull_acceleration(),
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let config = GameConfig::load(&args.config)
        .with_context(|| format!("Failed to load config '{}'", args.config))?;
    let script = match &args.script {
        Some(path) => InputScript::load(path)
            .with_context(|| format!("Failed to load script '{}'", path))?,
        None => InputScript::default(),
    };
    let frames = args.frames.unwrap_or(match script.total_frames() {
        0 => DEFAULT_FRAMES,
        n => n,
    });

    let world = BoxWorld::from_config(&config.world);
    let mut rig = PlayerRig::from_config(&config)?;
    let mut clock = GameClock::from_config(&config.clock);
    let mut input = InputState::new();
    let mut events = EventBus::new();

    rig.initialize(&mut TickContext {
        input: &input,
        space: &world,
        events: &mut events,
    })?;
    events.drain();

    // One rendered frame per fixed step
    let frame_time = clock.step_size();
    tracing::info!(frames, policy = ?config.rope.policy, "simulation started");

    let mut records = Vec::with_capacity(frames as usize);
    for frame in 0..frames {
        clock.advance(frame_time);
        for group in ControlGroup::ALL {
            input.set_levels(group, script.levels_at(frame, group));
        }

        let mut physics_steps = 0;
        {
            let mut ctx = TickContext {
                input: &input,
                space: &world,
                events: &mut events,
            };
            rig.update(&mut ctx, clock.frame_delta() as f32)?;
            while clock.should_fixed_update() {
                rig.fixed_update(&mut ctx, clock.step_size() as f32)?;
                clock.consume_fixed_step();
                physics_steps += 1;
            }
        }
        input.end_frame();

        let ropes = args.ropes.then(|| {
            let mut draw = DrawList::new();
            rig.render(&mut draw);
            draw.commands().to_vec()
        });

        records.push(FrameRecord {
            frame,
            time: clock.time(),
            physics_steps,
            report: rig.report(),
            left: gun_record(&rig, ControlGroup::Left),
            right: gun_record(&rig, ControlGroup::Right),
            events: events.drain().iter().map(|e| format!("{:?}", e)).collect(),
            ropes,
        });
    }

    tracing::info!(
        steps = clock.fixed_steps(),
        system = rig.name(),
        dead = rig.player().is_dead(),
        "simulation finished"
    );

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => print_text(&records),
    }
    Ok(())
}

fn print_text(records: &[FrameRecord]) {
    for r in records {
        println!(
            "{:>5} t={:.3} pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) left={}{} right={}{}",
            r.frame,
            r.time,
            r.report.position.x,
            r.report.position.y,
            r.report.velocity.x,
            r.report.velocity.y,
            r.left.mode,
            if r.left.hooked { "*" } else { "" },
            r.right.mode,
            if r.right.hooked { "*" } else { "" },
        );
        for event in &r.events {
            println!("        {}", event);
        }
        if let Some(ropes) = &r.ropes {
            for command in ropes {
                match command {
                    DrawCommand::Polyline { points } => {
                        println!("        rope: {} point(s)", points.len())
                    }
                    DrawCommand::Segment { from, to } => println!(
                        "        line: ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                        from.x, from.y, to.x, to.y
                    ),
                }
            }
        }
    }
}
