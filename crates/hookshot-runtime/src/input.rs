//! Input state management

use glam::Vec2;
use hookshot_core::math::safe_normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which hand's controls a read refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlGroup {
    Left,
    Right,
}

impl ControlGroup {
    pub const ALL: [ControlGroup; 2] = [ControlGroup::Left, ControlGroup::Right];

    fn index(self) -> usize {
        match self {
            ControlGroup::Left => 0,
            ControlGroup::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControlGroup::Left => "left",
            ControlGroup::Right => "right",
        }
    }
}

impl fmt::Display for ControlGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength of the four directional aim axes, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimAxes {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

impl AimAxes {
    /// Normalized aim vector (y down); zero when the axes cancel out
    pub fn vector(&self) -> Vec2 {
        safe_normalize(Vec2::new(self.right - self.left, self.down - self.up))
    }
}

/// Level-triggered state of one control group as sampled this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupLevels {
    pub aim: AimAxes,
    pub shoot: bool,
    pub grab: bool,
}

/// Per-frame input handed to a grapple gun
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GunInput {
    /// Raw normalized aim; zero when no direction is held
    pub aim: Vec2,
    /// Shoot went down this frame
    pub shoot_pressed: bool,
    pub shoot_held: bool,
    /// Grab went down this frame
    pub grab_just_pressed: bool,
    pub grab_held: bool,
}

/// Tracks control-group input per frame and derives press edges
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Levels sampled this frame
    current: [GroupLevels; 2],
    /// Levels at the end of the previous frame
    previous: [GroupLevels; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sampled levels for a group
    pub fn set_levels(&mut self, group: ControlGroup, levels: GroupLevels) {
        self.current[group.index()] = levels;
    }

    pub fn levels(&self, group: ControlGroup) -> GroupLevels {
        self.current[group.index()]
    }

    pub fn is_shoot_held(&self, group: ControlGroup) -> bool {
        self.current[group.index()].shoot
    }

    pub fn is_shoot_just_pressed(&self, group: ControlGroup) -> bool {
        let i = group.index();
        self.current[i].shoot && !self.previous[i].shoot
    }

    pub fn is_grab_held(&self, group: ControlGroup) -> bool {
        self.current[group.index()].grab
    }

    pub fn is_grab_just_pressed(&self, group: ControlGroup) -> bool {
        let i = group.index();
        self.current[i].grab && !self.previous[i].grab
    }

    pub fn aim(&self, group: ControlGroup) -> Vec2 {
        self.current[group.index()].aim.vector()
    }

    /// Everything a gun reads for one frame
    pub fn snapshot(&self, group: ControlGroup) -> GunInput {
        GunInput {
            aim: self.aim(group),
            shoot_pressed: self.is_shoot_just_pressed(group),
            shoot_held: self.is_shoot_held(group),
            grab_just_pressed: self.is_grab_just_pressed(group),
            grab_held: self.is_grab_held(group),
        }
    }

    /// Call at end of frame so the next frame's edges compare against this one
    pub fn end_frame(&mut self) {
        self.previous = self.current;
    }
}
