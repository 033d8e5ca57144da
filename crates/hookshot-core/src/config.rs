//! Tuning values for the player, guns, rope and test world.
//!
//! All tables are optional in TOML; missing fields fall back to the
//! defaults below. Call [`GameConfig::validate`] after loading.

use crate::error::{HookshotError, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub clock: ClockConfig,
    pub player: PlayerConfig,
    pub left_gun: GunConfig,
    pub right_gun: GunConfig,
    pub rope: RopeConfig,
    pub world: WorldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            player: PlayerConfig::default(),
            left_gun: GunConfig::left(),
            right_gun: GunConfig::right(),
            rope: RopeConfig::default(),
            world: WorldConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        self.clock.validate()?;
        self.player.validate()?;
        self.left_gun.validate("left_gun")?;
        self.right_gun.validate("right_gun")?;
        self.rope.validate()?;
        self.world.validate()
    }
}

/// Fixed-step clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Physics steps per second
    pub fixed_hz: f64,
    /// Longest frame the accumulator will absorb, in seconds
    pub max_frame_time: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 60.0,
            max_frame_time: 0.25,
        }
    }
}

impl ClockConfig {
    fn validate(&self) -> Result<()> {
        check_range("clock.fixed_hz", self.fixed_hz, 1.0, 1000.0)?;
        check_range("clock.max_frame_time", self.max_frame_time, 0.001, 10.0)
    }
}

/// Player body integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub gravity_accel: f32,
    /// Quadratic drag coefficient
    pub drag: f32,
    /// Linear drag applied while a gun reports braking
    pub brake_drag: f32,
    /// Falling below this y coordinate kills the player
    pub kill_floor: f32,
    pub debug_respawn: bool,
    pub spawn: Vec2,
    pub half_extents: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gravity_accel: 980.0,
            drag: 0.0004,
            brake_drag: 6.0,
            kill_floor: 2000.0,
            debug_respawn: false,
            spawn: Vec2::ZERO,
            half_extents: Vec2::new(12.0, 16.0),
        }
    }
}

impl PlayerConfig {
    fn validate(&self) -> Result<()> {
        check_range("player.gravity_accel", self.gravity_accel as f64, 0.0, 1.0e5)?;
        check_range("player.drag", self.drag as f64, 0.0, 1.0)?;
        check_range("player.brake_drag", self.brake_drag as f64, 0.0, 1.0e3)?;
        check_extents("player.half_extents", self.half_extents)
    }
}

/// Settings for one grapple gun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunConfig {
    pub hook_exit_speed: f32,
    pub max_rope_length: f32,
    pub retract_speed: f32,
    pub pull_accel: f32,
    /// Closer than this to the hook the gun stops pulling and brakes
    pub stop_distance: f32,
    /// Seconds after a shot before it can latch or re-shoot
    pub retract_cooldown: f32,
    /// Number of discrete aim directions
    pub snap_regions: u32,
    /// Slerp weight toward the reflected velocity, in [0, 1]
    pub pull_correction: f32,
    /// Barrel position relative to the player body
    pub barrel_offset: Vec2,
    pub hook_half_extents: Vec2,
    /// Aim used before any input arrives
    pub initial_aim: Vec2,
    /// Enter the unfinished loose-rope mode at the end of the rope
    pub loose_rope: bool,
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            hook_exit_speed: 900.0,
            max_rope_length: 400.0,
            retract_speed: 1200.0,
            pull_accel: 2400.0,
            stop_distance: 24.0,
            retract_cooldown: 0.15,
            snap_regions: 16,
            pull_correction: 0.3,
            barrel_offset: Vec2::new(0.0, -4.0),
            hook_half_extents: Vec2::new(4.0, 4.0),
            initial_aim: Vec2::X,
            loose_rope: false,
        }
    }
}

impl GunConfig {
    pub fn left() -> Self {
        Self {
            barrel_offset: Vec2::new(-10.0, -4.0),
            initial_aim: Vec2::NEG_X,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            barrel_offset: Vec2::new(10.0, -4.0),
            ..Self::default()
        }
    }

    fn validate(&self, table: &str) -> Result<()> {
        let field = |name: &str| format!("{table}.{name}");
        check_range(&field("hook_exit_speed"), self.hook_exit_speed as f64, 0.0, 1.0e5)?;
        check_range(&field("max_rope_length"), self.max_rope_length as f64, 1.0, 1.0e5)?;
        check_range(&field("retract_speed"), self.retract_speed as f64, 1.0, 1.0e5)?;
        check_range(&field("pull_accel"), self.pull_accel as f64, 0.0, 1.0e6)?;
        check_range(&field("stop_distance"), self.stop_distance as f64, 0.0, 1.0e4)?;
        check_range(&field("retract_cooldown"), self.retract_cooldown as f64, 0.0, 60.0)?;
        check_range(&field("snap_regions"), self.snap_regions as f64, 0.0, 360.0)?;
        check_range(&field("pull_correction"), self.pull_correction as f64, 0.0, 1.0)?;
        check_extents(&field("hook_half_extents"), self.hook_half_extents)?;
        if self.initial_aim.length_squared() == 0.0 {
            return Err(HookshotError::InvalidConfig(format!(
                "{} must not be zero",
                field("initial_aim")
            )));
        }
        Ok(())
    }
}

/// Which rope simulation a gun spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RopePolicyKind {
    Verlet,
    JointChain,
}

/// Rope simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RopeConfig {
    pub policy: RopePolicyKind,
    pub particle_count: usize,
    /// Constraint relaxation passes per step
    pub iterations: usize,
    pub gravity_accel: f32,
    /// Rest length between neighbouring particles or segments
    pub rest_length: f32,
    /// Fraction of implicit velocity kept each step; 1.0 is undamped
    pub damping: f32,
    pub segment_count: usize,
    /// Seed for the particle placement PRNG
    pub seed: u32,
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            policy: RopePolicyKind::Verlet,
            particle_count: 32,
            iterations: 10,
            gravity_accel: 980.0,
            rest_length: 12.0,
            damping: 1.0,
            segment_count: 12,
            seed: 0x5EED_CAFE,
        }
    }
}

impl RopeConfig {
    fn validate(&self) -> Result<()> {
        check_range("rope.particle_count", self.particle_count as f64, 2.0, 4096.0)?;
        check_range("rope.iterations", self.iterations as f64, 1.0, 256.0)?;
        check_range("rope.gravity_accel", self.gravity_accel as f64, 0.0, 1.0e5)?;
        check_range("rope.rest_length", self.rest_length as f64, 0.01, 1.0e4)?;
        check_range("rope.damping", self.damping as f64, 0.0, 1.0)?;
        check_range("rope.segment_count", self.segment_count as f64, 2.0, 4096.0)
    }
}

/// Axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectConfig {
    pub min: Vec2,
    pub max: Vec2,
}

/// Static level geometry for headless runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub solids: Vec<RectConfig>,
    /// Hookable regions; their index is their area id
    pub hookables: Vec<RectConfig>,
}

impl WorldConfig {
    fn validate(&self) -> Result<()> {
        for (i, rect) in self.solids.iter().chain(self.hookables.iter()).enumerate() {
            if rect.min.x > rect.max.x || rect.min.y > rect.max.y {
                return Err(HookshotError::InvalidConfig(format!(
                    "world rect #{i} has min {:?} beyond max {:?}",
                    rect.min, rect.max
                )));
            }
        }
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(HookshotError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        })
    }
}

fn check_extents(field: &str, extents: Vec2) -> Result<()> {
    if extents.x > 0.0 && extents.y > 0.0 {
        Ok(())
    } else {
        Err(HookshotError::InvalidConfig(format!(
            "{field} must be positive, got {extents:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn rope_damping_is_opt_in() {
        assert_eq!(RopeConfig::default().damping, 1.0);
        let config = GameConfig::from_toml_str("[rope]\ndamping = 0.98\n").unwrap();
        assert_eq!(config.rope.damping, 0.98);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_table_overrides_fields() {
        let config = GameConfig::from_toml_str(
            r#"
            [player]
            drag = 0.0
            debug_respawn = true

            [rope]
            policy = "joint_chain"
            segment_count = 6

            [[world.hookables]]
            min = [100.0, -50.0]
            max = [140.0, -10.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.player.drag, 0.0);
        assert!(config.player.debug_respawn);
        assert_eq!(config.player.gravity_accel, 980.0);
        assert_eq!(config.rope.policy, RopePolicyKind::JointChain);
        assert_eq!(config.rope.segment_count, 6);
        assert_eq!(config.world.hookables.len(), 1);
        assert_eq!(config.world.hookables[0].max, Vec2::new(140.0, -10.0));
    }

    #[test]
    fn out_of_range_names_field() {
        let err = GameConfig::from_toml_str("[right_gun]\npull_correction = 2.0\n").unwrap_err();
        match err {
            HookshotError::ValueOutOfRange { field, value, .. } => {
                assert_eq!(field, "right_gun.pull_correction");
                assert_eq!(value, 2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inverted_rect_rejected() {
        let err = GameConfig::from_toml_str(
            "[[world.solids]]\nmin = [10.0, 10.0]\nmax = [0.0, 20.0]\n",
        )
        .unwrap_err();
        assert!(matches!(err, HookshotError::InvalidConfig(_)));
    }

    #[test]
    fn toml_round_trip_preserves_sides() {
        let config = GameConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = GameConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.left_gun.barrel_offset, Vec2::new(-10.0, -4.0));
        assert_eq!(parsed.right_gun.initial_aim, Vec2::X);
    }
}
