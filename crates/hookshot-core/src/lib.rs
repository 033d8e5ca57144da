//! Hookshot Core - Foundational types for the grapple-gun platformer core
//!
//! This crate provides the types every other Hookshot crate depends on:
//! - `AreaId` - Identifiers for hookable contact regions
//! - `math` - 2D vector helpers on top of `glam::Vec2`
//! - `GameConfig` and friends - TOML-backed tuning values
//! - Error types and Result alias

pub mod config;
mod error;
mod id;
pub mod math;

pub use config::{
    ClockConfig, GameConfig, GunConfig, PlayerConfig, RectConfig, RopeConfig, RopePolicyKind,
    WorldConfig,
};
pub use error::{HookshotError, Result};
pub use glam::Vec2;
pub use id::AreaId;
