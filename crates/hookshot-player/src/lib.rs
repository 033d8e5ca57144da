//! Hookshot Player - the grapple-gun gameplay core
//!
//! - `GrappleGun` - per-hand mode machine (idle, shooting, retracting)
//!   producing a pull acceleration
//! - `Hook` - the projectile at the end of the rope
//! - `Player` - integrates pull, gravity and drag into body motion
//! - `PlayerRig` - owns the player and both guns, and orders their updates
//!   as a `RuntimeSystem`

pub mod body;
pub mod gun;
pub mod hook;
pub mod player;
mod report;
pub mod rig;

pub use body::{Collidable, KinematicBody, Movable};
pub use gun::{GrappleGun, GunMode};
pub use hook::{Hook, HookAttachment};
pub use player::Player;
pub use report::PhysicsReport;
pub use rig::PlayerRig;
