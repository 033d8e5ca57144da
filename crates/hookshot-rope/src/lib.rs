//! Hookshot Rope - constrained chain simulation
//!
//! Provides the rope a grapple gun strings between its barrel and hook:
//! - `VerletRope` - particles with distance constraints and pinned ends
//! - `JointChain` - rigid segments jointed end to end
//! - `Rope` - owns one of the above, or none when taut, and renders it

pub mod chain;
pub mod rand;
mod rope;
pub mod verlet;

pub use chain::JointChain;
pub use rand::RopeRng;
pub use rope::{Rope, RopeBody, RopeEnds};
pub use verlet::{VerletParticle, VerletRope};
