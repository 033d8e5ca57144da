//! Runtime system trait

use crate::event_bus::EventBus;
use crate::input::InputState;
use crate::space::SpatialQuery;
use hookshot_core::Result;

/// What the host lends a system for one callback
pub struct TickContext<'a> {
    pub input: &'a InputState,
    pub space: &'a dyn SpatialQuery,
    pub events: &'a mut EventBus,
}

/// A system that can be ticked by the game loop
///
/// `update` runs once per frame (input, aiming, frame transitions), while
/// `fixed_update` runs at a constant rate for deterministic simulation.
pub trait RuntimeSystem {
    /// Called once before the first tick
    fn initialize(&mut self, ctx: &mut TickContext<'_>) -> Result<()>;

    /// Called once per frame for variable-rate logic
    fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> Result<()>;

    /// Called at a fixed rate (e.g. 60Hz)
    fn fixed_update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
