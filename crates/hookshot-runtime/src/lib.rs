//! Hookshot Runtime - Game loop infrastructure
//!
//! Provides the step-driven building blocks the gameplay core runs on:
//! - `GameClock` - fixed-timestep accumulator for deterministic physics
//! - `InputState` - per-control-group level inputs with edge detection
//! - `GameEvent` / `EventBus` - lifecycle and contact events for the host
//! - `StateMachine` / `Mode` - generic mode container with explicit context
//! - `SpatialQuery` - the engine's collision provider, plus headless stand-ins
//! - `RenderSink` - observational polyline/segment output
//! - `RuntimeSystem` - trait for systems ticked by the game loop

mod clock;
mod event;
mod event_bus;
mod input;
mod render;
pub mod space;
mod state_machine;
mod system;

pub use clock::GameClock;
pub use event::{ContactEvent, ContactKind, GameEvent};
pub use event_bus::EventBus;
pub use input::{AimAxes, ControlGroup, GroupLevels, GunInput, InputState};
pub use render::{DrawCommand, DrawList, RenderSink};
pub use space::{Aabb, BoxWorld, ContactTracker, MoveResult, OpenSpace, SpatialQuery};
pub use state_machine::{Mode, ProcessType, StateMachine, Transition};
pub use system::{RuntimeSystem, TickContext};
