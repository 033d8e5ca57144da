//! Game events emitted by the gameplay core

use crate::input::ControlGroup;
use glam::Vec2;
use hookshot_core::AreaId;

/// Whether a contact began or ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Entered,
    Exited,
}

/// A hook overlapping (or leaving) a hookable area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub kind: ContactKind,
    pub area: AreaId,
}

impl ContactEvent {
    pub fn entered(area: AreaId) -> Self {
        Self {
            kind: ContactKind::Entered,
            area,
        }
    }

    pub fn exited(area: AreaId) -> Self {
        Self {
            kind: ContactKind::Exited,
            area,
        }
    }
}

/// Events the core reports to its host.
///
/// Spawn/destroy pairs describe the object lifecycle the host mirrors in its
/// scene; both halves of an attach/detach always land in the same step.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ModeChanged {
        gun: ControlGroup,
        from: &'static str,
        to: &'static str,
    },
    HookDetached {
        gun: ControlGroup,
        position: Vec2,
    },
    HookReattached {
        gun: ControlGroup,
    },
    RopeSpawned {
        gun: ControlGroup,
        taut: bool,
    },
    RopeDestroyed {
        gun: ControlGroup,
        taut: bool,
    },
    Contact {
        gun: ControlGroup,
        contact: ContactEvent,
    },
    PlayerDied {
        position: Vec2,
    },
    PlayerRespawned {
        position: Vec2,
    },
}
