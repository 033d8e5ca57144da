//! Queue of game events for the host

use crate::event::GameEvent;

/// Events raised during a tick, in the order they happened.
///
/// Guns and the player push; the host drains once per frame and mirrors
/// spawns and destroys in its scene.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Take everything queued so far
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ContactEvent;
    use crate::input::ControlGroup;
    use hookshot_core::AreaId;

    #[test]
    fn drain_keeps_push_order() {
        let mut bus = EventBus::new();
        let first = GameEvent::HookReattached {
            gun: ControlGroup::Left,
        };
        let second = GameEvent::Contact {
            gun: ControlGroup::Right,
            contact: ContactEvent::entered(AreaId(3)),
        };
        bus.push(first.clone());
        bus.push(second.clone());

        assert_eq!(bus.len(), 2);
        assert_eq!(bus.pending()[0], first);
        assert_eq!(bus.drain(), vec![first, second]);
        assert!(bus.is_empty());
    }

    #[test]
    fn second_drain_is_empty() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::RopeSpawned {
            gun: ControlGroup::Left,
            taut: false,
        });
        assert_eq!(bus.drain().len(), 1);
        assert!(bus.drain().is_empty());
    }
}
