//! Render feedback sink

use glam::Vec2;
use serde::Serialize;

/// Receives the shapes the simulation wants drawn this step.
///
/// Purely observational: nothing drawn here feeds back into simulation.
pub trait RenderSink {
    /// An open polyline through `points` in order
    fn polyline(&mut self, points: &[Vec2]);

    /// A single straight segment
    fn segment(&mut self, from: Vec2, to: Vec2);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Polyline { points: Vec<Vec2> },
    Segment { from: Vec2, to: Vec2 },
}

/// A sink that records draw calls, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderSink for DrawList {
    fn polyline(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
        });
    }

    fn segment(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Segment { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut list = DrawList::new();
        list.segment(Vec2::ZERO, Vec2::X);
        list.polyline(&[Vec2::ZERO, Vec2::Y, Vec2::ONE]);

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.commands()[0],
            DrawCommand::Segment {
                from: Vec2::ZERO,
                to: Vec2::X
            }
        );
        match &list.commands()[1] {
            DrawCommand::Polyline { points } => assert_eq!(points.len(), 3),
            other => panic!("unexpected command {other:?}"),
        }

        list.clear();
        assert!(list.is_empty());
    }
}
