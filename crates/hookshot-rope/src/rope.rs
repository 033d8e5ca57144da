//! Rope instance owned by a grapple gun

use crate::chain::JointChain;
use crate::rand::RopeRng;
use crate::verlet::VerletRope;
use glam::Vec2;
use hookshot_core::{RopeConfig, RopePolicyKind};
use hookshot_runtime::RenderSink;

/// World positions the rope ends are pinned to this step; `None` leaves an end free
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RopeEnds {
    pub start: Option<Vec2>,
    pub end: Option<Vec2>,
}

impl RopeEnds {
    pub fn both(start: Vec2, end: Vec2) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn start_only(start: Vec2) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn free() -> Self {
        Self::default()
    }
}

/// The simulation behind a slack rope
#[derive(Debug, Clone)]
pub enum RopeBody {
    Verlet(VerletRope),
    Chain(JointChain),
}

/// A rope between two anchors.
///
/// While taut the rope is drawn as a straight segment between its anchors and
/// nothing is simulated.
#[derive(Debug, Clone)]
pub struct Rope {
    body: Option<RopeBody>,
    taut: bool,
    ends: RopeEnds,
    points: Vec<Vec2>,
}

impl Rope {
    /// Slack rope using the configured policy, rooted at `origin`
    pub fn from_config(config: &RopeConfig, origin: Vec2, look: Vec2, rng: &mut RopeRng) -> Self {
        let body = match config.policy {
            RopePolicyKind::Verlet => RopeBody::Verlet(VerletRope::new(config, origin, rng)),
            RopePolicyKind::JointChain => RopeBody::Chain(JointChain::new(config, origin, look)),
        };
        Self::with_body(body)
    }

    pub fn with_body(body: RopeBody) -> Self {
        let mut rope = Self {
            body: Some(body),
            taut: false,
            ends: RopeEnds::free(),
            points: Vec::new(),
        };
        rope.sample();
        rope
    }

    /// A straight line between two anchors with no simulation behind it
    pub fn taut_line(start: Vec2, end: Vec2) -> Self {
        Self {
            body: None,
            taut: true,
            ends: RopeEnds::both(start, end),
            points: vec![start, end],
        }
    }

    pub fn is_taut(&self) -> bool {
        self.taut
    }

    /// Switch between taut and simulated. A rope built as a taut line has no
    /// simulation to fall back to and stays taut.
    pub fn set_taut(&mut self, taut: bool) {
        if !taut && self.body.is_none() {
            tracing::warn!("taut line has no rope simulation; staying taut");
            return;
        }
        self.taut = taut;
    }

    pub fn policy(&self) -> Option<RopePolicyKind> {
        match self.body {
            Some(RopeBody::Verlet(_)) => Some(RopePolicyKind::Verlet),
            Some(RopeBody::Chain(_)) => Some(RopePolicyKind::JointChain),
            None => None,
        }
    }

    pub fn body(&self) -> Option<&RopeBody> {
        self.body.as_ref()
    }

    pub fn ends(&self) -> RopeEnds {
        self.ends
    }

    /// Advance one physics step with the anchors at `ends`
    pub fn step(&mut self, dt: f32, ends: RopeEnds) {
        self.ends = ends;
        if !self.taut {
            match &mut self.body {
                Some(RopeBody::Verlet(rope)) => rope.step(dt, ends),
                Some(RopeBody::Chain(chain)) => chain.step(dt, ends),
                None => {}
            }
        }
        self.sample();
    }

    fn sample(&mut self) {
        self.points.clear();
        if self.taut {
            if let (Some(start), Some(end)) = (self.ends.start, self.ends.end) {
                self.points.push(start);
                self.points.push(end);
            }
            return;
        }
        match &self.body {
            Some(RopeBody::Verlet(rope)) => self.points.extend(rope.positions()),
            Some(RopeBody::Chain(chain)) => self.points.extend(chain.positions()),
            None => {}
        }
    }

    /// Points sampled at the end of the last step, root first
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        if self.taut {
            if let &[start, end] = self.points.as_slice() {
                sink.segment(start, end);
            }
        } else if self.points.len() >= 2 {
            sink.polyline(&self.points);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookshot_runtime::{DrawCommand, DrawList};

    #[test]
    fn taut_line_renders_segment_between_anchors() {
        let mut rope = Rope::taut_line(Vec2::ZERO, Vec2::new(30.0, 0.0));
        rope.step(1.0 / 60.0, RopeEnds::both(Vec2::new(1.0, 1.0), Vec2::new(40.0, 2.0)));

        let mut draw = DrawList::new();
        rope.render(&mut draw);
        assert_eq!(
            draw.commands(),
            &[DrawCommand::Segment {
                from: Vec2::new(1.0, 1.0),
                to: Vec2::new(40.0, 2.0)
            }]
        );
        assert!(rope.policy().is_none());
    }

    #[test]
    fn taut_line_cannot_go_slack() {
        let mut rope = Rope::taut_line(Vec2::ZERO, Vec2::X);
        rope.set_taut(false);
        assert!(rope.is_taut());
    }

    #[test]
    fn verlet_rope_renders_polyline_of_all_particles() {
        let config = RopeConfig {
            particle_count: 9,
            ..RopeConfig::default()
        };
        let mut rng = RopeRng::new(5);
        let mut rope = Rope::from_config(&config, Vec2::ZERO, Vec2::X, &mut rng);
        rope.step(1.0 / 60.0, RopeEnds::both(Vec2::ZERO, Vec2::new(50.0, 0.0)));

        assert_eq!(rope.points().len(), 9);
        assert_eq!(rope.points()[0], Vec2::ZERO);
        assert_eq!(rope.points()[8], Vec2::new(50.0, 0.0));

        let mut draw = DrawList::new();
        rope.render(&mut draw);
        assert!(matches!(&draw.commands()[0], DrawCommand::Polyline { points } if points.len() == 9));
    }

    #[test]
    fn taut_flag_freezes_simulation() {
        let config = RopeConfig {
            policy: RopePolicyKind::JointChain,
            segment_count: 4,
            ..RopeConfig::default()
        };
        let mut rng = RopeRng::new(5);
        let mut rope = Rope::from_config(&config, Vec2::ZERO, Vec2::X, &mut rng);
        rope.step(1.0 / 60.0, RopeEnds::start_only(Vec2::ZERO));
        let slack_points = rope.points().to_vec();

        rope.set_taut(true);
        rope.step(1.0 / 60.0, RopeEnds::both(Vec2::ZERO, Vec2::new(20.0, 0.0)));
        assert_eq!(rope.points(), &[Vec2::ZERO, Vec2::new(20.0, 0.0)]);

        if let Some(RopeBody::Chain(chain)) = rope.body() {
            let frozen: Vec<Vec2> = chain.positions().collect();
            assert_eq!(frozen, slack_points);
        } else {
            panic!("expected joint chain");
        }
    }
}
