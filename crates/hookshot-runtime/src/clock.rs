//! Fixed-step game clock

use hookshot_core::ClockConfig;

/// Splits variable frame time into fixed physics steps.
///
/// The host reports how much wall time a frame took through
/// [`GameClock::advance`]; the clock never reads a system timer, so scripted
/// runs replay exactly.
#[derive(Debug, Clone)]
pub struct GameClock {
    time: f64,
    frame_delta: f64,
    step: f64,
    max_frame: f64,
    /// Frame time not yet spent on physics steps
    backlog: f64,
    steps: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

impl GameClock {
    /// 60 Hz steps with the default frame clamp
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            step: 1.0 / hz,
            ..Self::default()
        }
    }

    pub fn from_config(config: &ClockConfig) -> Self {
        Self {
            time: 0.0,
            frame_delta: 0.0,
            step: 1.0 / config.fixed_hz,
            max_frame: config.max_frame_time,
            backlog: 0.0,
            steps: 0,
        }
    }

    /// Seconds of game time so far
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Clamped duration of the last frame
    pub fn frame_delta(&self) -> f64 {
        self.frame_delta
    }

    /// Length of one physics step
    pub fn step_size(&self) -> f64 {
        self.step
    }

    pub fn max_frame_time(&self) -> f64 {
        self.max_frame
    }

    /// Record one frame's elapsed time. Long frames (debugger pauses, hitches)
    /// are clamped so the physics backlog stays bounded.
    pub fn advance(&mut self, elapsed: f64) {
        if elapsed > self.max_frame {
            tracing::debug!(elapsed, max = self.max_frame, "frame time clamped");
        }
        self.frame_delta = elapsed.clamp(0.0, self.max_frame);
        self.time += self.frame_delta;
        self.backlog += self.frame_delta;
    }

    /// Whether a full physics step is waiting
    pub fn should_fixed_update(&self) -> bool {
        // 1e-9 absorbs rounding so two 1/60 frames at 30 Hz give two steps
        self.backlog + 1e-9 >= self.step
    }

    pub fn consume_fixed_step(&mut self) {
        self.backlog = (self.backlog - self.step).max(0.0);
        self.steps += 1;
    }

    /// How far between two physics steps the current frame sits, in [0, 1)
    pub fn interpolation_alpha(&self) -> f64 {
        self.backlog / self.step
    }

    pub fn fixed_steps(&self) -> u64 {
        self.steps
    }
}
