//! Clock implementations for the frame loop

use std::time::{Duration, Instant};

use visage_core::FrameTime;

/// Anything that can hand out one `FrameTime` per rendered frame
pub trait FrameSource {
    /// Advance to the next frame and return its sample
    fn tick(&mut self) -> FrameTime;

    /// Last sample handed out, without advancing
    fn now(&self) -> FrameTime;
}

/// Wall-clock frame source
/// INVARIANT: elapsed MUST be monotonically increasing, NEVER jumps
pub struct FrameClock {
    /// Last sample
    current: FrameTime,
    /// Last update instant (None until the first tick)
    last_update: Option<Instant>,
    /// Largest delta a single frame may report
    max_delta: Duration,
}

impl FrameClock {
    /// Create a clock; the first tick reports delta 0
    pub fn new() -> Self {
        Self::with_max_delta(Duration::from_millis(100))
    }

    /// Create a clock with a custom delta clamp
    pub fn with_max_delta(max_delta: Duration) -> Self {
        FrameClock {
            current: FrameTime::ZERO,
            last_update: None,
            max_delta,
        }
    }

    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }
}

impl FrameSource for FrameClock {
    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let Some(last) = self.last_update.replace(now) else {
            return self.current;
        };

        // Clamp to prevent large jumps (e.g., after system sleep or a stalled terminal)
        let elapsed = now.duration_since(last).min(self.max_delta);
        self.current = self.current.advance(elapsed.as_secs_f64());
        self.current
    }

    fn now(&self) -> FrameTime {
        self.current
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic clock advancing by a fixed step every tick
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    current: FrameTime,
    step: f64,
    started: bool,
}

impl FixedStepClock {
    /// Clock stepping at `fps` frames per second
    pub fn from_fps(fps: u32) -> Self {
        Self::with_step(1.0 / fps.max(1) as f64)
    }

    /// Clock stepping `step` seconds per tick
    pub fn with_step(step: f64) -> Self {
        FixedStepClock {
            current: FrameTime::ZERO,
            step: step.max(0.0),
            started: false,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl FrameSource for FixedStepClock {
    fn tick(&mut self) -> FrameTime {
        if self.started {
            self.current = self.current.advance(self.step);
        } else {
            // The first frame sits at t=0 with a full step of delta, as a
            // render loop reports it.
            self.started = true;
            self.current = FrameTime::new(0.0, self.step, 0);
        }
        self.current
    }

    fn now(&self) -> FrameTime {
        self.current
    }
}
