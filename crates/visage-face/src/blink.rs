//! Blink timing
//!
//! A blink fires when the accumulated frame delta passes a threshold drawn
//! uniformly from the configured interval. The threshold is redrawn after
//! every blink. Reopening is not handled here: the renderer schedules it as
//! a cancellable task.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::FaceConfig;

/// Blink timer and open/closed flag
#[derive(Debug, Clone)]
pub struct Blinker {
    timer: f64,
    threshold: f64,
    open: bool,
    interval: Range<f64>,
    rng: StdRng,
    blinks: u64,
}

impl Blinker {
    pub fn new(config: &FaceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut blinker = Blinker {
            timer: 0.0,
            threshold: 0.0,
            open: true,
            interval: config.blink_interval_min..config.blink_interval_max,
            rng,
            blinks: 0,
        };
        blinker.threshold = blinker.draw_threshold();
        blinker
    }

    fn draw_threshold(&mut self) -> f64 {
        self.rng.gen_range(self.interval.clone())
    }

    /// Accumulate `delta`. Returns true when a blink starts this frame.
    pub fn advance(&mut self, delta: f64) -> bool {
        self.timer += delta.max(0.0);
        if self.timer <= self.threshold {
            return false;
        }

        self.timer = 0.0;
        self.open = false;
        self.blinks += 1;
        self.threshold = self.draw_threshold();
        true
    }

    /// Mark the eyes open again
    pub fn reopen(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Target eye scale: 1.0 open, 0.0 closed
    pub fn target(&self) -> f32 {
        if self.open {
            1.0
        } else {
            0.0
        }
    }

    /// Interval that must elapse before the next blink
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Blinks started so far
    pub fn blinks(&self) -> u64 {
        self.blinks
    }
}
