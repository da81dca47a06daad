//! Frame time samples
//!
//! The renderer never owns a clock. The host delivers one `FrameTime` per
//! displayed frame: monotonic elapsed seconds plus the delta since the
//! previous frame.

use std::fmt;
use std::time::Duration;

/// One sample of the host animation clock
#[derive(Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started (monotonic)
    pub elapsed: f64,
    /// Seconds since the previous frame
    pub delta: f64,
    /// Frame index, starting at 0
    pub frame: u64,
}

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime {
        elapsed: 0.0,
        delta: 0.0,
        frame: 0,
    };

    #[inline]
    pub fn new(elapsed: f64, delta: f64, frame: u64) -> Self {
        FrameTime {
            elapsed,
            delta,
            frame,
        }
    }

    /// Next sample after advancing by `delta` seconds
    #[inline]
    pub fn advance(self, delta: f64) -> Self {
        FrameTime {
            elapsed: self.elapsed + delta,
            delta,
            frame: self.frame + 1,
        }
    }

    #[inline]
    pub fn elapsed_duration(self) -> Duration {
        Duration::from_secs_f64(self.elapsed.max(0.0))
    }

    /// Instantaneous frame rate implied by the delta
    pub fn fps(self) -> Option<f64> {
        (self.delta > 0.0).then(|| 1.0 / self.delta)
    }
}

impl fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame#{}(t={:.3}s, dt={:.2}ms)",
            self.frame,
            self.elapsed,
            self.delta * 1000.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let t = FrameTime::ZERO.advance(0.5).advance(0.25);
        assert_eq!(t.frame, 2);
        assert!((t.elapsed - 0.75).abs() < 1e-9);
        assert!((t.delta - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_fps() {
        assert_eq!(FrameTime::ZERO.fps(), None);
        let t = FrameTime::ZERO.advance(1.0 / 60.0);
        assert!((t.fps().unwrap() - 60.0).abs() < 1e-6);
    }
}
