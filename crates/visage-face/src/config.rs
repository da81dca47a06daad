//! Face renderer configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use visage_core::{VisageError, VisageResult};

/// How per-frame smoothing factors respond to the frame rate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Apply the factor once per frame regardless of delta. Motion speed
    /// depends on the frame rate.
    #[default]
    PerFrame,
    /// Scale the factor by delta so motion matches `PerFrame` at
    /// `reference_fps` and stays the same at any other rate.
    TimeNormalized { reference_fps: f64 },
}

impl SmoothingMode {
    /// Effective interpolation factor for one frame of length `delta`
    pub fn factor(&self, per_frame: f32, delta: f64) -> f32 {
        match *self {
            SmoothingMode::PerFrame => per_frame,
            SmoothingMode::TimeNormalized { reference_fps } => {
                let frames = (delta * reference_fps).max(0.0);
                let keep = (1.0 - per_frame as f64).clamp(0.0, 1.0);
                (1.0 - keep.powf(frames)) as f32
            }
        }
    }
}

/// Face renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    /// Shortest time between blinks (seconds, inclusive)
    pub blink_interval_min: f64,
    /// Longest time between blinks (seconds, exclusive)
    pub blink_interval_max: f64,
    /// How long the eyes stay closed
    pub blink_duration_ms: u64,
    /// Per-frame eye interpolation factor
    pub eye_smoothing: f32,
    /// Per-frame mouth relaxation factor while idle
    pub mouth_smoothing: f32,
    pub smoothing: SmoothingMode,
    /// Seed for blink timing; entropy when absent
    pub seed: Option<u64>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            blink_interval_min: 2.0,
            blink_interval_max: 5.0,
            blink_duration_ms: 150,
            eye_smoothing: 0.3,
            mouth_smoothing: 0.1,
            smoothing: SmoothingMode::PerFrame,
            seed: None,
        }
    }
}

impl FaceConfig {
    /// Same config with a fixed blink seed
    pub fn seeded(seed: u64) -> Self {
        FaceConfig {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn blink_duration(&self) -> Duration {
        Duration::from_millis(self.blink_duration_ms)
    }

    pub fn validate(&self) -> VisageResult<()> {
        let invalid = |msg: String| Err(VisageError::InvalidConfig(msg));

        if !(self.blink_interval_min.is_finite() && self.blink_interval_max.is_finite()) {
            return invalid("blink interval must be finite".to_string());
        }
        if self.blink_interval_min <= 0.0 || self.blink_interval_min >= self.blink_interval_max {
            return invalid(format!(
                "blink interval [{}, {}) must be a non-empty positive range",
                self.blink_interval_min, self.blink_interval_max
            ));
        }
        for (name, k) in [
            ("eye_smoothing", self.eye_smoothing),
            ("mouth_smoothing", self.mouth_smoothing),
        ] {
            if !(k > 0.0 && k <= 1.0) {
                return invalid(format!("{} must be in (0, 1], got {}", name, k));
            }
        }
        if let SmoothingMode::TimeNormalized { reference_fps } = self.smoothing {
            if !(reference_fps.is_finite() && reference_fps > 0.0) {
                return invalid(format!("reference_fps must be positive, got {}", reference_fps));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FaceConfig::default();
        config.validate().unwrap();
        assert_eq!(config.blink_duration(), Duration::from_millis(150));
    }

    #[test]
    fn test_rejects_empty_blink_range() {
        let config = FaceConfig {
            blink_interval_min: 3.0,
            blink_interval_max: 3.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(VisageError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_smoothing() {
        let config = FaceConfig {
            eye_smoothing: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FaceConfig {
            smoothing: SmoothingMode::TimeNormalized { reference_fps: 0.0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_time_normalized_matches_per_frame_at_reference() {
        let mode = SmoothingMode::TimeNormalized { reference_fps: 60.0 };
        let k = mode.factor(0.3, 1.0 / 60.0);
        assert!((k - 0.3).abs() < 1e-5);

        // Two reference frames squeezed into one
        let k2 = mode.factor(0.3, 2.0 / 60.0);
        assert!((k2 - (1.0 - 0.7f32 * 0.7)).abs() < 1e-5);

        assert_eq!(mode.factor(0.3, 0.0), 0.0);
        assert_eq!(SmoothingMode::PerFrame.factor(0.3, 0.5), 0.3);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: FaceConfig = serde_json::from_str(
            r#"{ "blink_duration_ms": 200, "smoothing": { "mode": "time_normalized", "reference_fps": 30.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.blink_duration_ms, 200);
        assert_eq!(config.blink_interval_min, 2.0);
        assert_eq!(
            config.smoothing,
            SmoothingMode::TimeNormalized { reference_fps: 30.0 }
        );
    }
}
