//! Shell configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an empty
//! object (or no file at all) yields the stock idle/ruby face at 60 fps.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use visage_core::{AvatarState, ThemeName, ThemeOverride, ThemeRegistry, VisageError};
use visage_face::FaceConfig;

/// Highest frame rate the shell accepts
pub const MAX_TARGET_FPS: u32 = 240;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] VisageError),
}

/// Presentation shell configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub initial_state: AvatarState,
    pub initial_theme: ThemeName,
    /// Host frame rate
    pub target_fps: u32,
    pub face: FaceConfig,
    /// Per-theme color overrides
    pub themes: HashMap<ThemeName, ThemeOverride>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            initial_state: AvatarState::Idle,
            initial_theme: ThemeName::Ruby,
            target_fps: 60,
            face: FaceConfig::default(),
            themes: HashMap::new(),
        }
    }
}

impl ShellConfig {
    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ShellConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Check value ranges and resolve theme overrides
    pub fn validate(&self) -> Result<(), VisageError> {
        if self.target_fps == 0 || self.target_fps > MAX_TARGET_FPS {
            return Err(VisageError::InvalidConfig(format!(
                "target_fps must be in 1..={}, got {}",
                MAX_TARGET_FPS, self.target_fps
            )));
        }
        self.face.validate()?;
        self.theme_registry().map(|_| ())
    }

    /// Resolved palettes for every theme
    pub fn theme_registry(&self) -> Result<ThemeRegistry, VisageError> {
        ThemeRegistry::with_overrides(&self.themes)
    }

    /// Nominal time between frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::Color;
    use visage_face::SmoothingMode;

    #[test]
    fn test_empty_document_is_default() {
        let config = ShellConfig::from_json("{}").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn test_full_document() {
        let config = ShellConfig::from_json(
            r##"{
                "initial_state": "listening",
                "initial_theme": "spectrum",
                "target_fps": 30,
                "face": {
                    "blink_duration_ms": 120,
                    "smoothing": { "mode": "time_normalized", "reference_fps": 60.0 },
                    "seed": 7
                },
                "themes": {
                    "ruby": { "inherit": true, "colors": { "primary": "#E11D48" } }
                }
            }"##,
        )
        .unwrap();

        assert_eq!(config.initial_state, AvatarState::Listening);
        assert_eq!(config.initial_theme, ThemeName::Spectrum);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.face.seed, Some(7));
        assert_eq!(
            config.face.smoothing,
            SmoothingMode::TimeNormalized { reference_fps: 60.0 }
        );

        let registry = config.theme_registry().unwrap();
        let ruby = registry.palette(ThemeName::Ruby);
        assert_eq!(ruby.primary, Color::from_hex("#E11D48").unwrap());
        // Untouched fields inherit the built-in values
        assert_eq!(ruby.mouth.to_hex(), "#991B1B");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ShellConfig::from_json(r#"{ "fps": 60 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_state_rejected() {
        let err = ShellConfig::from_json(r#"{ "initial_state": "dancing" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = ShellConfig::from_json(r#"{ "target_fps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(VisageError::InvalidConfig(_))));
    }

    #[test]
    fn test_incomplete_theme_rejected() {
        let err = ShellConfig::from_json(
            r##"{ "themes": { "spectrum": { "inherit": false, "colors": { "primary": "#000000" } } } }"##,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(VisageError::MissingColor { .. })
        ));
    }

    #[test]
    fn test_bad_hex_rejected() {
        let err = ShellConfig::from_json(
            r#"{ "themes": { "ruby": { "colors": { "eye": "red" } } } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(VisageError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ShellConfig::load("/nonexistent/visage.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
