//! Avatar display states
//!
//! The avatar is always in exactly one of three states. Every animation
//! branch, overlay and hint is selected by this value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::VisageError;

/// Avatar display state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarState {
    /// Standby: slow ambient motion, relaxed mouth
    #[default]
    Idle,
    /// Actively speaking: energetic mouth and rings
    Speaking,
    /// Listening for input: gentle pulsing
    Listening,
}

impl AvatarState {
    /// All states in control-panel order
    pub const ALL: [AvatarState; 3] = [
        AvatarState::Idle,
        AvatarState::Speaking,
        AvatarState::Listening,
    ];

    /// Stable lowercase identifier
    pub fn as_str(self) -> &'static str {
        match self {
            AvatarState::Idle => "idle",
            AvatarState::Speaking => "speaking",
            AvatarState::Listening => "listening",
        }
    }

    /// Short button label
    pub fn label(self) -> &'static str {
        match self {
            AvatarState::Idle => "IDLE",
            AvatarState::Speaking => "SPEAK",
            AvatarState::Listening => "LISTEN",
        }
    }

    /// Button glyph
    pub fn icon(self) -> &'static str {
        match self {
            AvatarState::Idle => "◯",
            AvatarState::Speaking => "◉",
            AvatarState::Listening => "◎",
        }
    }

    /// One-line human-readable hint
    pub fn hint(self) -> &'static str {
        match self {
            AvatarState::Idle => "Avatar is in standby mode",
            AvatarState::Speaking => "Avatar is actively speaking",
            AvatarState::Listening => "Avatar is listening for input",
        }
    }

    /// Anything other than idle
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, AvatarState::Idle)
    }
}

impl fmt::Display for AvatarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvatarState {
    type Err = VisageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(AvatarState::Idle),
            "speaking" | "speak" => Ok(AvatarState::Speaking),
            "listening" | "listen" => Ok(AvatarState::Listening),
            _ => Err(VisageError::UnknownState(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(AvatarState::default(), AvatarState::Idle);
        assert!(!AvatarState::Idle.is_active());
        assert!(AvatarState::Speaking.is_active());
    }

    #[test]
    fn test_parse() {
        assert_eq!("speaking".parse::<AvatarState>().unwrap(), AvatarState::Speaking);
        assert_eq!("LISTEN".parse::<AvatarState>().unwrap(), AvatarState::Listening);
        assert!(matches!(
            "asleep".parse::<AvatarState>(),
            Err(VisageError::UnknownState(_))
        ));
    }

    #[test]
    fn test_hints() {
        assert_eq!(AvatarState::Idle.hint(), "Avatar is in standby mode");
        assert_eq!(AvatarState::Speaking.hint(), "Avatar is actively speaking");
        assert_eq!(AvatarState::Listening.hint(), "Avatar is listening for input");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AvatarState::Listening).unwrap();
        assert_eq!(json, "\"listening\"");
        let back: AvatarState = serde_json::from_str("\"speaking\"").unwrap();
        assert_eq!(back, AvatarState::Speaking);
    }
}
