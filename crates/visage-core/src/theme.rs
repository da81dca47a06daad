//! Themes and palettes
//!
//! A theme is a named palette. Resolution turns a name (plus optional
//! configured overrides) into a `Palette` record carrying every semantic
//! color the face and overlays need. A palette with a missing or malformed
//! field is rejected here, at resolution time, never downstream.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Color, VisageError, VisageResult};

/// Named color theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Ruby,
    Spectrum,
}

impl ThemeName {
    /// All themes in control-panel order
    pub const ALL: [ThemeName; 2] = [ThemeName::Ruby, ThemeName::Spectrum];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Ruby => "ruby",
            ThemeName::Spectrum => "spectrum",
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Ruby => "RUBY",
            ThemeName::Spectrum => "SPECTRUM",
        }
    }

    /// Preview swatches shown on the theme button
    pub fn swatches(self) -> Vec<Color> {
        match self {
            ThemeName::Ruby => vec![Color::from_rgb8(0xDC, 0x26, 0x26)],
            ThemeName::Spectrum => vec![
                Color::from_rgb8(0x25, 0x63, 0xEB),
                Color::from_rgb8(0xDC, 0x26, 0x26),
                Color::from_rgb8(0x16, 0xA3, 0x4A),
            ],
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Ruby => ThemeName::Spectrum,
            ThemeName::Spectrum => ThemeName::Ruby,
        }
    }

    fn index(self) -> usize {
        match self {
            ThemeName::Ruby => 0,
            ThemeName::Spectrum => 1,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = VisageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ruby" => Ok(ThemeName::Ruby),
            "spectrum" => Ok(ThemeName::Spectrum),
            _ => Err(VisageError::UnknownTheme(s.to_string())),
        }
    }
}

/// Resolved semantic colors of a theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    /// Pupils, and the pulse ring while listening
    pub eye: Color,
    /// Lips, and the pulse ring while speaking
    pub mouth: Color,
    pub ring_inner: Color,
    pub ring_outer: Color,
    /// Face disc base
    pub off_white: Color,
}

impl Palette {
    /// Built-in palette for a theme name (pure lookup)
    pub fn builtin(name: ThemeName) -> Self {
        let off_white = Color::from_rgb8(0xFA, 0xF9, 0xF6);
        match name {
            ThemeName::Ruby => Palette {
                primary: Color::from_rgb8(0xDC, 0x26, 0x26),
                secondary: Color::from_rgb8(0xB9, 0x1C, 0x1C),
                tertiary: Color::from_rgb8(0xF8, 0x71, 0x71),
                eye: Color::from_rgb8(0xDC, 0x26, 0x26),
                mouth: Color::from_rgb8(0x99, 0x1B, 0x1B),
                ring_inner: Color::from_rgb8(0xEF, 0x44, 0x44),
                ring_outer: Color::from_rgb8(0xFC, 0xA5, 0xA5),
                off_white,
            },
            ThemeName::Spectrum => Palette {
                primary: Color::from_rgb8(0x25, 0x63, 0xEB),
                secondary: Color::from_rgb8(0xDC, 0x26, 0x26),
                tertiary: Color::from_rgb8(0x16, 0xA3, 0x4A),
                eye: Color::from_rgb8(0x25, 0x63, 0xEB),
                mouth: Color::from_rgb8(0xDC, 0x26, 0x26),
                ring_inner: Color::from_rgb8(0x16, 0xA3, 0x4A),
                ring_outer: Color::from_rgb8(0x25, 0x63, 0xEB),
                off_white,
            },
        }
    }

    /// Hex form of this palette, every field present
    pub fn to_spec(&self) -> PaletteSpec {
        PaletteSpec {
            primary: Some(self.primary.to_hex()),
            secondary: Some(self.secondary.to_hex()),
            tertiary: Some(self.tertiary.to_hex()),
            eye: Some(self.eye.to_hex()),
            mouth: Some(self.mouth.to_hex()),
            ring_inner: Some(self.ring_inner.to_hex()),
            ring_outer: Some(self.ring_outer.to_hex()),
            off_white: Some(self.off_white.to_hex()),
        }
    }
}

/// Built-in palette lookup keyed by theme name
pub fn theme_colors(name: ThemeName) -> Palette {
    Palette::builtin(name)
}

/// Unvalidated palette as written in configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteSpec {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tertiary: Option<String>,
    pub eye: Option<String>,
    pub mouth: Option<String>,
    pub ring_inner: Option<String>,
    pub ring_outer: Option<String>,
    pub off_white: Option<String>,
}

impl PaletteSpec {
    /// Fields present in `over` replace ours
    pub fn overlay(&self, over: &PaletteSpec) -> PaletteSpec {
        let pick = |mine: &Option<String>, theirs: &Option<String>| {
            theirs.clone().or_else(|| mine.clone())
        };
        PaletteSpec {
            primary: pick(&self.primary, &over.primary),
            secondary: pick(&self.secondary, &over.secondary),
            tertiary: pick(&self.tertiary, &over.tertiary),
            eye: pick(&self.eye, &over.eye),
            mouth: pick(&self.mouth, &over.mouth),
            ring_inner: pick(&self.ring_inner, &over.ring_inner),
            ring_outer: pick(&self.ring_outer, &over.ring_outer),
            off_white: pick(&self.off_white, &over.off_white),
        }
    }

    /// Validate and convert. Fails on the first missing or malformed field.
    pub fn resolve(&self, theme: &str) -> VisageResult<Palette> {
        let field = |name: &'static str, value: &Option<String>| -> VisageResult<Color> {
            let raw = value.as_deref().ok_or_else(|| VisageError::MissingColor {
                theme: theme.to_string(),
                field: name,
            })?;
            Color::from_hex(raw).map_err(|_| VisageError::InvalidColor {
                field: format!("{}.{}", theme, name),
                value: raw.to_string(),
            })
        };

        Ok(Palette {
            primary: field("primary", &self.primary)?,
            secondary: field("secondary", &self.secondary)?,
            tertiary: field("tertiary", &self.tertiary)?,
            eye: field("eye", &self.eye)?,
            mouth: field("mouth", &self.mouth)?,
            ring_inner: field("ring_inner", &self.ring_inner)?,
            ring_outer: field("ring_outer", &self.ring_outer)?,
            off_white: field("off_white", &self.off_white)?,
        })
    }
}

fn default_inherit() -> bool {
    true
}

/// Configured replacement for a theme's colors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeOverride {
    /// Start from the built-in palette (true) or require every field (false)
    #[serde(default = "default_inherit")]
    pub inherit: bool,
    #[serde(default)]
    pub colors: PaletteSpec,
}

impl Default for ThemeOverride {
    fn default() -> Self {
        ThemeOverride {
            inherit: true,
            colors: PaletteSpec::default(),
        }
    }
}

/// Every theme resolved up front
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeRegistry {
    palettes: [Palette; 2],
}

impl ThemeRegistry {
    /// Built-in palettes only
    pub fn builtin() -> Self {
        ThemeRegistry {
            palettes: ThemeName::ALL.map(Palette::builtin),
        }
    }

    /// Built-ins with configured overrides applied and validated
    pub fn with_overrides(overrides: &HashMap<ThemeName, ThemeOverride>) -> VisageResult<Self> {
        let mut registry = Self::builtin();
        for (name, theme_override) in overrides {
            let spec = if theme_override.inherit {
                Palette::builtin(*name).to_spec().overlay(&theme_override.colors)
            } else {
                theme_override.colors.clone()
            };
            registry.palettes[name.index()] = spec.resolve(name.as_str())?;
        }
        Ok(registry)
    }

    /// Resolved palette for a theme
    pub fn palette(&self, name: ThemeName) -> &Palette {
        &self.palettes[name.index()]
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
