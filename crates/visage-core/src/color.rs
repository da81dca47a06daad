//! Color primitives
//!
//! Colors are stored as RGB in the 0.0 - 1.0 range. Hex notation (`#RRGGBB`)
//! is the interchange format for themes and configuration.

use std::fmt;

use crate::{VisageError, VisageResult};

/// Color in RGB (0.0 - 1.0 range)
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(value: &str) -> VisageResult<Self> {
        let invalid = || VisageError::InvalidColor {
            field: "color".to_string(),
            value: value.to_string(),
        };

        let digits = value.trim().strip_prefix('#').unwrap_or(value.trim());
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// 8-bit channels, rounded and clamped
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Attach an alpha channel
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self, alpha)
    }

    /// Attach an 8-bit alpha, matching the `#RRGGBBAA` suffix convention
    pub fn with_alpha8(self, alpha: u8) -> Rgba {
        Rgba::new(self, alpha as f32 / 255.0)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Color with alpha, used for overlay styling
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgba {
    pub color: Color,
    /// Alpha [0.0 - 1.0]
    pub alpha: f32,
}

impl Rgba {
    pub fn new(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn opaque(color: Color) -> Self {
        Self::new(color, 1.0)
    }

    pub fn transparent() -> Self {
        Self::new(Color::black(), 0.0)
    }

    /// Composite over an opaque background
    pub fn over(&self, background: &Color) -> Color {
        background.lerp(&self.color, self.alpha)
    }

    /// Format as `#RRGGBBAA`
    pub fn to_hex(self) -> String {
        let a = (self.alpha * 255.0).round() as u8;
        format!("{}{:02X}", self.color.to_hex(), a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_over_stays_between_layers(
            fg in (0u8.., 0u8.., 0u8..),
            bg in (0u8.., 0u8.., 0u8..),
            alpha in -0.5f32..1.5,
        ) {
            let top = Color::from_rgb8(fg.0, fg.1, fg.2).with_alpha(alpha);
            let base = Color::from_rgb8(bg.0, bg.1, bg.2);
            let out = top.over(&base);
            for (o, a, b) in [
                (out.r, top.color.r, base.r),
                (out.g, top.color.g, base.g),
                (out.b, top.color.b, base.b),
            ] {
                prop_assert!(o >= a.min(b) - 1e-5 && o <= a.max(b) + 1e-5);
            }
        }
    }

    #[test]
    fn test_hex_parse() {
        let c = Color::from_hex("#DC2626").unwrap();
        assert_eq!(c.to_rgb8(), (0xDC, 0x26, 0x26));
        assert_eq!(c.to_hex(), "#DC2626");

        let bare = Color::from_hex("16a34a").unwrap();
        assert_eq!(bare.to_rgb8(), (0x16, 0xA3, 0x4A));
    }

    #[test]
    fn test_hex_rejects_malformed() {
        assert!(Color::from_hex("#DC26").is_err());
        assert!(Color::from_hex("#GG2626").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#DC2626FF").is_err());
        // Sign characters are not hex digits
        assert!(Color::from_hex("#+1+2+3").is_err());
        assert!(Color::from_hex("-F-F-F").is_err());
    }

    #[test]
    fn test_color_lerp() {
        let gray = Color::black().lerp(&Color::white(), 0.5);
        assert!((gray.r - 0.5).abs() < 0.01);
        assert!((gray.g - 0.5).abs() < 0.01);
        assert!((gray.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_alpha_suffix() {
        let primary = Color::from_rgb8(0xDC, 0x26, 0x26);
        assert_eq!(primary.with_alpha8(0x33).to_hex(), "#DC262633");
        assert!((primary.with_alpha8(0x33).alpha - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_rgba_over() {
        let half_black = Color::black().with_alpha(0.5);
        let out = half_black.over(&Color::white());
        assert!((out.r - 0.5).abs() < 0.01);
    }
}
