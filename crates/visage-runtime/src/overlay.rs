//! Overlays drawn around the face
//!
//! Status indicator, decorative audio bars, header and frame decor. All of
//! them are pure functions of (state, palette, time).

use visage_core::{AvatarState, Color, Palette, Rgba};
use visage_face::neutral_gray;

/// Number of visualizer bars
pub const VISUALIZER_BARS: usize = 12;

/// Spacing of the background grid
pub const GRID_SPACING: f32 = 50.0;

/// Pulsing status light with a state label
#[derive(Debug, Clone, PartialEq)]
pub struct StatusIndicator {
    pub label: &'static str,
    pub color: Color,
    pub opacity: f32,
}

impl StatusIndicator {
    pub fn new(state: AvatarState, palette: &Palette, t: f64) -> Self {
        let (label, color) = match state {
            AvatarState::Idle => ("STANDBY", neutral_gray()),
            AvatarState::Speaking => ("SPEAKING", palette.mouth),
            AvatarState::Listening => ("LISTENING", palette.eye),
        };
        let opacity = match state {
            AvatarState::Idle => 0.6,
            AvatarState::Speaking => 0.6 + 0.4 * (t * 6.0).sin(),
            AvatarState::Listening => 0.6 + 0.4 * (t * 2.0).sin(),
        };
        StatusIndicator {
            label,
            color,
            opacity: opacity as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Fraction of full height [0.0 - 1.0]
    pub height: f32,
    pub color: Color,
}

/// Decorative level bars. Driven by state and time only; there is no audio
/// input.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioVisualizer {
    pub bars: [Bar; VISUALIZER_BARS],
}

impl AudioVisualizer {
    pub fn new(state: AvatarState, palette: &Palette, t: f64) -> Self {
        let colors = [palette.primary, palette.secondary, palette.tertiary];
        let bars = std::array::from_fn(|i| Bar {
            height: bar_height(state, t, i),
            color: colors[i % colors.len()],
        });
        AudioVisualizer { bars }
    }

    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.bars.iter().map(|b| b.height)
    }
}

fn bar_height(state: AvatarState, t: f64, index: usize) -> f32 {
    let i = index as f64;
    let h = match state {
        AvatarState::Idle => 0.1,
        AvatarState::Listening => 0.25 + 0.15 * (3.0 * t + 0.6 * i).sin(),
        AvatarState::Speaking => {
            0.55 + 0.3 * (8.0 * t + 0.9 * i).sin() + 0.15 * (13.0 * t + 1.7 * i).sin()
        }
    };
    h.clamp(0.0, 1.0) as f32
}

/// Title block
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub title_color: Color,
    pub accent: Color,
}

impl Header {
    pub fn new(palette: &Palette) -> Self {
        Header {
            title: "VISAGE",
            subtitle: "Animated Avatar Interface",
            title_color: palette.primary,
            accent: palette.secondary,
        }
    }
}

/// Radial glow in the background, positioned in fractions of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGlow {
    pub center: (f32, f32),
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Corner bracket: one horizontal and one vertical stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerBracket {
    pub corner: Corner,
    pub horizontal: Color,
    pub vertical: Color,
}

/// Background pattern and corner brackets
#[derive(Debug, Clone, PartialEq)]
pub struct Decor {
    pub glows: [RadialGlow; 2],
    pub grid: Rgba,
    pub grid_spacing: f32,
    pub corners: [CornerBracket; 4],
}

impl Decor {
    pub fn new(palette: &Palette) -> Self {
        let bracket = |corner, horizontal, vertical| CornerBracket {
            corner,
            horizontal,
            vertical,
        };
        Decor {
            glows: [
                RadialGlow {
                    center: (0.25, 0.25),
                    color: palette.primary.with_alpha8(0x08),
                },
                RadialGlow {
                    center: (0.75, 0.75),
                    color: palette.secondary.with_alpha8(0x08),
                },
            ],
            grid: palette.primary.with_alpha8(0x05),
            grid_spacing: GRID_SPACING,
            corners: [
                bracket(Corner::TopLeft, palette.primary, palette.secondary),
                bracket(Corner::TopRight, palette.secondary, palette.tertiary),
                bracket(Corner::BottomLeft, palette.tertiary, palette.primary),
                bracket(Corner::BottomRight, palette.primary, palette.secondary),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use visage_core::ThemeName;

    proptest! {
        #[test]
        fn prop_bars_in_unit_range(t in 0.0f64..10_000.0) {
            let palette = Palette::builtin(ThemeName::Spectrum);
            for state in AvatarState::ALL {
                let viz = AudioVisualizer::new(state, &palette, t);
                for h in viz.heights() {
                    prop_assert!((0.0..=1.0).contains(&h));
                }
            }
        }

        #[test]
        fn prop_status_opacity_bounded(t in 0.0f64..10_000.0) {
            let palette = Palette::builtin(ThemeName::Ruby);
            for state in AvatarState::ALL {
                let o = StatusIndicator::new(state, &palette, t).opacity;
                prop_assert!((0.2 - 1e-6..=1.0 + 1e-6).contains(&o));
            }
        }
    }

    #[test]
    fn test_status_labels_and_colors() {
        let palette = Palette::builtin(ThemeName::Spectrum);
        let idle = StatusIndicator::new(AvatarState::Idle, &palette, 3.0);
        assert_eq!((idle.label, idle.color, idle.opacity), ("STANDBY", neutral_gray(), 0.6));

        let speaking = StatusIndicator::new(AvatarState::Speaking, &palette, 0.0);
        assert_eq!(speaking.label, "SPEAKING");
        assert_eq!(speaking.color, palette.mouth);
        assert!((speaking.opacity - 0.6).abs() < 1e-6);

        let listening = StatusIndicator::new(AvatarState::Listening, &palette, 0.0);
        assert_eq!((listening.label, listening.color), ("LISTENING", palette.eye));
    }

    #[test]
    fn test_idle_bars_flat_and_colored() {
        let palette = Palette::builtin(ThemeName::Spectrum);
        let viz = AudioVisualizer::new(AvatarState::Idle, &palette, 12.5);
        assert!(viz.heights().all(|h| (h - 0.1).abs() < 1e-6));
        assert_eq!(viz.bars[0].color, palette.primary);
        assert_eq!(viz.bars[1].color, palette.secondary);
        assert_eq!(viz.bars[2].color, palette.tertiary);
        assert_eq!(viz.bars[3].color, palette.primary);
    }

    #[test]
    fn test_listening_bar_formula() {
        let palette = Palette::builtin(ThemeName::Ruby);
        let viz = AudioVisualizer::new(AvatarState::Listening, &palette, 0.0);
        assert!((viz.bars[0].height - 0.25).abs() < 1e-6);
        let expected = 0.25 + 0.15 * (0.6f64 * 5.0).sin();
        assert!((viz.bars[5].height as f64 - expected).abs() < 1e-6);
    }

    #[test]
    fn test_decor_follows_palette() {
        let palette = Palette::builtin(ThemeName::Ruby);
        let decor = Decor::new(&palette);
        assert_eq!(decor.glows[0].color.to_hex(), "#DC262608");
        assert_eq!(decor.grid.to_hex(), "#DC262605");
        assert_eq!(decor.grid_spacing, 50.0);
        assert_eq!(decor.corners[1].horizontal, palette.secondary);
        assert_eq!(decor.corners[1].vertical, palette.tertiary);
        assert_eq!(decor.corners[2].corner, Corner::BottomLeft);
    }
}
