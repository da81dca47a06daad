//! Motion formulas
//!
//! Closed-form functions of (state, time, phase). The renderer calls these
//! and writes the results into the scene; nothing here touches the scene.

use visage_core::{AvatarState, Color, Palette};

/// Resting mouth openness while idle
pub const IDLE_MOUTH: f32 = 0.5;

/// Pulse ring color while idle
pub fn neutral_gray() -> Color {
    Color::from_rgb8(0xE5, 0xE5, 0xE5)
}

/// Speak phase advance per second of delta
pub const SPEAK_PHASE_RATE: f64 = 8.0;

/// Listen phase advance per second of delta
pub const LISTEN_PHASE_RATE: f64 = 3.0;

/// Mouth cavity vertical scale while speaking. Range [0.3, 1.3].
#[inline]
pub fn speaking_mouth(phase: f64) -> f32 {
    (0.8 + 0.3 * phase.sin() + 0.2 * (phase * 2.3).sin()) as f32
}

/// Mouth cavity vertical scale while listening. Range [0.5, 0.7].
#[inline]
pub fn listening_mouth(phase: f64) -> f32 {
    (0.6 + 0.1 * phase.sin()) as f32
}

/// Ring angular velocities in rad/s (inner counter-clockwise, outer clockwise)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingRates {
    pub inner: f32,
    pub outer: f32,
}

pub fn ring_rates(state: AvatarState) -> RingRates {
    match state {
        AvatarState::Speaking => RingRates {
            inner: 2.0,
            outer: -1.5,
        },
        AvatarState::Listening => RingRates {
            inner: 0.5,
            outer: -0.3,
        },
        AvatarState::Idle => RingRates {
            inner: 0.2,
            outer: -0.15,
        },
    }
}

/// Uniform x/y scale of the pulse ring
#[inline]
pub fn pulse_scale(state: AvatarState, t: f64) -> f32 {
    let p = match state {
        AvatarState::Speaking => 1.0 + 0.1 * (t * 6.0).sin(),
        AvatarState::Listening => 1.0 + 0.15 * (t * 1.5).sin(),
        AvatarState::Idle => 1.0 + 0.03 * (t * 0.8).sin(),
    };
    p as f32
}

/// Inner ring "listening" pulse
#[inline]
pub fn listening_ring_scale(t: f64) -> f32 {
    (1.0 + 0.05 * (t * 2.0).sin()) as f32
}

/// Whole-face sway as (rotation x, rotation y), identical in every state
#[inline]
pub fn head_sway(t: f64) -> (f32, f32) {
    (((t * 0.3).sin() * 0.02) as f32, ((t * 0.5).sin() * 0.05) as f32)
}

/// Accent dot oscillation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shimmer {
    pub baseline: f64,
    pub amplitude: f64,
    pub frequency: f64,
}

impl Shimmer {
    pub fn for_state(state: AvatarState) -> Self {
        let (baseline, amplitude, frequency) = match state {
            AvatarState::Speaking => (0.5, 0.5, 8.0),
            AvatarState::Listening => (0.4, 0.3, 3.0),
            AvatarState::Idle => (0.2, 0.1, 1.0),
        };
        Shimmer {
            baseline,
            amplitude,
            frequency,
        }
    }

    /// Opacity of dot `index` at time `t`
    #[inline]
    pub fn opacity(&self, t: f64, index: usize) -> f32 {
        let offset = index as f64 * 0.5;
        (self.baseline + self.amplitude * (t * self.frequency + offset).sin()) as f32
    }
}

/// Pulse ring (color, opacity) for a state
pub fn pulse_style(state: AvatarState, palette: &Palette) -> (Color, f32) {
    match state {
        AvatarState::Speaking => (palette.mouth, 0.5),
        AvatarState::Listening => (palette.eye, 0.5),
        AvatarState::Idle => (neutral_gray(), 0.2),
    }
}

/// One step of exponential smoothing
#[inline]
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use visage_core::ThemeName;

    proptest! {
        #[test]
        fn prop_speaking_mouth_bounded(phase in 0.0f64..10_000.0) {
            let m = speaking_mouth(phase);
            prop_assert!((0.3 - 1e-6..=1.3 + 1e-6).contains(&m));
        }

        #[test]
        fn prop_idle_pulse_bounded(t in 0.0f64..100_000.0) {
            let p = pulse_scale(AvatarState::Idle, t);
            prop_assert!((0.97 - 1e-6..=1.03 + 1e-6).contains(&p));
        }

        #[test]
        fn prop_shimmer_bounded(t in 0.0f64..1_000.0, index in 0usize..6) {
            for state in AvatarState::ALL {
                let s = Shimmer::for_state(state);
                let o = s.opacity(t, index) as f64;
                prop_assert!(o >= s.baseline - s.amplitude - 1e-6);
                prop_assert!(o <= s.baseline + s.amplitude + 1e-6);
            }
        }

        #[test]
        fn prop_smoothing_never_overshoots(current in 0.0f32..2.0, target in 0.0f32..1.0, k in 0.01f32..1.0) {
            let next = smooth_toward(current, target, k);
            prop_assert!((next - target).abs() <= (current - target).abs() + 1e-6);
        }
    }

    #[test]
    fn test_zero_time_values() {
        assert_eq!(pulse_scale(AvatarState::Speaking, 0.0), 1.0);
        assert_eq!(listening_ring_scale(0.0), 1.0);
        assert_eq!(head_sway(0.0), (0.0, 0.0));
        assert!((speaking_mouth(0.0) - 0.8).abs() < 1e-6);
        assert!((listening_mouth(0.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_shimmer_profiles() {
        let speaking = Shimmer::for_state(AvatarState::Speaking);
        assert_eq!((speaking.baseline, speaking.amplitude, speaking.frequency), (0.5, 0.5, 8.0));
        let idle = Shimmer::for_state(AvatarState::Idle);
        assert!((idle.opacity(0.0, 0) - 0.2).abs() < 1e-6);
        // Index offsets the phase by half a radian
        let expected = 0.2 + 0.1 * (1.0f64).sin();
        assert!((idle.opacity(0.0, 2) as f64 - expected).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_style() {
        let spectrum = Palette::builtin(ThemeName::Spectrum);
        assert_eq!(pulse_style(AvatarState::Speaking, &spectrum), (spectrum.mouth, 0.5));
        assert_eq!(pulse_style(AvatarState::Listening, &spectrum), (spectrum.eye, 0.5));
        assert_eq!(pulse_style(AvatarState::Idle, &spectrum), (neutral_gray(), 0.2));
    }

    #[test]
    fn test_ring_rates() {
        assert_eq!(ring_rates(AvatarState::Listening).outer, -0.3);
        assert_eq!(ring_rates(AvatarState::Speaking).inner, 2.0);
    }
}
