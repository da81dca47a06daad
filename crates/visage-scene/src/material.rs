//! Materials

use visage_core::Color;

/// Shading model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Lit, physically based (metalness/roughness)
    #[default]
    Standard,
    /// Unlit flat color
    Basic,
}

/// Surface material of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    /// Opacity [0.0 - 1.0], honored only when `transparent`
    pub opacity: f32,
    pub transparent: bool,
    /// Metalness [0.0 - 1.0] (standard only)
    pub metalness: f32,
    /// Roughness [0.0 - 1.0] (standard only)
    pub roughness: f32,
    /// Self-illumination color
    pub emissive: Option<Color>,
    pub emissive_intensity: f32,
}

impl Material {
    /// Opaque standard material
    pub fn standard(color: Color) -> Self {
        Material {
            kind: MaterialKind::Standard,
            color,
            opacity: 1.0,
            transparent: false,
            metalness: 0.0,
            roughness: 1.0,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }

    /// Opaque unlit material
    pub fn basic(color: Color) -> Self {
        Material {
            kind: MaterialKind::Basic,
            ..Self::standard(color)
        }
    }

    pub fn metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Mark transparent with the given opacity
    pub fn translucent(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = Some(color);
        self.emissive_intensity = intensity.max(0.0);
        self
    }

    /// Opacity the renderer should actually use
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Flat approximation of the shaded color: base plus emissive glow
    pub fn shaded_color(&self) -> Color {
        match self.emissive {
            Some(glow) if self.emissive_intensity > 0.0 => {
                let k = self.emissive_intensity.min(1.0);
                Color::new(
                    (self.color.r + glow.r * k).min(1.0),
                    (self.color.g + glow.g * k).min(1.0),
                    (self.color.b + glow.b * k).min(1.0),
                )
            }
            _ => self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let m = Material::standard(Color::white())
            .metalness(0.6)
            .roughness(0.2)
            .translucent(0.8);
        assert_eq!(m.kind, MaterialKind::Standard);
        assert!(m.transparent);
        assert_eq!(m.effective_opacity(), 0.8);

        let b = Material::basic(Color::black());
        assert_eq!(b.kind, MaterialKind::Basic);
        assert_eq!(b.effective_opacity(), 1.0);
    }

    #[test]
    fn test_opaque_ignores_opacity() {
        let mut m = Material::standard(Color::white());
        m.opacity = 0.1;
        assert_eq!(m.effective_opacity(), 1.0);
    }

    #[test]
    fn test_emissive_brightens() {
        let base = Color::new(0.5, 0.1, 0.1);
        let m = Material::standard(base).emissive(base, 0.3);
        assert!(m.shaded_color().r > base.r);
        assert!(m.shaded_color().r <= 1.0);
    }
}
