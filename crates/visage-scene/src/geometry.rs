//! Primitive geometries
//!
//! All primitives lie in their local XY plane. Segment counts are kept as
//! declared so a tessellating backend can honor them; sampling backends
//! ignore them.

use std::f32::consts::TAU;

/// Primitive shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Filled disc
    Circle { radius: f32, segments: u32 },
    /// Annulus between two radii
    Ring {
        inner: f32,
        outer: f32,
        segments: u32,
    },
    /// Stadium along local Y: a `length` straight section capped by two
    /// semicircles of `radius` (total height `length + 2·radius`)
    Capsule {
        radius: f32,
        length: f32,
        cap_segments: u32,
        radial_segments: u32,
    },
    /// Axis-aligned box centered on the origin
    Box { width: f32, height: f32, depth: f32 },
}

impl Geometry {
    pub fn circle(radius: f32, segments: u32) -> Self {
        Geometry::Circle { radius, segments }
    }

    pub fn ring(inner: f32, outer: f32, segments: u32) -> Self {
        Geometry::Ring {
            inner,
            outer,
            segments,
        }
    }

    pub fn capsule(radius: f32, length: f32) -> Self {
        Geometry::Capsule {
            radius,
            length,
            cap_segments: 8,
            radial_segments: 16,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Box {
            width,
            height,
            depth,
        }
    }

    /// Half extents of the local bounding rectangle
    pub fn half_extents(&self) -> (f32, f32) {
        match *self {
            Geometry::Circle { radius, .. } => (radius, radius),
            Geometry::Ring { outer, .. } => (outer, outer),
            Geometry::Capsule { radius, length, .. } => (radius, length / 2.0 + radius),
            Geometry::Box { width, height, .. } => (width / 2.0, height / 2.0),
        }
    }

    /// Point-in-shape test in local XY
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Geometry::Circle { radius, .. } => x * x + y * y <= radius * radius,
            Geometry::Ring { inner, outer, .. } => {
                let r2 = x * x + y * y;
                r2 >= inner * inner && r2 <= outer * outer
            }
            Geometry::Capsule { radius, length, .. } => {
                let half = length / 2.0;
                let dy = (y.abs() - half).max(0.0);
                x * x + dy * dy <= radius * radius
            }
            Geometry::Box { width, height, .. } => {
                x.abs() <= width / 2.0 && y.abs() <= height / 2.0
            }
        }
    }

    /// Local XY points covering the shape with spacing no wider than `step`.
    /// Thin shapes always get at least two samples across.
    pub fn samples(&self, step: f32) -> Vec<(f32, f32)> {
        let step = step.max(1e-4);
        match *self {
            Geometry::Circle { radius, .. } => polar_fill(0.0, radius, step),
            Geometry::Ring { inner, outer, .. } => polar_fill(inner, outer, step),
            Geometry::Capsule { .. } | Geometry::Box { .. } => {
                let (hw, hh) = self.half_extents();
                let nx = ((2.0 * hw / step).ceil() as usize).max(2);
                let ny = ((2.0 * hh / step).ceil() as usize).max(2);
                let mut out = Vec::with_capacity((nx + 1) * (ny + 1));
                for i in 0..=nx {
                    let x = -hw + 2.0 * hw * i as f32 / nx as f32;
                    for j in 0..=ny {
                        let y = -hh + 2.0 * hh * j as f32 / ny as f32;
                        if self.contains(x, y) {
                            out.push((x, y));
                        }
                    }
                }
                out
            }
        }
    }
}

fn polar_fill(inner: f32, outer: f32, step: f32) -> Vec<(f32, f32)> {
    let bands = (((outer - inner) / step).ceil() as usize).max(1);
    let mut out = Vec::new();
    if inner <= 0.0 {
        out.push((0.0, 0.0));
    }
    for b in 0..=bands {
        let r = inner + (outer - inner) * b as f32 / bands as f32;
        if r <= 0.0 {
            continue;
        }
        let around = ((TAU * r / step).ceil() as usize).max(8);
        for k in 0..around {
            let a = TAU * k as f32 / around as f32;
            out.push((r * a.cos(), r * a.sin()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        assert!(Geometry::circle(1.5, 64).contains(1.0, 1.0));
        assert!(!Geometry::circle(1.5, 64).contains(1.2, 1.2));

        let ring = Geometry::ring(1.6, 1.65, 64);
        assert!(ring.contains(1.62, 0.0));
        assert!(!ring.contains(1.5, 0.0));
        assert!(!ring.contains(1.7, 0.0));

        let capsule = Geometry::capsule(0.08, 0.15);
        assert!(capsule.contains(0.0, 0.15));
        assert!(!capsule.contains(0.0, 0.16));
        assert!(capsule.contains(0.08, 0.0));

        let bar = Geometry::cuboid(0.6, 0.02, 0.01);
        assert!(bar.contains(0.29, 0.0));
        assert!(!bar.contains(0.0, 0.02));
    }

    #[test]
    fn test_thin_ring_is_sampled_across() {
        let ring = Geometry::ring(1.75, 1.78, 32);
        let samples = ring.samples(0.1);
        assert!(!samples.is_empty());
        for (x, y) in samples {
            let r = (x * x + y * y).sqrt();
            assert!(r >= 1.75 - 1e-4 && r <= 1.78 + 1e-4);
        }
    }

    #[test]
    fn test_samples_stay_inside() {
        for g in [
            Geometry::circle(0.28, 32),
            Geometry::capsule(0.1, 0.5),
            Geometry::cuboid(0.02, 0.5, 0.01),
        ] {
            let samples = g.samples(0.05);
            assert!(samples.len() >= 2, "{:?}", g);
            // Boundary samples may sit a rounding error outside
            assert!(samples.iter().all(|&(x, y)| g.contains(x * 0.999, y * 0.999)));
        }
    }
}
