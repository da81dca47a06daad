//! Transforms - position, Euler rotation and scale

use std::ops::{Add, Mul, Sub};

/// 3-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    /// Uniform in x/y, unit z (the planar "pulse" scale)
    #[inline]
    pub const fn planar(s: f32) -> Self {
        Vec3 { x: s, y: s, z: 1.0 }
    }

    /// Component-wise product
    #[inline]
    pub fn scale_by(self, s: Vec3) -> Self {
        Vec3::new(self.x * s.x, self.y * s.y, self.z * s.z)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Local transform of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians (X, Y, Z order)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Transform {
            position: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    /// Builder: set rotation about Z
    pub fn rotated_z(mut self, angle: f32) -> Self {
        self.rotation.z = angle;
        self
    }

    /// Map a point from local space into the parent's space:
    /// scale, then rotate (Z, then Y, then X), then translate.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let s = p.scale_by(self.scale);

        let (sz, cz) = self.rotation.z.sin_cos();
        let rz = Vec3::new(s.x * cz - s.y * sz, s.x * sz + s.y * cz, s.z);

        let (sy, cy) = self.rotation.y.sin_cos();
        let ry = Vec3::new(rz.x * cy + rz.z * sy, rz.y, -rz.x * sy + rz.z * cy);

        let (sx, cx) = self.rotation.x.sin_cos();
        let rx = Vec3::new(ry.x, ry.y * cx - ry.z * sx, ry.y * sx + ry.z * cx);

        rx + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(0.3, -0.2, 0.1);
        assert_eq!(Transform::IDENTITY.apply(p), p);
    }

    #[test]
    fn test_translate_and_scale() {
        let mut t = Transform::at(1.0, 2.0, 0.0);
        t.scale = Vec3::new(2.0, 0.5, 1.0);
        assert!(close(t.apply(Vec3::new(1.0, 1.0, 0.0)), Vec3::new(3.0, 2.5, 0.0)));
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let t = Transform::IDENTITY.rotated_z(FRAC_PI_2);
        assert!(close(t.apply(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotate_y_moves_x_into_depth() {
        let mut t = Transform::IDENTITY;
        t.rotation.y = FRAC_PI_2;
        assert!(close(t.apply(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_scale_before_rotation() {
        let mut t = Transform::IDENTITY.rotated_z(FRAC_PI_2);
        t.scale = Vec3::new(1.0, 0.5, 1.0);
        // The Y-squash happens in local space, so it lands on world X
        assert!(close(t.apply(Vec3::new(0.0, 1.0, 0.0)), Vec3::new(-0.5, 0.0, 0.0)));
    }
}
