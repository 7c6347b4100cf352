//! Minimal geometric value types
//!
//! Rooms and doors are only ever placed axis-aligned, so a plain 3D
//! coordinate and a two-valued rotation cover everything the chain needs.

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or displacement in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same x/y, replaced z
    pub const fn with_z(self, z: f32) -> Self {
        Self { x: self.x, y: self.y, z }
    }

    /// Linear interpolation; `t` is not clamped
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }

    /// Component-wise comparison within `eps`
    pub fn approx_eq(self, other: Vec3, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl core::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Door rotation about the Z axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    /// 90 degrees, used for doors on the side walls
    Quarter,
}

impl Rotation {
    pub const fn degrees(self) -> f32 {
        match self {
            Rotation::None => 0.0,
            Rotation::Quarter => 90.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 0.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 3.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, 3.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));

        let mut c = Vec3::ZERO;
        c += a;
        c += a;
        assert_eq!(c, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(0.0, 0.0, -10.0);
        let b = Vec3::new(12.0, 7.7, -10.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert!(a.lerp(b, 1.0).approx_eq(b, 1e-5));
        assert!(a.lerp(b, 0.5).approx_eq(Vec3::new(6.0, 3.85, -10.0), 1e-5));
    }

    #[test]
    fn test_with_z() {
        let p = Vec3::new(3.0, 4.0, 0.0).with_z(-10.0);
        assert_eq!(p, Vec3::new(3.0, 4.0, -10.0));
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::None.degrees(), 0.0);
        assert_eq!(Rotation::Quarter.degrees(), 90.0);
    }
}
