use std::ops::{Add, Div, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// 3D vector for curve points, frame axes and particle positions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const RIGHT: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the same direction; zero stays zero.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            *self
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn scale(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Basis axis along which this vector has its smallest absolute component.
    ///
    /// Crossing a tangent with this axis gives a well-conditioned normal.
    pub fn least_dominant_axis(&self) -> Self {
        let (ax, ay, az) = (self.x.abs(), self.y.abs(), self.z.abs());
        if ax <= ay && ax <= az {
            Vec3::RIGHT
        } else if ay <= az {
            Vec3::UP
        } else {
            Vec3::FORWARD
        }
    }

    /// Rotate around a unit axis by `angle` radians (Rodrigues).
    pub fn rotate_around(&self, axis: &Vec3, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let k = axis.normalize();
        self.scale(cos) + k.cross(self).scale(sin) + k.scale(k.dot(self) * (1.0 - cos))
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(&b) < 1e-5
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        let n = Vec3::new(3.0, 4.0, 0.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cross_right_up() {
        assert!(close(Vec3::RIGHT.cross(&Vec3::UP), Vec3::FORWARD));
    }

    #[test]
    fn test_least_dominant_axis() {
        assert_eq!(Vec3::new(0.1, 5.0, -3.0).least_dominant_axis(), Vec3::RIGHT);
        assert_eq!(Vec3::new(4.0, 0.2, -3.0).least_dominant_axis(), Vec3::UP);
        assert_eq!(Vec3::new(4.0, -2.0, 0.0).least_dominant_axis(), Vec3::FORWARD);
    }

    #[test]
    fn test_rotate_around_up() {
        let r = Vec3::RIGHT.rotate_around(&Vec3::UP, FRAC_PI_2);
        // Right-handed: +X rotated a quarter turn about +Y lands on -Z
        assert!(close(r, -Vec3::FORWARD));
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = v.rotate_around(&Vec3::new(1.0, 1.0, 0.0), 0.7);
        assert!((r.length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn test_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::splat(2.0);
        assert_eq!(a + b, Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(a - b, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert!(close(a.lerp(&b, 0.5), Vec3::new(1.5, 2.0, 2.5)));
    }
}
