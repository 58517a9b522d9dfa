use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{Vector3, Vector4};

/// Two-component vector, also used for texture coordinates and sizes.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl_vector!(Vector2, 2, x, y);

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0);

    #[inline]
    pub const fn r(self) -> f32 {
        self.x
    }

    #[inline]
    pub const fn g(self) -> f32 {
        self.y
    }

    #[inline]
    pub const fn width(self) -> f32 {
        self.x
    }

    #[inline]
    pub const fn height(self) -> f32 {
        self.y
    }
}

impl From<Vector3> for Vector2 {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector4> for Vector2 {
    fn from(v: Vector4) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<glam::Vec2> for Vector2 {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for glam::Vec2 {
    fn from(v: Vector2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(Vector2::default(), Vector2::ZERO);
        assert_eq!(Vector2::X, Vector2::new(1.0, 0.0));
        assert_eq!(Vector2::Y, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn aliases_read_the_same_fields() {
        let size = Vector2::new(1280.0, 720.0);
        assert_eq!(size.width(), size.x);
        assert_eq!(size.height(), size.y);
        assert_eq!(size.r(), 1280.0);
        assert_eq!(size.g(), 720.0);
    }

    #[test]
    fn from_wider_vectors_truncates() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Vector2::from(p), Vector2::new(1.0, 2.0));
        let q = Vector4::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(Vector2::from(q), Vector2::new(5.0, 6.0));
    }

    #[test]
    fn arithmetic() {
        let a = Vector2::new(3.0, 4.0);
        let b = Vector2::new(-1.0, 2.0);
        assert_eq!(a + b, Vector2::new(2.0, 6.0));
        assert_eq!(a - b, Vector2::new(4.0, 2.0));
        assert_eq!(a * b, Vector2::new(-3.0, 8.0));
        assert_eq!(a / b, Vector2::new(-3.0, 2.0));
        assert_eq!(a + 1.0, Vector2::new(4.0, 5.0));
        assert_eq!(a - 1.0, Vector2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vector2::new(6.0, 8.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, Vector2::new(1.5, 2.0));
        assert_eq!(-a, Vector2::new(-3.0, -4.0));
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        let v = Vector2::new(1.0, 0.0) / Vector2::ZERO;
        assert_eq!(v.x, f32::INFINITY);
        assert!(v.y.is_nan());
        assert!(!v.is_valid());

        let inv = Vector2::new(2.0, 0.0).invert();
        assert_eq!(inv.x, 0.5);
        assert_eq!(inv.y, f32::INFINITY);
    }

    #[test]
    fn length_and_distance() {
        let a = Vector2::new(3.0, 4.0);
        assert_eq!(a.len(), 5.0);
        assert_eq!(a.sqr_len(), 25.0);
        let b = Vector2::new(6.0, 8.0);
        assert_eq!(a.dist(b), 5.0);
        assert_eq!(a.sqr_dist(b), 25.0);
        assert_eq!(a.dist(b), (a - b).len());
    }

    #[test]
    fn norm_guards_zero_length() {
        assert_eq!(Vector2::ZERO.norm(), Vector2::ZERO);
        let n = Vector2::new(3.0, 4.0).norm();
        assert!(n.is_equal(Vector2::new(0.6, 0.8), 1e-6));
        assert!((n.len() - 1.0).abs() <= 1e-6);
    }

    #[test]
    fn lerp_extrapolates() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(2.0, 4.0);
        assert_eq!(a.lerp(b, 0.5), Vector2::new(1.0, 2.0));
        assert_eq!(a.lerp(b, 2.0), Vector2::new(4.0, 8.0));
        assert_eq!(a.lerp(b, -1.0), Vector2::new(-2.0, -4.0));
    }

    #[test]
    fn equality_variants() {
        let p = Vector2::new(1.0 / 3.0, 2.0 / 3.0);
        let q = Vector2::new(0.333_333_3, 0.666_666_6);
        assert!(p.approx_eq(q));
        assert!(!p.is_equal_exact(Vector2::new(0.333_333, 0.666_666)));
        assert!(Vector2::new(-2.0, 4.0).is_equal_exact(Vector2::new(-2.0, 4.0)));
    }

    #[test]
    fn assign_from_overwrites_receiver_only() {
        let source = Vector2::new(7.0, 8.0);
        let mut target = Vector2::new(1.0, 2.0);
        target.assign_from(&source);
        assert_eq!(target, source);
        assert_eq!(source, Vector2::new(7.0, 8.0));
    }

    #[test]
    fn serialization_layout() {
        let v = Vector2::new(1.5, -2.5);
        assert_eq!(v.to_f32_array(), [1.5, -2.5]);
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 8);
        assert_eq!(bytemuck::cast_slice::<u8, f32>(bytes), &[1.5, -2.5]);
    }

    #[test]
    fn display() {
        assert_eq!(Vector2::new(3.0, -4.5).to_string(), "(3, -4.5)^T");
    }
}
