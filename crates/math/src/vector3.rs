use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{Vector2, Vector4};

/// Three-component vector: positions, directions, Euler angles and RGB colors.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl_vector!(Vector3, 3, x, y, z);

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Right-handed cross product. The result is orthogonal to both inputs and
    /// its length is the area of the parallelogram they span.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub const fn r(self) -> f32 {
        self.x
    }

    #[inline]
    pub const fn g(self) -> f32 {
        self.y
    }

    #[inline]
    pub const fn b(self) -> f32 {
        self.z
    }
}

impl From<Vector2> for Vector3 {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y, 0.0)
    }
}

impl From<Vector4> for Vector3 {
    fn from(v: Vector4) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> [Vector3; 4] {
        [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-4.5, 0.25, 8.0),
            Vector3::new(0.0, -7.0, 0.5),
            Vector3::new(100.0, -0.001, 3.5),
        ]
    }

    #[test]
    fn constants() {
        assert_eq!(Vector3::default(), Vector3::ZERO);
        assert_eq!(Vector3::X.to_f32_array(), [1.0, 0.0, 0.0]);
        assert_eq!(Vector3::Y.to_f32_array(), [0.0, 1.0, 0.0]);
        assert_eq!(Vector3::Z.to_f32_array(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn conversions() {
        assert_eq!(Vector3::from(Vector2::new(1.0, 2.0)), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(
            Vector3::from(Vector4::new(5.0, 6.0, 7.0, 8.0)),
            Vector3::new(5.0, 6.0, 7.0)
        );
        let g: glam::Vec3 = Vector3::new(1.0, 2.0, 3.0).into();
        assert_eq!(g, glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3::from(g), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn color_aliases() {
        let c = Vector3::new(0.1, 0.2, 0.3);
        assert_eq!((c.r(), c.g(), c.b()), (c.x, c.y, c.z));
    }

    #[test]
    fn identity_and_inverse_laws() {
        for v in samples() {
            assert!((v + Vector3::ZERO).is_equal_exact(v));
            assert!((v * 1.0).is_equal_exact(v));
            assert!((-(-v)).is_equal_exact(v));
        }
    }

    #[test]
    fn add_and_dot_commute() {
        let s = samples();
        for a in s {
            for b in s {
                assert_eq!(a + b, b + a);
                assert_eq!(a.dot(b), b.dot(a));
            }
        }
    }

    #[test]
    fn dot_is_bilinear() {
        let [a, b, c, _] = samples();
        let k = 2.5;
        let lhs = (a * k + b).dot(c);
        let rhs = k * a.dot(c) + b.dot(c);
        assert!(crate::are_floats_equal(lhs, rhs, 1e-5));
    }

    #[test]
    fn cross_product_properties() {
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
        for v in samples() {
            assert_eq!(v.cross(v), Vector3::ZERO);
        }
    }

    #[test]
    fn cross_is_orthogonal_with_parallelogram_length() {
        let a = Vector3::new(2.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 3.0, 0.0);
        let c = a.cross(b);
        assert_eq!(c.dot(a), 0.0);
        assert_eq!(c.dot(b), 0.0);
        assert_eq!(c.len(), 6.0);
    }

    #[test]
    fn cross_of_parallel_vectors_is_zero() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let c = a.cross(a * -4.0);
        assert!(c.is_valid());
        assert_eq!(c, Vector3::ZERO);
    }

    #[test]
    fn normalization() {
        for v in samples() {
            let n = v.norm();
            assert!(crate::are_floats_equal(n.len(), 1.0, 1e-6), "{v} -> {n}");
        }
        assert_eq!(Vector3::ZERO.norm(), Vector3::ZERO);
        let tiny = Vector3::new(1e-4, 0.0, 0.0);
        assert_eq!(tiny.norm(), tiny);
    }

    #[test]
    fn distance_consistency() {
        let s = samples();
        for a in s {
            for b in s {
                assert_eq!(a.dist(b), (a - b).len());
                let d = a.dist(b);
                assert!(crate::are_floats_equal(a.sqr_dist(b), d * d, 1e-5));
            }
        }
    }

    #[test]
    fn invert_and_validity() {
        let v = Vector3::new(2.0, -4.0, 0.0).invert();
        assert_eq!(v.x, 0.5);
        assert_eq!(v.y, -0.25);
        assert_eq!(v.z, f32::INFINITY);
        assert!(!v.is_valid());
        assert!(Vector3::new(1.0, 2.0, 3.0).is_valid());
        assert!(!Vector3::new(f32::NAN, 0.0, 0.0).is_valid());
    }

    #[test]
    fn lerp_endpoints() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(3.0, 2.0, -1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vector3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn serialization_matches_components() {
        for v in samples() {
            let arr = v.to_f32_array();
            assert_eq!(arr.len(), 3);
            assert_eq!(arr, [v.x, v.y, v.z]);
            assert_eq!(v.into_iter().collect::<Vec<_>>(), arr.to_vec());
        }
        assert_eq!(std::mem::size_of::<Vector3>(), 12);
    }

    #[test]
    fn serde_round_trip_through_json() {
        let v = Vector3::new(0.5, -1.0, 2.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":-1.0,"z":2.0}"#);
        let back: Vector3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn display_lists_components_in_order() {
        assert_eq!(Vector3::new(3.1, 4.2, -5.3).to_string(), "(3.1, 4.2, -5.3)^T");
    }
}
