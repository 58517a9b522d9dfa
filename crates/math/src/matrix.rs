use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{Vector3, Vector4};

/// Column-major 4x4 matrix.
///
/// Multiplication composes transforms right to left: `a * b` applied to a
/// column vector runs `b` first, then `a`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Matrix4x4 {
    pub col0: Vector4,
    pub col1: Vector4,
    pub col2: Vector4,
    pub col3: Vector4,
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self::from_cols(Vector4::X, Vector4::Y, Vector4::Z, Vector4::W);

    /// Size of the serialized matrix in bytes.
    pub const BYTE_LEN: usize = 16 * std::mem::size_of::<f32>();

    #[inline]
    pub const fn from_cols(col0: Vector4, col1: Vector4, col2: Vector4, col3: Vector4) -> Self {
        Self {
            col0,
            col1,
            col2,
            col3,
        }
    }

    pub fn translation(t: Vector3) -> Self {
        Self::from_cols(
            Vector4::X,
            Vector4::Y,
            Vector4::Z,
            Vector4::new(t.x, t.y, t.z, 1.0),
        )
    }

    /// Right-handed rotation about +X: `+Y` turns towards `+Z`.
    pub fn rotation_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_cols(
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(0.0, c, s, 0.0),
            Vector4::new(0.0, -s, c, 0.0),
            Vector4::W,
        )
    }

    /// Right-handed rotation about +Y: `+Z` turns towards `+X`.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_cols(
            Vector4::new(c, 0.0, -s, 0.0),
            Vector4::new(0.0, 1.0, 0.0, 0.0),
            Vector4::new(s, 0.0, c, 0.0),
            Vector4::W,
        )
    }

    /// Right-handed rotation about +Z: `+X` turns towards `+Y`.
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_cols(
            Vector4::new(c, s, 0.0, 0.0),
            Vector4::new(-s, c, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 1.0, 0.0),
            Vector4::W,
        )
    }

    /// `Rx * Ry * Rz`: a point is rotated about Z first and about X last.
    pub fn rotation_xyz(angles: Vector3) -> Self {
        Self::rotation_x(angles.x) * Self::rotation_y(angles.y) * Self::rotation_z(angles.z)
    }

    /// `Rz * Ry * Rx`: a point is rotated about X first and about Z last.
    pub fn rotation_zyx(angles: Vector3) -> Self {
        Self::rotation_z(angles.z) * Self::rotation_y(angles.y) * Self::rotation_x(angles.x)
    }

    pub fn scale(s: Vector3) -> Self {
        Self::from_cols(
            Vector4::new(s.x, 0.0, 0.0, 0.0),
            Vector4::new(0.0, s.y, 0.0, 0.0),
            Vector4::new(0.0, 0.0, s.z, 0.0),
            Vector4::W,
        )
    }

    /// World-to-view transform of a camera at `position` oriented by `euler`
    /// (applied as `Rz * Ry * Rx`).
    ///
    /// The camera's world transform is `T(position) * R`, so its inverse is
    /// `transpose(R) * T(-position)`. A pure rotation is orthonormal, which is
    /// why no general inverse is needed.
    pub fn view(position: Vector3, euler: Vector3) -> Self {
        let translation = Self::translation(-position);
        let rotation = Self::rotation_zyx(euler).transpose();
        rotation * translation
    }

    /// Right-handed perspective projection.
    ///
    /// With `f = 1 / tan(fovy / 2)` and `nf = 1 / (near - far)` the columns are
    /// `(f / aspect, 0, 0, 0)`, `(0, f, 0, 0)`, `(0, 0, far * nf, -1)` and
    /// `(0, 0, far * near * nf, 0)`. Passing `far = 0` collapses every depth to
    /// zero; the demo pipeline pairs that with a `GreaterEqual` depth test.
    pub fn perspective(fovy: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        let nf = 1.0 / (near - far);
        Self::from_cols(
            Vector4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Vector4::new(0.0, f, 0.0, 0.0),
            Vector4::new(0.0, 0.0, far * nf, -1.0),
            Vector4::new(0.0, 0.0, far * near * nf, 0.0),
        )
    }

    #[inline]
    pub const fn columns(&self) -> [Vector4; 4] {
        [self.col0, self.col1, self.col2, self.col3]
    }

    /// Sixteen floats, column-major.
    pub fn to_f32_array(&self) -> [f32; 16] {
        let [c0, c1, c2, c3] = self.columns();
        [
            c0.x, c0.y, c0.z, c0.w, //
            c1.x, c1.y, c1.z, c1.w, //
            c2.x, c2.y, c2.z, c2.w, //
            c3.x, c3.y, c3.z, c3.w,
        ]
    }

    pub fn transpose(&self) -> Self {
        let [c0, c1, c2, c3] = self.columns();
        Self::from_cols(
            Vector4::new(c0.x, c1.x, c2.x, c3.x),
            Vector4::new(c0.y, c1.y, c2.y, c3.y),
            Vector4::new(c0.z, c1.z, c2.z, c3.z),
            Vector4::new(c0.w, c1.w, c2.w, c3.w),
        )
    }

    /// Element-wise division. Not an inverse: there is none on this type.
    pub fn div_components(&self, other: &Self) -> Self {
        self.zip_cols(other, |a, b| a / b)
    }

    pub fn is_valid(&self) -> bool {
        self.columns().iter().all(|c| c.is_valid())
    }

    pub fn is_equal(&self, other: &Self, eps: f32) -> bool {
        self.columns()
            .iter()
            .zip(other.columns())
            .all(|(a, b)| a.is_equal(b, eps))
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.is_equal(other, crate::EPSILON)
    }

    pub fn is_equal_exact(&self, other: &Self) -> bool {
        self.columns()
            .iter()
            .zip(other.columns())
            .all(|(a, b)| a.is_equal_exact(b))
    }

    /// Overwrites every column of `self` with those of `other`.
    pub fn assign_from(&mut self, other: &Self) {
        self.col0.assign_from(&other.col0);
        self.col1.assign_from(&other.col1);
        self.col2.assign_from(&other.col2);
        self.col3.assign_from(&other.col3);
    }

    fn map_cols(&self, f: impl Fn(Vector4) -> Vector4) -> Self {
        Self::from_cols(f(self.col0), f(self.col1), f(self.col2), f(self.col3))
    }

    fn zip_cols(&self, other: &Self, f: impl Fn(Vector4, Vector4) -> Vector4) -> Self {
        Self::from_cols(
            f(self.col0, other.col0),
            f(self.col1, other.col1),
            f(self.col2, other.col2),
            f(self.col3, other.col3),
        )
    }
}

impl std::ops::Add for Matrix4x4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_cols(&rhs, |a, b| a + b)
    }
}

impl std::ops::Sub for Matrix4x4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_cols(&rhs, |a, b| a - b)
    }
}

/// Matrix product with `self` on the left.
impl std::ops::Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        rhs.map_cols(|c| self * c)
    }
}

/// Transforms a column vector.
impl std::ops::Mul<Vector4> for Matrix4x4 {
    type Output = Vector4;

    fn mul(self, v: Vector4) -> Vector4 {
        self.col0 * v.x + self.col1 * v.y + self.col2 * v.z + self.col3 * v.w
    }
}

impl std::ops::Add<f32> for Matrix4x4 {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        self.map_cols(|c| c + rhs)
    }
}

impl std::ops::Sub<f32> for Matrix4x4 {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        self.map_cols(|c| c - rhs)
    }
}

impl std::ops::Mul<f32> for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.map_cols(|c| c * rhs)
    }
}

impl std::ops::Div<f32> for Matrix4x4 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        self.map_cols(|c| c / rhs)
    }
}

impl std::ops::Neg for Matrix4x4 {
    type Output = Self;

    fn neg(self) -> Self {
        self.map_cols(|c| -c)
    }
}

impl IntoIterator for Matrix4x4 {
    type Item = Vector4;
    type IntoIter = std::array::IntoIter<Vector4, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns().into_iter()
    }
}

impl From<glam::Mat4> for Matrix4x4 {
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols(
            m.x_axis.into(),
            m.y_axis.into(),
            m.z_axis.into(),
            m.w_axis.into(),
        )
    }
}

impl From<Matrix4x4> for glam::Mat4 {
    fn from(m: Matrix4x4) -> Self {
        glam::Mat4::from_cols(m.col0.into(), m.col1.into(), m.col2.into(), m.col3.into())
    }
}

/// One column per line.
impl std::fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n{}\n{}", self.col0, self.col1, self.col2, self.col3)
    }
}
