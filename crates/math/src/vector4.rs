use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{Vector2, Vector3};

/// Four-component vector in homogeneous coordinates, also used for RGBA colors.
///
/// `w` defaults to 1.0, so `Vector4::default()` is the origin point rather than
/// a null direction. `Vector4::ZERO` has every component zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl_vector!(Vector4, 4, x, y, z, w);

impl Default for Vector4 {
    fn default() -> Self {
        Self::W
    }
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// A point (`w = 1`) at the given position.
    #[inline]
    pub const fn point(p: Vector3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    /// A direction (`w = 0`), unaffected by translation.
    #[inline]
    pub const fn direction(d: Vector3) -> Self {
        Self::new(d.x, d.y, d.z, 0.0)
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

    #[inline]
    pub const fn a(self) -> f32 {
        self.w
    }
}

impl From<Vector2> for Vector4 {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y, 0.0, 1.0)
    }
}

impl From<Vector3> for Vector4 {
    fn from(v: Vector3) -> Self {
        Self::point(v)
    }
}

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}
