//! Linear algebra kernel: 2/3/4-component vectors and a column-major 4x4 matrix.
//!
//! # Invariants
//! - Every operation is a pure function of its inputs. `assign_from` is the only
//!   mutator and it only touches the receiver.
//! - No operation panics on numeric input. Division by zero and non-finite values
//!   follow IEEE-754; use `is_valid` / `is_equal` to detect anomalies afterwards.
//! - `to_f32_array` emits components in declaration order with no padding. For
//!   matrices that is `col0.xyzw, col1.xyzw, col2.xyzw, col3.xyzw`.

#[macro_use]
mod macros;

pub mod matrix;
pub mod scalar;
pub mod vector2;
pub mod vector3;
pub mod vector4;

pub use matrix::Matrix4x4;
pub use scalar::{EPSILON, are_floats_equal, are_floats_equal_exact};
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
