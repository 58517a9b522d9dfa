/// Implements the dimension-independent part of a vector type: construction,
/// geometric queries, comparisons, serialization and the arithmetic operators.
macro_rules! impl_vector {
    ($name:ident, $n:literal, $($field:ident),+) => {
        impl $name {
            #[inline]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// Components in declaration order, tightly packed for GPU upload.
            #[inline]
            pub const fn to_f32_array(self) -> [f32; $n] {
                [$(self.$field),+]
            }

            #[inline]
            pub fn dot(self, other: Self) -> f32 {
                0.0 $(+ self.$field * other.$field)+
            }

            #[inline]
            pub fn sqr_len(self) -> f32 {
                self.dot(self)
            }

            #[inline]
            pub fn len(self) -> f32 {
                self.sqr_len().sqrt()
            }

            #[inline]
            pub fn sqr_dist(self, other: Self) -> f32 {
                (self - other).sqr_len()
            }

            #[inline]
            pub fn dist(self, other: Self) -> f32 {
                self.sqr_dist(other).sqrt()
            }

            /// Unit-length vector in the same direction. A vector whose squared
            /// length is approximately zero is returned unchanged.
            pub fn norm(self) -> Self {
                let sqr_len = self.sqr_len();
                if $crate::scalar::are_floats_equal(sqr_len, 0.0, $crate::scalar::EPSILON) {
                    return self;
                }
                self * (1.0 / sqr_len.sqrt())
            }

            /// Unclamped linear interpolation: `t` outside `[0, 1]` extrapolates.
            #[inline]
            pub fn lerp(self, other: Self, t: f32) -> Self {
                Self { $($field: self.$field + t * (other.$field - self.$field)),+ }
            }

            /// Component-wise reciprocal. Zero components become infinities.
            #[inline]
            pub fn invert(self) -> Self {
                Self { $($field: 1.0 / self.$field),+ }
            }

            /// True when every component is finite.
            #[inline]
            pub fn is_valid(self) -> bool {
                true $(&& self.$field.is_finite())+
            }

            pub fn is_equal(self, other: Self, eps: f32) -> bool {
                true $(&& $crate::scalar::are_floats_equal(self.$field, other.$field, eps))+
            }

            /// `is_equal` with the default tolerance.
            #[inline]
            pub fn approx_eq(self, other: Self) -> bool {
                self.is_equal(other, $crate::scalar::EPSILON)
            }

            pub fn is_equal_exact(self, other: Self) -> bool {
                true $(&& $crate::scalar::are_floats_equal_exact(self.$field, other.$field))+
            }

            /// Overwrites every component of `self` with those of `other`.
            ///
            /// This is the only mutating operation on the type.
            #[inline]
            pub fn assign_from(&mut self, other: &Self) {
                $(self.$field = other.$field;)+
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl std::ops::Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl std::ops::Div for $name {
            type Output = Self;

            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl std::ops::Add<f32> for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: f32) -> Self {
                Self { $($field: self.$field + rhs),+ }
            }
        }

        impl std::ops::Sub<f32> for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: f32) -> Self {
                Self { $($field: self.$field - rhs),+ }
            }
        }

        impl std::ops::Mul<f32> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl std::ops::Mul<$name> for f32 {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl std::ops::Div<f32> for $name {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl From<[f32; $n]> for $name {
            fn from(value: [f32; $n]) -> Self {
                let [$($field),+] = value;
                Self { $($field),+ }
            }
        }

        impl From<$name> for [f32; $n] {
            fn from(value: $name) -> Self {
                value.to_f32_array()
            }
        }

        impl IntoIterator for $name {
            type Item = f32;
            type IntoIter = std::array::IntoIter<f32, $n>;

            fn into_iter(self) -> Self::IntoIter {
                self.to_f32_array().into_iter()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "(")?;
                for (i, c) in self.to_f32_array().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, ")^T")
            }
        }
    };
}
