/// Default tolerance for approximate comparisons.
pub const EPSILON: f32 = 1e-6;

/// Approximate float comparison with a tolerance relative to the larger magnitude.
///
/// Values are equal when `|x - y| <= eps * max(1, max(|x|, |y|))`, so `eps` acts
/// as an absolute bound near zero and a relative bound for large magnitudes.
/// Identical values always compare equal; any other pair involving a non-finite
/// value does not.
pub fn are_floats_equal(x: f32, y: f32, eps: f32) -> bool {
    if x == y {
        return true;
    }
    if !x.is_finite() || !y.is_finite() {
        return false;
    }
    (x - y).abs() <= eps * 1.0_f32.max(x.abs().max(y.abs()))
}

/// Bit-for-bit comparison. `0.0` and `-0.0` differ; a NaN equals itself.
pub fn are_floats_equal_exact(x: f32, y: f32) -> bool {
    x.to_bits() == y.to_bits()
}
