//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;

use crate::{EPSILON, Float, Sign};

/// Compares two values, but considers them equal if they are separated by
/// less than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float> + PartialEq>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns whether `x` has an absolute value less than `EPSILON`.
pub fn is_approx_zero(x: Float) -> bool {
    x.abs() < EPSILON
}
/// Returns whether `x` has an absolute value of at least `EPSILON`.
pub fn is_approx_nonzero(x: Float) -> bool {
    !is_approx_zero(x)
}
/// Returns whether `x` is less than `-EPSILON`.
pub fn is_approx_negative(x: Float) -> bool {
    x <= -EPSILON
}
/// Returns whether `x` is greater than `EPSILON`.
pub fn is_approx_positive(x: Float) -> bool {
    x >= EPSILON
}

/// Returns the sign of `x`, or `None` if it is within `EPSILON` of zero.
pub fn approx_sign(x: Float) -> Option<Sign> {
    if is_approx_positive(x) {
        Some(Sign::Pos)
    } else if is_approx_negative(x) {
        Some(Sign::Neg)
    } else {
        None
    }
}

/// Divides `n` by `d`, or returns `None` if `d` is approximately zero.
pub fn try_div(n: Float, d: Float) -> Option<Float> {
    is_approx_nonzero(d).then(|| n / d)
}
/// Returns the square root of `x`, or `None` if `x` is negative by more than
/// `EPSILON`. Tiny negative values are clamped to zero.
pub fn try_sqrt(x: Float) -> Option<Float> {
    (!is_approx_negative(x)).then(|| x.max(0.0).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_sign() {
        assert_eq!(approx_sign(1.0), Some(Sign::Pos));
        assert_eq!(approx_sign(-0.5), Some(Sign::Neg));
        assert_eq!(approx_sign(EPSILON / 10.0), None);
        assert_eq!(approx_sign(-EPSILON / 10.0), None);
    }

    #[test]
    fn test_try_sqrt_clamps_tiny_negatives() {
        assert_eq!(try_sqrt(4.0), Some(2.0));
        assert_eq!(try_sqrt(-EPSILON / 10.0), Some(0.0));
        assert_eq!(try_sqrt(-1.0), None);
    }
}
