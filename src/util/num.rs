use crate::{error::RuntimeError, evaluator::core::EvalResult};

/// Converts an `i64` to `f64`, rounding to the nearest representable value.
///
/// Integer operands are promoted this way whenever they meet a real operand,
/// so very large integers lose precision exactly as a float would.
///
/// ## Example
/// ```
/// use fframe::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(-7), -7.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Truncates an `f64` towards zero and converts it to `i64`.
///
/// ## Errors
/// - `RuntimeError::TypeError` if the value is NaN.
/// - `RuntimeError::Overflow` if the value is infinite or outside the `i64`
///   range.
///
/// ## Example
/// ```
/// use fframe::{error::RuntimeError, util::num::f64_to_i64_truncated};
///
/// assert_eq!(f64_to_i64_truncated(3.9).unwrap(), 3);
/// assert_eq!(f64_to_i64_truncated(-3.9).unwrap(), -3);
///
/// let err = f64_to_i64_truncated(f64::INFINITY).unwrap_err();
/// assert_eq!(err, RuntimeError::Overflow);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated(value: f64) -> EvalResult<i64> {
    if value.is_nan() {
        return Err(RuntimeError::TypeError { details:
                                                 "Cannot convert NaN to an integer".to_string() });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(RuntimeError::Overflow);
    }
    Ok(truncated as i64)
}

/// Converts a non-negative `i64` exponent to `u32` for checked integer
/// powers.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the exponent does not fit in a `u32`.
/// No `i64` raised to such an exponent (other than 0, 1 and -1) fits in an
/// `i64` anyway.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub const fn i64_to_u32_checked(value: i64) -> EvalResult<u32> {
    if value < 0 || value > u32::MAX as i64 {
        return Err(RuntimeError::Overflow);
    }
    Ok(value as u32)
}

/// Converts a length or dimension to `i64`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the value exceeds `i64::MAX`.
pub fn usize_to_i64(value: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow)
}

/// Resolves a possibly negative sequence position against a length.
///
/// Negative positions count from the end, so `-1` is the last element.
///
/// ## Errors
/// Returns `RuntimeError::IndexOutOfBounds` if the position does not refer to
/// an element.
///
/// ## Example
/// ```
/// use fframe::{error::RuntimeError, util::num::normalize_index};
///
/// assert_eq!(normalize_index(1, 3).unwrap(), 1);
/// assert_eq!(normalize_index(-1, 3).unwrap(), 2);
/// assert_eq!(normalize_index(3, 3).unwrap_err(),
///            RuntimeError::IndexOutOfBounds { index: 3, len: 3 });
/// ```
pub fn normalize_index(index: i64, len: usize) -> EvalResult<usize> {
    let out_of_bounds = RuntimeError::IndexOutOfBounds { index, len };
    let len_i64 = usize_to_i64(len)?;
    let resolved = if index < 0 { index + len_i64 } else { index };

    if resolved < 0 || resolved >= len_i64 {
        return Err(out_of_bounds);
    }
    usize::try_from(resolved).map_err(|_| out_of_bounds)
}

/// Computes the half-open element range selected by a slice.
///
/// Missing bounds default to the start and end of the sequence. Negative
/// bounds count from the end. Bounds are clamped into `0..=len`, and an
/// empty range is returned when `start >= stop`.
///
/// ## Example
/// ```
/// use fframe::util::num::slice_bounds;
///
/// assert_eq!(slice_bounds(Some(1), None, 5), (1, 5));
/// assert_eq!(slice_bounds(None, Some(-1), 5), (0, 4));
/// assert_eq!(slice_bounds(Some(10), Some(20), 5), (5, 5));
/// assert_eq!(slice_bounds(Some(3), Some(1), 5), (3, 3));
/// ```
#[must_use]
pub fn slice_bounds(start: Option<i64>, stop: Option<i64>, len: usize) -> (usize, usize) {
    let clamp = |bound: i64| -> usize {
        let len_i64 = i64::try_from(len).unwrap_or(i64::MAX);
        let resolved = if bound < 0 { (bound + len_i64).max(0) } else { bound.min(len_i64) };
        usize::try_from(resolved).unwrap_or(0)
    };

    let start = start.map_or(0, clamp);
    let stop = stop.map_or(len, clamp);
    (start, stop.max(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_positions_count_from_the_end() {
        assert_eq!(normalize_index(-3, 3).unwrap(), 0);
        assert!(normalize_index(-4, 3).is_err());
    }

    #[test]
    fn empty_sequences_have_no_valid_index() {
        assert_eq!(normalize_index(0, 0).unwrap_err(),
                   RuntimeError::IndexOutOfBounds { index: 0, len: 0 });
    }

    #[test]
    fn truncation_rejects_nan() {
        assert!(matches!(f64_to_i64_truncated(f64::NAN),
                         Err(RuntimeError::TypeError { .. })));
        assert_eq!(f64_to_i64_truncated(1e300).unwrap_err(), RuntimeError::Overflow);
    }

    #[test]
    fn exponent_conversion_bounds() {
        assert_eq!(i64_to_u32_checked(10).unwrap(), 10);
        assert_eq!(i64_to_u32_checked(-1).unwrap_err(), RuntimeError::Overflow);
        assert_eq!(i64_to_u32_checked(i64::MAX).unwrap_err(), RuntimeError::Overflow);
    }

    #[test]
    fn slices_clamp_negative_bounds() {
        assert_eq!(slice_bounds(Some(-10), Some(2), 5), (0, 2));
        assert_eq!(slice_bounds(None, None, 0), (0, 0));
    }
}
