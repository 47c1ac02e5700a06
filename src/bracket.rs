//! Location of a query coordinate between two adjacent grid values.
use num_traits::Float;

use crate::MultipolatorError;

/// Indices of the two grid values surrounding a coordinate, with `right == left + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bracket {
    pub left: usize,
    pub right: usize,
}

impl Bracket {
    /// Grid index for a corner side, 0 for left and 1 for right.
    #[inline]
    pub fn index(&self, side: usize) -> usize {
        if side == 0 {
            self.left
        } else {
            self.right
        }
    }
}

/// Find the tightest bracket around `x` in the strictly increasing `values`,
/// such that `values[left] <= x < values[right]`.
///
/// A coordinate equal to a grid value takes that value as its left end.
/// The last grid value can never be a left end, so `x` equal to the maximum
/// is out of range.
///
/// # Errors
/// * If `x` is below the first value, at or above the last value, or NaN
#[inline]
pub fn bracket<T: Float>(values: &[T], x: T, dim: usize) -> Result<Bracket, MultipolatorError> {
    // Bisection search for the number of values at or below `x`,
    // which is where a left-to-right scan would stop.
    let i = values.partition_point(|v| *v <= x);
    let left = i.saturating_sub(1);
    let right = left + 1;

    if x.is_nan() || right >= values.len() || x < values[0] {
        let bound = |v: Option<&T>| v.and_then(|v| v.to_f64()).unwrap_or(f64::NAN);
        return Err(MultipolatorError::OutOfRange {
            dim,
            value: x.to_f64().unwrap_or(f64::NAN),
            min: bound(values.first()),
            max: bound(values.last()),
        });
    }

    Ok(Bracket { left, right })
}
