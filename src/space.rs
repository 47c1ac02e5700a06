//! Decoding of the per-dimension grid values from a grid buffer.
use num_traits::Float;
use tracing::debug;

use crate::bracket::{bracket, Bracket};
use crate::layout::{GridLayout, Limits};
use crate::MultipolatorError;

/// Read-only view of the grid values along each dimension.
///
/// The NaN padding of the buffer's parameter rows is resolved into an explicit
/// length per dimension during decoding; nothing past the first NaN of a row
/// is ever visible through this view.
#[derive(Clone, Copy, Debug)]
pub struct ParameterSpace<'a, T: Float, const MAXDIMS: usize> {
    /// Number of dimensions
    ndims: usize,

    /// Number of valid values along each dimension
    shape: [usize; MAXDIMS],

    /// Valid values along each dimension, strictly increasing
    values: [&'a [T]; MAXDIMS],
}

impl<'a, T: Float, const MAXDIMS: usize> ParameterSpace<'a, T, MAXDIMS> {
    /// Decode the parameter block of `grid`.
    ///
    /// Each row's valid length is the number of entries before its first NaN.
    ///
    /// # Errors
    /// * If the dimension count exceeds `limits.max_dims` or `MAXDIMS`
    /// * If any dimension has more valid values than `limits.max_values`
    /// * If the buffer is too short to hold the parameter block
    /// * If any dimension has fewer than 2 values, or values that are not strictly increasing
    pub fn decode(
        grid: &'a [T],
        layout: &GridLayout,
        limits: &Limits,
    ) -> Result<Self, MultipolatorError> {
        layout.validate(limits.max_dims.min(MAXDIMS))?;

        let ndims = layout.ndims();
        let width = layout.row_width();
        let needed = layout.sample_offset()?;
        if grid.len() < needed {
            return Err(MultipolatorError::Truncated {
                needed,
                available: grid.len(),
            });
        }

        let mut shape = [0_usize; MAXDIMS];
        let mut values: [&'a [T]; MAXDIMS] = [&[]; MAXDIMS];
        let start = layout.param_offset();
        for i in 0..ndims {
            let row = &grid[start + i * width..start + (i + 1) * width];
            let n = row.iter().position(|v| v.is_nan()).unwrap_or(width);

            if n > limits.max_values {
                return Err(MultipolatorError::DimensionLimitExceeded {
                    what: "Values per dimension",
                    requested: n,
                    max: limits.max_values,
                });
            }
            if n < 2 {
                return Err(MultipolatorError::MalformedGrid(
                    "every dimension needs at least 2 grid values",
                ));
            }
            // NaN only terminates a row
            if !row[..n].iter().all(|v| v.is_finite()) {
                return Err(MultipolatorError::MalformedGrid(
                    "grid values must be finite",
                ));
            }
            if !row[..n].windows(2).all(|w| w[1] > w[0]) {
                return Err(MultipolatorError::MalformedGrid(
                    "grid values must be strictly increasing",
                ));
            }

            shape[i] = n;
            values[i] = &row[..n];
        }

        debug!(ndims, shape = ?&shape[..ndims], "decoded parameter space");

        Ok(Self {
            ndims,
            shape,
            values,
        })
    }

    /// Number of dimensions
    #[inline]
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Number of valid values along each dimension
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape[..self.ndims]
    }

    /// Valid grid values along one dimension
    #[inline]
    pub fn values(&self, dim: usize) -> &'a [T] {
        self.values[dim]
    }

    /// Find the bracket containing each coordinate of `x`.
    /// Only the first `ndims` entries of the result are meaningful.
    ///
    /// # Errors
    /// * If `x` does not have one entry per dimension
    /// * If any coordinate is outside its dimension's range
    pub fn brackets(&self, x: &[T]) -> Result<[Bracket; MAXDIMS], MultipolatorError> {
        if x.len() != self.ndims {
            return Err(MultipolatorError::DimensionMismatch {
                expected: self.ndims,
                found: x.len(),
            });
        }

        let mut out = [Bracket::default(); MAXDIMS];
        for i in 0..self.ndims {
            out[i] = bracket(self.values[i], x[i], i)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::DEFAULT_MAX_DIMS;

    const NAN: f64 = f64::NAN;

    #[test]
    fn test_decode_ragged() {
        #[rustfmt::skip]
        let grid = [
            0.0, 1.0, 2.0, 3.0, NAN,
            -1.0, 1.0, NAN, NAN, NAN,
            5.0, 6.0, 7.0, 8.0, 9.0,
        ];
        let layout = GridLayout::detached(3, 5, 1);
        let space: ParameterSpace<'_, f64, DEFAULT_MAX_DIMS> =
            ParameterSpace::decode(&grid, &layout, &Limits::default()).unwrap();

        assert_eq!(space.ndims(), 3);
        assert_eq!(space.shape(), &[4, 2, 5]);
        assert_eq!(space.values(0), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(space.values(1), &[-1.0, 1.0]);
        assert_eq!(space.values(2), &[5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_decode_ignores_values_after_sentinel() {
        let grid = [0.0, 1.0, NAN, 4.0, 5.0];
        let layout = GridLayout::detached(1, 5, 1);
        let space = ParameterSpace::<'_, f64, 2>::decode(&grid, &layout, &Limits::default()).unwrap();
        assert_eq!(space.shape(), &[2]);
    }

    #[test]
    fn test_decode_embedded_header() {
        #[rustfmt::skip]
        let grid = [
            2.0, 3.0, NAN,
            0.0, 1.0, NAN,
            0.0, 0.5, 1.0,
        ];
        let layout = GridLayout::from_header(&grid).unwrap();
        let space = ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &Limits::default()).unwrap();
        assert_eq!(space.shape(), &[2, 3]);
        assert_eq!(space.values(1), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_decode_limits() {
        let grid = [0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0];

        // Too many values per dimension
        let limits = Limits {
            max_dims: 4,
            max_values: 3,
        };
        let layout = GridLayout::detached(2, 4, 1);
        assert!(matches!(
            ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits),
            Err(MultipolatorError::DimensionLimitExceeded { requested: 4, max: 3, .. })
        ));

        // Too many dimensions for the configured limit
        let limits = Limits {
            max_dims: 1,
            max_values: 10,
        };
        assert!(matches!(
            ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits),
            Err(MultipolatorError::DimensionLimitExceeded { requested: 2, max: 1, .. })
        ));

        // Too many dimensions for the fixed storage
        assert!(matches!(
            ParameterSpace::<'_, f64, 1>::decode(&grid, &layout, &Limits::default()),
            Err(MultipolatorError::DimensionLimitExceeded { requested: 2, max: 1, .. })
        ));
    }

    #[test]
    fn test_decode_malformed() {
        let limits = Limits::default();

        // Truncated parameter block
        let grid = [0.0, 1.0, 2.0];
        let layout = GridLayout::detached(2, 2, 1);
        assert!(matches!(
            ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits),
            Err(MultipolatorError::Truncated { needed: 4, available: 3 })
        ));

        // Not increasing
        let grid = [0.0, 2.0, 1.0];
        let layout = GridLayout::detached(1, 3, 1);
        assert!(matches!(
            ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits),
            Err(MultipolatorError::MalformedGrid(_))
        ));

        // Duplicate value
        let grid = [0.0, 1.0, 1.0];
        assert!(ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits).is_err());

        // Single value
        let grid = [0.0, NAN, NAN];
        assert!(ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits).is_err());
    }

    #[test]
    fn test_decode_rejects_infinite_values() {
        let limits = Limits::default();
        let layout = GridLayout::detached(1, 3, 1);
        let inf = f64::INFINITY;

        for grid in [[0.0, inf, NAN], [-inf, 0.0, NAN], [0.0, 1.0, inf]] {
            assert!(matches!(
                ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &limits),
                Err(MultipolatorError::MalformedGrid(_))
            ));
        }
    }

    #[test]
    fn test_brackets_dimension_mismatch() {
        let grid = [0.0, 1.0, 0.0, 1.0];
        let layout = GridLayout::detached(2, 2, 1);
        let space = ParameterSpace::<'_, f64, 4>::decode(&grid, &layout, &Limits::default()).unwrap();
        assert!(matches!(
            space.brackets(&[0.5]),
            Err(MultipolatorError::DimensionMismatch { expected: 2, found: 1 })
        ));
        let b = space.brackets(&[0.5, 0.0]).unwrap();
        assert_eq!(b[0], Bracket { left: 0, right: 1 });
        assert_eq!(b[1], Bracket { left: 0, right: 1 });
    }
}
