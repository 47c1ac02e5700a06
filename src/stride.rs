//! Mixed-radix indexing into the sample block.
//!
//! Grid points are stored with dimension 0 varying fastest:
//! `(x0, y0), (x1, y0), ..., (xn, y0), (x0, y1), ...`.
//! The stride of each dimension is the product of the sizes of all the
//! dimensions before it, and the flat index of a grid point is the dot product
//! of its per-dimension indices with those strides.
//!
//! A buffer written with any other convention is still readable, but every
//! lookup lands on the wrong sample, so producers of grid files must follow
//! this ordering exactly (see [`crate::utils::meshgrid`]).
use crate::bracket::Bracket;
use crate::corners::Corner;
use crate::MultipolatorError;

/// Per-dimension strides of a grid with a given shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strides<const MAXDIMS: usize> {
    ndims: usize,
    strides: [usize; MAXDIMS],
}

impl<const MAXDIMS: usize> Strides<MAXDIMS> {
    /// Build strides as the cumulative product of preceding dimension sizes.
    ///
    /// # Errors
    /// * If `shape` has more than `MAXDIMS` entries
    /// * If the number of grid points is not representable
    pub fn new(shape: &[usize]) -> Result<Self, MultipolatorError> {
        let ndims = shape.len();
        if ndims > MAXDIMS {
            return Err(MultipolatorError::DimensionLimitExceeded {
                what: "Dimension count",
                requested: ndims,
                max: MAXDIMS,
            });
        }

        let mut strides = [0_usize; MAXDIMS];
        let mut acc: usize = 1;
        for i in 0..ndims {
            strides[i] = acc;
            acc = acc
                .checked_mul(shape[i])
                .ok_or(MultipolatorError::MalformedGrid("grid shape overflows usize"))?;
        }

        Ok(Self { ndims, strides })
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.strides[..self.ndims]
    }

    /// Flat index of the grid point with per-dimension indices `loc`.
    #[inline]
    pub fn offset(&self, loc: &[usize]) -> usize {
        let mut i = 0;
        for j in 0..self.ndims {
            i += loc[j] * self.strides[j];
        }
        i
    }

    /// Flat index of the grid point at one corner of a bracketing hypercube.
    #[inline]
    pub fn corner_offset(&self, corner: &Corner<MAXDIMS>, brackets: &[Bracket]) -> usize {
        let mut i = 0;
        for j in 0..self.ndims {
            i += brackets[j].index(corner.side(j)) * self.strides[j];
        }
        i
    }
}
