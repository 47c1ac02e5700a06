//! Description of how a grid buffer is laid out in memory.
//!
//! A grid buffer is a flat sequence of floats made of up to three blocks:
//!
//! ```text
//! [ header row     ]  row_width values: D, M, padding   (embedded header only)
//! [ parameter row 0]  row_width values: sorted grid values of dimension 0, NaN-padded
//! [ ...            ]
//! [ parameter row D-1]
//! [ sample block   ]  M * prod(shape) values, dimension 0 varying fastest
//! ```
//!
//! With an embedded header every row is `M` values wide, so the header row
//! must have room for both D and M. With a detached header, D, the row width
//! and M are supplied out of band and the buffer starts at the parameter block.
use num_traits::Float;

use crate::MultipolatorError;

/// Revision of the buffer layout described by [`GridLayout`].
pub const LAYOUT_VERSION: u32 = 1;

/// Default maximum number of dimensions.
pub const DEFAULT_MAX_DIMS: usize = 10;

/// Default maximum number of valid grid values along one dimension.
pub const DEFAULT_MAX_VALUES: usize = 100;

/// Where the dimension and sample counts are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Header {
    /// The first row of the buffer holds D and M.
    Embedded,
    /// D and M are supplied separately; the buffer holds no header.
    Detached,
}

/// Upper bounds applied while decoding a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of dimensions
    pub max_dims: usize,

    /// Maximum number of valid values in any one dimension
    pub max_values: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dims: DEFAULT_MAX_DIMS,
            max_values: DEFAULT_MAX_VALUES,
        }
    }
}

/// Layout of a grid buffer, version [`LAYOUT_VERSION`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    ndims: usize,
    row_width: usize,
    samples_per_point: usize,
    header: Header,
}

impl GridLayout {
    /// Layout of a buffer without a header, starting directly with the parameter block.
    pub fn detached(ndims: usize, row_width: usize, samples_per_point: usize) -> Self {
        Self {
            ndims,
            row_width,
            samples_per_point,
            header: Header::Detached,
        }
    }

    /// Layout of a buffer with an embedded header row.
    /// Rows are `samples_per_point` values wide.
    pub fn embedded(ndims: usize, samples_per_point: usize) -> Self {
        Self {
            ndims,
            row_width: samples_per_point,
            samples_per_point,
            header: Header::Embedded,
        }
    }

    /// Read the layout from the header embedded at the start of `grid`.
    ///
    /// # Errors
    /// * If the buffer is too short to hold a header
    /// * If either count is not a positive integer
    /// * If the rows are too narrow to hold the header itself
    pub fn from_header<T: Float>(grid: &[T]) -> Result<Self, MultipolatorError> {
        if grid.len() < 2 {
            return Err(MultipolatorError::Truncated {
                needed: 2,
                available: grid.len(),
            });
        }
        let ndims = header_count(grid[0])?;
        let samples_per_point = header_count(grid[1])?;
        if samples_per_point < 2 {
            return Err(MultipolatorError::MalformedGrid(
                "embedded header requires at least 2 samples per point",
            ));
        }

        Ok(Self::embedded(ndims, samples_per_point))
    }

    /// Number of dimensions, D
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Width of each row of the header and parameter blocks
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Length of the output vector at each grid point, M
    pub fn samples_per_point(&self) -> usize {
        self.samples_per_point
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Offset of the parameter block
    pub fn param_offset(&self) -> usize {
        match self.header {
            Header::Embedded => self.row_width,
            Header::Detached => 0,
        }
    }

    /// Offset of the sample block
    ///
    /// # Errors
    /// * If the offset is not representable
    pub fn sample_offset(&self) -> Result<usize, MultipolatorError> {
        self.row_width
            .checked_mul(self.ndims)
            .and_then(|n| n.checked_add(self.param_offset()))
            .ok_or(MultipolatorError::MalformedGrid("grid layout overflows usize"))
    }

    /// Number of values in the sample block for a grid of the given shape
    ///
    /// # Errors
    /// * If the size is not representable
    pub fn sample_len(&self, shape: &[usize]) -> Result<usize, MultipolatorError> {
        shape
            .iter()
            .try_fold(self.samples_per_point, |acc, &n| acc.checked_mul(n))
            .ok_or(MultipolatorError::MalformedGrid("grid shape overflows usize"))
    }

    /// Check that the declared counts are usable and within `limits`
    ///
    /// # Errors
    /// * If there are no dimensions or no samples per point
    /// * If the dimension count exceeds `max_dims`
    pub fn validate(&self, max_dims: usize) -> Result<(), MultipolatorError> {
        if self.ndims == 0 {
            return Err(MultipolatorError::MalformedGrid(
                "grid must have at least one dimension",
            ));
        }
        if self.samples_per_point == 0 {
            return Err(MultipolatorError::MalformedGrid(
                "grid must have at least one sample per point",
            ));
        }
        if self.ndims > max_dims {
            return Err(MultipolatorError::DimensionLimitExceeded {
                what: "Dimension count",
                requested: self.ndims,
                max: max_dims,
            });
        }
        Ok(())
    }

    /// Check that an embedded header in `grid` agrees with this layout.
    /// Always succeeds for detached layouts.
    ///
    /// # Errors
    /// * If the header values differ from the layout
    pub fn check_header<T: Float>(&self, grid: &[T]) -> Result<(), MultipolatorError> {
        if self.header == Header::Detached {
            return Ok(());
        }
        let found = Self::from_header(grid)?;
        if found != *self {
            return Err(MultipolatorError::MalformedGrid(
                "embedded header disagrees with the declared layout",
            ));
        }
        Ok(())
    }
}

/// Interpret a header entry as a non-negative integer count
fn header_count<T: Float>(v: T) -> Result<usize, MultipolatorError> {
    if v.fract() != T::zero() {
        return Err(MultipolatorError::MalformedGrid(
            "header counts must be whole numbers",
        ));
    }
    v.to_usize().ok_or(MultipolatorError::MalformedGrid(
        "header counts must be non-negative integers that fit in usize",
    ))
}
