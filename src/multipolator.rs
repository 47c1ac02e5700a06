//! Inverse-distance interpolation on a ragged rectilinear grid buffer.
//!
//! ```rust
//! use multipolator::{interpolate_with_layout, GridLayout};
//!
//! // One dimension with values [0, 1, 2, 3], padded to a row of 5,
//! // and one sample per grid point
//! let grid = [0.0, 1.0, 2.0, 3.0, f64::NAN, 10.0, 20.0, 30.0, 40.0];
//! let layout = GridLayout::detached(1, 5, 1);
//!
//! let mut out = [0.0];
//! interpolate_with_layout(&grid, &layout, &[0.5], &mut out).unwrap();
//! assert!((out[0] - 15.0).abs() < 1e-12);
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Inverse_distance_weighting
use num_traits::Float;
use tracing::trace;

use crate::corners::Corners;
use crate::layout::{GridLayout, Limits, DEFAULT_MAX_DIMS};
use crate::space::ParameterSpace;
use crate::stride::Strides;
use crate::weights::InverseDistance;
use crate::MultipolatorError;

/// Interpolate at one point on a grid buffer that starts with an embedded header.
///
/// The buffer is decoded on every call; use [`Multipolator`] directly
/// to evaluate many points on the same grid.
///
/// # Errors
/// * If the header or grid is malformed or exceeds the default [`Limits`]
/// * If `query` or `out` do not match the grid's dimension and sample counts
/// * If the query is outside the grid
pub fn interpolate<T: Float>(
    grid: &[T],
    query: &[T],
    out: &mut [T],
) -> Result<(), MultipolatorError> {
    let layout = GridLayout::from_header(grid)?;
    interpolate_with_layout(grid, &layout, query, out)
}

/// Interpolate at one point on a grid buffer with an explicitly supplied layout.
///
/// # Errors
/// * If the grid is malformed, disagrees with `layout`, or exceeds the default [`Limits`]
/// * If `query` or `out` do not match the grid's dimension and sample counts
/// * If the query is outside the grid
pub fn interpolate_with_layout<T: Float>(
    grid: &[T],
    layout: &GridLayout,
    query: &[T],
    out: &mut [T],
) -> Result<(), MultipolatorError> {
    Multipolator::<'_, T, DEFAULT_MAX_DIMS>::new(grid, layout, &Limits::default())?
        .interp_one(query, out)
}

/// Interpolate at one point on a grid buffer with an embedded header,
/// allocating a new Vec for the output.
///
/// # Errors
/// * See [`interpolate`]
pub fn interpolate_alloc<T: Float>(grid: &[T], query: &[T]) -> Result<Vec<T>, MultipolatorError> {
    let layout = GridLayout::from_header(grid)?;
    let interpolator =
        Multipolator::<'_, T, DEFAULT_MAX_DIMS>::new(grid, &layout, &Limits::default())?;
    let mut out = vec![T::zero(); interpolator.nsamples()];
    interpolator.interp_one(query, &mut out)?;
    Ok(out)
}

/// An inverse-distance interpolator over a grid buffer of up to `MAXDIMS` dimensions.
///
/// Each evaluation brackets the query on every dimension, visits the 2^ndims
/// corners of the bracketing hypercube, and returns the weighted sum of the
/// sample vectors stored at those corners. Queries outside the grid are
/// rejected; there is no extrapolation.
///
/// Operation Complexity
/// * O(ndims * log2(gridsize)) to bracket the query
/// * O(ndims * 2^ndims) to weight the corners, plus O(nsamples * 2^ndims) to accumulate
///
/// Memory Complexity
/// * Peak stack usage is O(MAXDIMS). Evaluation does not allocate.
///
/// The grid buffer is only borrowed, so one buffer may back any number of
/// interpolators used concurrently.
#[derive(Clone, Copy, Debug)]
pub struct Multipolator<'a, T: Float, const MAXDIMS: usize = DEFAULT_MAX_DIMS> {
    /// Grid values along each dimension
    space: ParameterSpace<'a, T, MAXDIMS>,

    /// Mixed-radix strides into the sample block
    strides: Strides<MAXDIMS>,

    /// Length of the output vector at each grid point
    nsamples: usize,

    /// Sample vectors at each grid point, size nsamples * prod(shape)
    samples: &'a [T],
}

impl<'a, T: Float, const MAXDIMS: usize> Multipolator<'a, T, MAXDIMS> {
    /// Decode a grid buffer and validate it against the layout and limits.
    ///
    /// # Errors
    /// * If the number of dimensions exceeds `limits.max_dims` or `MAXDIMS`
    /// * If any dimension has more values than `limits.max_values`
    /// * If an embedded header disagrees with `layout`
    /// * If the buffer is shorter than the layout and decoded shape require
    /// * If any dimension has fewer than 2 values, or values that are not strictly increasing
    pub fn new(
        grid: &'a [T],
        layout: &GridLayout,
        limits: &Limits,
    ) -> Result<Self, MultipolatorError> {
        layout.validate(limits.max_dims.min(MAXDIMS))?;
        layout.check_header(grid)?;

        let space = ParameterSpace::decode(grid, layout, limits)?;
        let strides = Strides::new(space.shape())?;

        let start = layout.sample_offset()?;
        let end = layout
            .sample_len(space.shape())?
            .checked_add(start)
            .ok_or(MultipolatorError::MalformedGrid("grid layout overflows usize"))?;
        if grid.len() < end {
            return Err(MultipolatorError::Truncated {
                needed: end,
                available: grid.len(),
            });
        }

        Ok(Self {
            space,
            strides,
            nsamples: layout.samples_per_point(),
            samples: &grid[start..end],
        })
    }

    /// Decode a grid buffer that starts with an embedded header, using default limits.
    ///
    /// # Errors
    /// * See [`Multipolator::new`]
    pub fn from_header(grid: &'a [T]) -> Result<Self, MultipolatorError> {
        let layout = GridLayout::from_header(grid)?;
        Self::new(grid, &layout, &Limits::default())
    }

    /// Number of dimensions
    pub fn ndims(&self) -> usize {
        self.space.ndims()
    }

    /// Length of the output vector
    pub fn nsamples(&self) -> usize {
        self.nsamples
    }

    /// Grid values along each dimension
    pub fn space(&self) -> &ParameterSpace<'a, T, MAXDIMS> {
        &self.space
    }

    /// Interpolate the output vector at a single point.
    ///
    /// `out` is overwritten; its contents are unspecified if an error is returned.
    ///
    /// # Errors
    ///   * If `x` does not have one entry per dimension
    ///   * If `out` does not have one entry per sample
    ///   * If any coordinate is outside the grid
    pub fn interp_one(&self, x: &[T], out: &mut [T]) -> Result<(), MultipolatorError> {
        if out.len() != self.nsamples {
            return Err(MultipolatorError::DimensionMismatch {
                expected: self.nsamples,
                found: out.len(),
            });
        }

        let brackets = self.space.brackets(x)?;
        let ndims = self.ndims();
        trace!(brackets = ?&brackets[..ndims], "bracketed query");

        let weights = InverseDistance::new(&self.space, &brackets[..ndims], x)?;

        out.fill(T::zero());
        for corner in Corners::<MAXDIMS>::new(ndims)? {
            let w = weights.weight(&corner);
            let start = self.strides.corner_offset(&corner, &brackets) * self.nsamples;
            let sample = &self.samples[start..start + self.nsamples];
            for k in 0..self.nsamples {
                out[k] = out[k] + w * sample[k];
            }
        }

        Ok(())
    }

    /// Interpolate at a set of points given as one slice of coordinates per dimension,
    /// like `[&xs[..], &ys[..]]`.
    ///
    /// Output vectors are written consecutively, so `out` must hold
    /// `nsamples` values per point.
    ///
    /// # Errors
    ///   * If the number of coordinate slices does not match the dimension count
    ///   * If the coordinate slices have different lengths, or `out` has the wrong size
    ///   * If any point is outside the grid
    pub fn interp(&self, obs: &[&[T]], out: &mut [T]) -> Result<(), MultipolatorError> {
        let (ndims, n) = self.check_obs(obs, out)?;

        let mut tmp = [T::zero(); MAXDIMS];
        for i in 0..n {
            (0..ndims).for_each(|j| tmp[j] = obs[j][i]);
            let chunk = &mut out[i * self.nsamples..(i + 1) * self.nsamples];
            self.interp_one(&tmp[..ndims], chunk)?;
        }

        Ok(())
    }

    /// Interpolate at a set of points, allocating a new Vec for the output.
    ///
    /// # Errors
    ///   * See [`Multipolator::interp`]
    pub fn interp_alloc(&self, obs: &[&[T]]) -> Result<Vec<T>, MultipolatorError> {
        let n = obs.first().map_or(0, |o| o.len());
        let mut out = vec![T::zero(); n * self.nsamples];
        self.interp(obs, &mut out)?;
        Ok(out)
    }

    /// Normalized weight of every corner for the query point `x`,
    /// in the order the corners are enumerated.
    ///
    /// # Errors
    ///   * If `x` does not have one entry per dimension
    ///   * If any coordinate is outside the grid
    pub fn weights(&self, x: &[T]) -> Result<Vec<T>, MultipolatorError> {
        let brackets = self.space.brackets(x)?;
        let ndims = self.ndims();
        let weights = InverseDistance::new(&self.space, &brackets[..ndims], x)?;
        Ok(Corners::<MAXDIMS>::new(ndims)?
            .map(|c| weights.weight(&c))
            .collect())
    }

    /// Validate a batch of observation points, returning the dimension and point counts.
    fn check_obs(&self, obs: &[&[T]], out: &[T]) -> Result<(usize, usize), MultipolatorError> {
        let ndims = self.ndims();
        if obs.len() != ndims {
            return Err(MultipolatorError::DimensionMismatch {
                expected: ndims,
                found: obs.len(),
            });
        }
        let n = obs[0].len();
        if let Some(bad) = obs.iter().find(|o| o.len() != n) {
            return Err(MultipolatorError::DimensionMismatch {
                expected: n,
                found: bad.len(),
            });
        }
        if out.len() != n * self.nsamples {
            return Err(MultipolatorError::DimensionMismatch {
                expected: n * self.nsamples,
                found: out.len(),
            });
        }
        Ok((ndims, n))
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync, const MAXDIMS: usize> Multipolator<'a, T, MAXDIMS> {
    /// Interpolate at a set of points like [`Multipolator::interp`],
    /// spreading the points over the rayon thread pool.
    ///
    /// # Errors
    ///   * See [`Multipolator::interp`]
    pub fn interp_par(&self, obs: &[&[T]], out: &mut [T]) -> Result<(), MultipolatorError> {
        use rayon::prelude::*;

        let (ndims, _) = self.check_obs(obs, out)?;
        out.par_chunks_mut(self.nsamples)
            .enumerate()
            .try_for_each(|(i, chunk)| {
                let mut tmp = [T::zero(); MAXDIMS];
                (0..ndims).for_each(|j| tmp[j] = obs[j][i]);
                self.interp_one(&tmp[..ndims], chunk)
            })
    }
}
