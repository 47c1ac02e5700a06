//! N-dimensional inverse-distance interpolation on ragged rectilinear grids,
//! for turning a large precomputed lookup table into a continuous predictor.
//!
//! A grid is a flat buffer of floats holding a sorted list of values for each
//! dimension (the parameter block) followed by one output vector per grid point
//! (the sample block). Given a query point inside the grid, the interpolator
//! finds the grid cell containing it, visits the 2^ndims corners of that cell,
//! and returns the inverse-distance weighted sum of the corner output vectors.
//!
//! # Grid Layout
//! See [`layout`] for the exact buffer layout. Dimensions may have different
//! numbers of values; shorter rows are padded with NaN, which marks the end of
//! that dimension's values. Sample vectors are stored with the first dimension
//! varying fastest.
//!
//! # Performance Scalings
//! Each evaluation performs a bisection search on every dimension, then
//! weights and accumulates 2^ndims corners.
//!
//! | Step        | RAM          | Cost                           |
//! |-------------|--------------|--------------------------------|
//! | bracketing  | O(MAXDIMS)   | O(ndims * log2(gridsize))      |
//! | weighting   | O(MAXDIMS)   | O(ndims * 2^ndims)             |
//! | accumulation| O(nsamples)  | O(nsamples * 2^ndims)          |
//!
//! # Example: Embedded Header
//! ```rust
//! use multipolator::{interpolate_alloc, pack_grid, GridLayout};
//!
//! // Define a grid
//! let x = [1.0_f64, 2.0, 4.0];
//! let y = [0.0_f64, 10.0];
//!
//! // Two output values at each of the 3 x 2 grid points,
//! // with the first dimension varying fastest
//! let samples = [
//!     1.0, -1.0, 2.0, -2.0, 4.0, -4.0,
//!     11.0, -11.0, 12.0, -12.0, 14.0, -14.0,
//! ];
//!
//! // Pack into a buffer whose first row holds the dimension and sample counts
//! let layout = GridLayout::embedded(2, 2);
//! let grid = pack_grid(&[&x[..], &y[..]], &samples, &layout).unwrap();
//!
//! // Interpolate at a point inside the grid
//! let out = interpolate_alloc(&grid, &[1.0, 0.0]).unwrap();
//! assert_eq!(out, vec![1.0, -1.0]);
//! ```
//!
//! # Example: Reusing a Decoded Grid
//! ```rust
//! use multipolator::{GridLayout, Limits, Multipolator};
//!
//! let nan = f64::NAN;
//! let grid = [
//!     0.0, 1.0, 2.0, // values of dimension 0
//!     0.0, 5.0, nan, // values of dimension 1
//!     0.0, 1.0, 2.0, 3.0, 4.0, 5.0, // one sample per grid point
//! ];
//! let layout = GridLayout::detached(2, 3, 1);
//! let interpolator: Multipolator<'_, f64> =
//!     Multipolator::new(&grid, &layout, &Limits::default()).unwrap();
//!
//! let xobs = [0.5_f64, 1.5];
//! let yobs = [2.5_f64, 2.5];
//! let out = interpolator.interp_alloc(&[&xobs[..], &yobs[..]]).unwrap();
//! assert_eq!(out.len(), 2);
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod bracket;
pub mod combinatorics;
pub mod corners;
pub mod error;
pub mod io;
pub mod layout;
pub mod multipolator;
pub mod space;
pub mod stride;
pub mod utils;
pub mod weights;

pub use error::MultipolatorError;
pub use layout::{GridLayout, Header, Limits, LAYOUT_VERSION};
pub use multipolator::{interpolate, interpolate_alloc, interpolate_with_layout, Multipolator};
pub use utils::pack_grid;

#[cfg(test)]
pub(crate) mod testing;
