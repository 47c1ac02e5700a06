//! Inverse-distance weighting of the corners of a bracketing hypercube.
//!
//! Distances are measured in bracket-relative units, so each bracket is a unit
//! interval regardless of the grid spacing. For a corner at distance `r` from
//! the query, the unnormalized weight is `r^-(ndims + 1)`; the extra power of
//! the dimension count sharpens the falloff as the number of corners grows.
//!
//! When the query sits exactly on a grid vertex, that corner's distance is zero
//! and its weight is infinite. The normalized weight is then `inf / inf`, which
//! is replaced by 1, while every other corner normalizes to 0. This returns the
//! stored sample at the vertex unchanged.
use num_traits::Float;
use tracing::warn;

use crate::bracket::Bracket;
use crate::corners::{Corner, Corners};
use crate::space::ParameterSpace;
use crate::MultipolatorError;

/// Corner weights for one query point.
///
/// Construction makes one pass over the corners to accumulate the normalizer;
/// each normalized weight is recomputed on demand, so no per-corner storage is needed.
pub struct InverseDistance<'s, 'a, T: Float, const MAXDIMS: usize> {
    space: &'s ParameterSpace<'a, T, MAXDIMS>,
    brackets: &'s [Bracket],
    x: &'s [T],

    /// Sum of the unnormalized weights of every corner
    normalizer: T,

    /// Number of corners with an infinite unnormalized weight
    degenerate: usize,
}

impl<'s, 'a, T: Float, const MAXDIMS: usize> InverseDistance<'s, 'a, T, MAXDIMS> {
    /// Accumulate the normalizer for query `x` with the given brackets.
    ///
    /// # Errors
    /// * If the dimensionality of the space exceeds `MAXDIMS`
    pub fn new(
        space: &'s ParameterSpace<'a, T, MAXDIMS>,
        brackets: &'s [Bracket],
        x: &'s [T],
    ) -> Result<Self, MultipolatorError> {
        let mut this = Self {
            space,
            brackets,
            x,
            normalizer: T::zero(),
            degenerate: 0,
        };

        for corner in Corners::<MAXDIMS>::new(space.ndims())? {
            let w = this.raw(&corner);
            if w.is_infinite() {
                this.degenerate += 1;
            }
            this.normalizer = this.normalizer + w;
        }

        if this.degenerate > 1 {
            warn!(
                corners = this.degenerate,
                "multiple corners have unbounded weight; each is assigned weight 1"
            );
        }

        Ok(this)
    }

    /// Unnormalized weight of one corner.
    #[inline]
    pub fn raw(&self, corner: &Corner<MAXDIMS>) -> T {
        let ndims = self.space.ndims();
        let mut dist2 = T::zero();
        for i in 0..ndims {
            let vals = self.space.values(i);
            let b = self.brackets[i];
            let to_unit = vals[b.right] - vals[b.left];
            let d = (self.x[i] - vals[b.index(corner.side(i))]) / to_unit;
            dist2 = dist2 + d * d;
        }

        // 1 / sqrt(0) is inf, which is resolved during normalization
        dist2.sqrt().recip().powi(ndims as i32 + 1)
    }

    /// Normalized weight of one corner, with an undefined result replaced by 1.
    #[inline]
    pub fn weight(&self, corner: &Corner<MAXDIMS>) -> T {
        let w = self.raw(corner) / self.normalizer;
        if w.is_nan() {
            T::one()
        } else {
            w
        }
    }

    /// Sum of the unnormalized weights.
    pub fn normalizer(&self) -> T {
        self.normalizer
    }

    /// Number of corners that coincide with the query point.
    pub fn degenerate_count(&self) -> usize {
        self.degenerate
    }
}
