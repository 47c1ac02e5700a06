//! Enumeration of the 2^ndims vertices of a bracketing hypercube.
//!
//! Each corner is a vector over {0, 1} selecting, per dimension, the
//! left (0) or right (1) end of that dimension's bracket.
//!
//! Corners are produced in a fixed order: grouped by ascending number of ones,
//! and within a group in lexicographic order, starting from the arrangement
//! with all ones packed to the right. For 3 dimensions:
//!
//! ```text
//! 000 | 001 010 100 | 011 101 110 | 111
//! ```
//!
//! ```rust
//! use multipolator::corners::Corners;
//!
//! let corners: Vec<Vec<u8>> = Corners::<4>::new(2)
//!     .unwrap()
//!     .map(|c| c.bits().to_vec())
//!     .collect();
//! assert_eq!(corners, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
//! ```
use crate::combinatorics::{choose, next_permutation};
use crate::MultipolatorError;

/// Largest dimension count whose corner count and binomial group sizes
/// can be computed in `usize` without overflow.
pub const MAX_CORNER_DIMS: usize = usize::BITS as usize / 2;

/// One vertex of the bracketing hypercube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner<const MAXDIMS: usize> {
    ndims: usize,
    bits: [u8; MAXDIMS],
    group: usize,
}

impl<const MAXDIMS: usize> Corner<MAXDIMS> {
    /// Side selector for each dimension, 0 for left and 1 for right.
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.bits[..self.ndims]
    }

    /// Side selector for a single dimension.
    #[inline]
    pub fn side(&self, dim: usize) -> usize {
        self.bits[dim] as usize
    }

    /// Number of dimensions taking the right end of the bracket,
    /// which is also the index of the group this corner was emitted in.
    #[inline]
    pub fn group(&self) -> usize {
        self.group
    }
}

/// Iterator over every corner of an `ndims`-dimensional hypercube,
/// yielding each of the 2^ndims vectors exactly once.
///
/// The iterator owns its whole cursor state, so independent
/// enumerations never interfere with each other.
#[derive(Clone, Debug)]
pub struct Corners<const MAXDIMS: usize> {
    ndims: usize,

    /// Next vector to emit
    cursor: [u8; MAXDIMS],

    /// Number of ones in every vector of the current group
    group: usize,

    /// Vectors left to emit in the current group, including `cursor`
    remaining: usize,
}

impl<const MAXDIMS: usize> Corners<MAXDIMS> {
    /// Start an enumeration over `ndims` dimensions.
    ///
    /// # Errors
    /// * If `ndims` exceeds `MAXDIMS` or [`MAX_CORNER_DIMS`]
    pub fn new(ndims: usize) -> Result<Self, MultipolatorError> {
        let max = MAXDIMS.min(MAX_CORNER_DIMS);
        if ndims > max {
            return Err(MultipolatorError::DimensionLimitExceeded {
                what: "Dimension count",
                requested: ndims,
                max,
            });
        }

        Ok(Self {
            ndims,
            cursor: Self::representative(ndims, 0),
            group: 0,
            remaining: choose(ndims, 0),
        })
    }

    /// Total number of corners, 2^ndims.
    pub fn count_total(&self) -> usize {
        1 << self.ndims
    }

    /// Smallest arrangement with `ones` ones, i.e. with the ones right-aligned.
    fn representative(ndims: usize, ones: usize) -> [u8; MAXDIMS] {
        let mut bits = [0_u8; MAXDIMS];
        bits[ndims - ones..ndims].fill(1);
        bits
    }
}

impl<const MAXDIMS: usize> Iterator for Corners<MAXDIMS> {
    type Item = Corner<MAXDIMS>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.group > self.ndims {
            return None;
        }

        let item = Corner {
            ndims: self.ndims,
            bits: self.cursor,
            group: self.group,
        };

        self.remaining -= 1;
        if self.remaining > 0 {
            let advanced = next_permutation(&mut self.cursor[..self.ndims]);
            debug_assert!(advanced, "group exhausted before C(n, k) corners");
        } else {
            self.group += 1;
            if self.group <= self.ndims {
                self.cursor = Self::representative(self.ndims, self.group);
                self.remaining = choose(self.ndims, self.group);
            }
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.group > self.ndims {
            0
        } else {
            self.remaining
                + (self.group + 1..=self.ndims)
                    .map(|k| choose(self.ndims, k))
                    .sum::<usize>()
        };
        (n, Some(n))
    }
}

impl<const MAXDIMS: usize> ExactSizeIterator for Corners<MAXDIMS> {}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_corner_counts_1d_to_10d() {
        for ndims in 0..=10 {
            let corners: Vec<Corner<10>> = Corners::<10>::new(ndims).unwrap().collect();
            assert_eq!(corners.len(), 1 << ndims);

            // Every vector is unique
            let unique: HashSet<Vec<u8>> = corners.iter().map(|c| c.bits().to_vec()).collect();
            assert_eq!(unique.len(), 1 << ndims);

            // Exactly C(n, k) vectors with k ones, tagged with the right group
            for k in 0..=ndims {
                let in_group = corners
                    .iter()
                    .filter(|c| c.bits().iter().filter(|&&b| b == 1).count() == k)
                    .count();
                assert_eq!(in_group, choose(ndims, k));
            }
            assert!(corners
                .iter()
                .all(|c| c.group() == c.bits().iter().filter(|&&b| b == 1).count()));

            // Groups are emitted in ascending order
            assert!(corners.windows(2).all(|w| w[0].group() <= w[1].group()));
        }
    }

    #[test]
    fn test_corner_order_3d() {
        let corners: Vec<Vec<u8>> = Corners::<3>::new(3)
            .unwrap()
            .map(|c| c.bits().to_vec())
            .collect();
        let expected: Vec<Vec<u8>> = vec![
            vec![0, 0, 0],
            vec![0, 0, 1],
            vec![0, 1, 0],
            vec![1, 0, 0],
            vec![0, 1, 1],
            vec![1, 0, 1],
            vec![1, 1, 0],
            vec![1, 1, 1],
        ];
        assert_eq!(corners, expected);
    }

    #[test]
    fn test_exact_size() {
        let mut corners = Corners::<6>::new(5).unwrap();
        assert_eq!(corners.count_total(), 32);
        for left in (0..32).rev() {
            assert!(corners.next().is_some());
            assert_eq!(corners.len(), left);
        }
        assert!(corners.next().is_none());
        assert!(corners.next().is_none());
    }

    #[test]
    fn test_too_many_dims() {
        assert!(matches!(
            Corners::<3>::new(4),
            Err(MultipolatorError::DimensionLimitExceeded { requested: 4, max: 3, .. })
        ));

        // Storage for more dimensions does not lift the corner count bound
        let ndims = MAX_CORNER_DIMS + 1;
        assert!(matches!(
            Corners::<128>::new(ndims),
            Err(MultipolatorError::DimensionLimitExceeded { max: MAX_CORNER_DIMS, .. })
        ));
        assert!(Corners::<128>::new(MAX_CORNER_DIMS).is_ok());
    }

    #[test]
    fn test_independent_enumerations() {
        let a: Vec<_> = Corners::<4>::new(4).unwrap().collect();
        let mut first = Corners::<4>::new(4).unwrap();
        let mut second = first.clone();
        let _ = first.next();
        let b: Vec<_> = second.by_ref().collect();
        assert_eq!(a, b);
        assert_eq!(first.len(), 15);
    }
}
