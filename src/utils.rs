//! Convenience methods for constructing grids in a way that echoes,
//! but does not exactly match, methods common in scripting languages,
//! and for packing them into the buffer layout read by the interpolator.
use itertools::Itertools;
use num_traits::Float;

use crate::layout::{GridLayout, Header};
use crate::MultipolatorError;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    let dx: T = (stop - start) / T::from(n - 1).unwrap();
    (0..n).map(|i| start + T::from(i).unwrap() * dx).collect()
}

/// Generates a meshgrid in storage order, with the first dimension
/// varying fastest: (x0, y0), (x1, y0), ..., (xn, y0), (x0, y1), ...
///
/// This is the order in which sample vectors are stored in a grid buffer.
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .rev()
        .multi_cartesian_product()
        .map(|xx| xx.iter().rev().map(|y| **y).collect())
        .collect()
}

/// Assemble a grid buffer from per-dimension grid values and the
/// sample block, padding ragged rows with NaN.
///
/// `samples` must already be in storage order (see [`meshgrid`]),
/// with `layout.samples_per_point()` values per grid point.
///
/// # Errors
/// * If the number of grids does not match the layout
/// * If any grid does not fit in a row
/// * If the number of samples does not match the grid shape
pub fn pack_grid<T: Float>(
    grids: &[&[T]],
    samples: &[T],
    layout: &GridLayout,
) -> Result<Vec<T>, MultipolatorError> {
    let ndims = layout.ndims();
    let width = layout.row_width();
    if grids.len() != ndims {
        return Err(MultipolatorError::DimensionMismatch {
            expected: ndims,
            found: grids.len(),
        });
    }
    if grids.iter().any(|g| g.len() > width) {
        return Err(MultipolatorError::MalformedGrid(
            "grid has more values than fit in a row",
        ));
    }
    let shape: Vec<usize> = grids.iter().map(|g| g.len()).collect();
    let nsamples = layout.sample_len(&shape)?;
    if samples.len() != nsamples {
        return Err(MultipolatorError::DimensionMismatch {
            expected: nsamples,
            found: samples.len(),
        });
    }

    let mut out = Vec::with_capacity(layout.sample_offset()? + nsamples);
    if layout.header() == Header::Embedded {
        let count = |n: usize| {
            T::from(n).ok_or(MultipolatorError::MalformedGrid(
                "header count is not representable",
            ))
        };
        out.push(count(ndims)?);
        out.push(count(layout.samples_per_point())?);
        out.resize(width, T::nan());
    }
    for g in grids {
        out.extend_from_slice(g);
        out.extend(std::iter::repeat(T::nan()).take(width - g.len()));
    }
    out.extend_from_slice(samples);

    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace() {
        let x = linspace(-1.0_f64, 1.0, 5);
        assert_eq!(x, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_meshgrid_storage_order() {
        let x = vec![0.0_f64, 1.0];
        let y = vec![10.0_f64, 20.0, 30.0];
        let points = meshgrid(vec![&x, &y]);
        assert_eq!(
            points,
            vec![
                vec![0.0, 10.0],
                vec![1.0, 10.0],
                vec![0.0, 20.0],
                vec![1.0, 20.0],
                vec![0.0, 30.0],
                vec![1.0, 30.0],
            ]
        );
    }

    #[test]
    fn test_pack_grid_detached() {
        let x = [0.0_f64, 1.0, 2.0];
        let y = [5.0_f64, 6.0];
        let samples = [1.0; 6];
        let layout = GridLayout::detached(2, 4, 1);
        let grid = pack_grid(&[&x[..], &y[..]], &samples, &layout).unwrap();

        assert_eq!(grid.len(), 8 + 6);
        assert_eq!(&grid[..3], &x);
        assert!(grid[3].is_nan());
        assert_eq!(&grid[4..6], &y);
        assert!(grid[6].is_nan() && grid[7].is_nan());
        assert_eq!(&grid[8..], &samples);
    }

    #[test]
    fn test_pack_grid_embedded() {
        let x = [0.0_f64, 1.0];
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let layout = GridLayout::embedded(1, 3);
        let grid = pack_grid(&[&x[..]], &samples, &layout).unwrap();

        assert_eq!(&grid[..2], &[1.0, 3.0]);
        assert!(grid[2].is_nan());
        assert_eq!(&grid[3..5], &x);
        assert!(grid[5].is_nan());
        assert_eq!(&grid[6..], &samples);
        assert_eq!(GridLayout::from_header(&grid).unwrap(), layout);
    }

    #[test]
    fn test_pack_grid_mismatch() {
        let x = [0.0_f64, 1.0, 2.0];
        let layout = GridLayout::detached(1, 2, 1);
        assert!(pack_grid(&[&x[..]], &[0.0; 3], &layout).is_err());

        let layout = GridLayout::detached(1, 3, 2);
        assert!(pack_grid(&[&x[..]], &[0.0; 3], &layout).is_err());
        assert!(pack_grid(&[&x[..], &x[..]], &[0.0; 6], &layout).is_err());
    }
}
