//! Reading and writing grid files.
//!
//! A grid file is the grid buffer written out as raw IEEE-754 doubles in
//! native byte order, with no separators or framing. NaN values in the
//! parameter rows are part of the format, marking the end of a ragged row.
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::MultipolatorError;

const VALUE_SIZE: usize = std::mem::size_of::<f64>();

/// Read a whole grid file into memory.
///
/// # Errors
/// * If the file cannot be read
/// * If the file length is not a whole number of values
pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, MultipolatorError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let grid = decode_values(&bytes)?;
    debug!(path = %path.display(), values = grid.len(), "read grid file");
    Ok(grid)
}

/// Write a grid buffer to a file, replacing any existing contents.
///
/// # Errors
/// * If the file cannot be written
pub fn write_grid<P: AsRef<Path>>(path: P, grid: &[f64]) -> Result<(), MultipolatorError> {
    let path = path.as_ref();
    let bytes: Vec<u8> = grid.iter().flat_map(|v| v.to_ne_bytes()).collect();
    fs::write(path, bytes)?;
    debug!(path = %path.display(), values = grid.len(), "wrote grid file");
    Ok(())
}

/// Reinterpret a byte buffer as native-endian doubles.
///
/// # Errors
/// * If the length is not a multiple of the value size
pub fn decode_values(bytes: &[u8]) -> Result<Vec<f64>, MultipolatorError> {
    if bytes.len() % VALUE_SIZE != 0 {
        return Err(MultipolatorError::MalformedGrid(
            "grid file length is not a whole number of f64 values",
        ));
    }

    Ok(bytes
        .chunks_exact(VALUE_SIZE)
        .map(|c| {
            let mut b = [0_u8; VALUE_SIZE];
            b.copy_from_slice(c);
            f64::from_ne_bytes(b)
        })
        .collect())
}
