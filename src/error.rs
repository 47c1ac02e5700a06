//! Error type shared by the decoder, the bracketer and the engine.
use thiserror::Error;

/// Failure modes of a single interpolation call or grid decode.
///
/// Every variant is fatal to the call that produced it; no partial output is
/// returned. A query that lands exactly on a grid vertex is not an error.
#[derive(Debug, Error)]
pub enum MultipolatorError {
    /// A query coordinate is below the dimension's minimum, at or above its
    /// maximum, or NaN.
    #[error("query value {value} on dimension {dim} is outside the grid range [{min}, {max})")]
    OutOfRange {
        dim: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Dimensionality or per-dimension cardinality exceeds the configured maxima.
    #[error("{what} of {requested} exceeds maximum ({max})")]
    DimensionLimitExceeded {
        what: &'static str,
        requested: usize,
        max: usize,
    },

    /// The buffer contents are inconsistent with the layout it claims.
    #[error("malformed grid: {0}")]
    MalformedGrid(&'static str),

    /// The buffer is shorter than the declared header and shape require.
    #[error("grid buffer too short: need {needed} values, found {available}")]
    Truncated { needed: usize, available: usize },

    /// Query or output slice length does not match the grid.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Reading or writing a grid file failed.
    #[error("grid file I/O failed")]
    Io(#[from] std::io::Error),
}
