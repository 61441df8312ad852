//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A construction invariant was violated or an argument is outside of the operation domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Position index is outside of `[0, size)`.
    #[error("index {index} is out of range for a sequence of {size} positions")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Size of the accessed sequence.
        size: usize,
    },
    /// Operation is not valid in the current state of the object.
    #[error("illegal state: {0}")]
    IllegalState(String),
    /// No answer was found within the requested tolerance.
    #[error("nearest result is at distance {distance}, outside of tolerance {tolerance}")]
    OutOfTolerance {
        /// Distance to the closest candidate.
        distance: f64,
        /// Tolerance requested by the caller.
        tolerance: f64,
    },
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// Operation is not provided by the backing engine.
    #[error("operation is not supported: {0}")]
    Unsupported(&'static str),
    /// Not enough bytes remaining in the buffer.
    #[error("buffer underflow: {requested} bytes requested, {remaining} remaining")]
    BufferUnderflow {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes left before the limit.
        remaining: usize,
    },
    /// Not enough capacity left in the buffer.
    #[error("buffer overflow: {requested} bytes requested, {remaining} remaining")]
    BufferOverflow {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes left before the capacity.
        remaining: usize,
    },
}

impl GeometryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }
}

/// Result type with [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
