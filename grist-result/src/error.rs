use arrow::error::ArrowError;
use thiserror::Error;

/// Unified error type for all grist operations.
///
/// Errors propagate upward with the `?` operator. Callers can match on
/// specific variants for programmatic handling; the `Display` output is the
/// user-facing message.
#[derive(Error, Debug)]
pub enum Error {
    /// Arrow kernel or buffer error during columnar operations.
    ///
    /// Raised when row encoding, take/gather, or array construction fails.
    /// Out-of-memory conditions are split off into
    /// [`Error::AllocationFailure`] during conversion.
    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    /// Invalid user input or API parameter.
    ///
    /// Covers malformed shapes and precondition violations: mismatched
    /// row counts between a key table and a request's value column,
    /// dictionary keys containing nulls, out-of-range dictionary indices,
    /// and configuration vectors whose length disagrees with the
    /// key-column count.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Aggregation operator applied to a value column whose type cannot
    /// support it, e.g. SUM over a string column.
    #[error("unsupported aggregation: {0}")]
    UnsupportedAggregation(String),

    /// The allocator could not satisfy a buffer request.
    ///
    /// Propagated to the caller without retrying; backoff is caller policy.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// Internal error indicating a bug or unexpected state. Should never
    /// occur during normal operation.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl From<ArrowError> for Error {
    fn from(err: ArrowError) -> Self {
        match err {
            ArrowError::MemoryError(msg) => Error::AllocationFailure(msg),
            other => Error::Arrow(other),
        }
    }
}
