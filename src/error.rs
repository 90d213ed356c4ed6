use thiserror::Error;

// Unified error type for nsinv

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvError {
    #[error("matrix size must be positive")]
    EmptyMatrix,
    #[error("cannot allocate {n}x{n} matrix")]
    Allocation { n: usize },
    #[error("size mismatch: expected {expected}x{expected}, found {found}x{found}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("buffer length mismatch: expected {expected} elements, found {found}")]
    BufferLength { expected: usize, found: usize },
    #[error("degenerate input: product of 1-norm and inf-norm is zero or not finite")]
    DegenerateInput,
    #[error("truncation order must be at least 1")]
    InvalidOrder,
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

/// Fail fast unless both operands share the same size.
pub(crate) fn check_same_size(expected: usize, found: usize) -> Result<(), InvError> {
    if expected != found {
        return Err(InvError::SizeMismatch { expected, found });
    }
    Ok(())
}
