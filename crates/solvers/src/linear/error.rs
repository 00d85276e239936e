use thiserror::Error;

/// Errors that can occur while iterating a linear system.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A component of the iterate overflowed or became NaN.
    #[error("iterate is not finite after sweep {iter}")]
    Diverged { iter: usize },
}
