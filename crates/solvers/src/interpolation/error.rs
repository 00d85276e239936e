use thiserror::Error;

/// Errors that can occur while building an interpolant.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("x has {xs} values but y has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("at least {min} points are needed, got {found}")]
    TooFewPoints { min: usize, found: usize },

    #[error("points contain a non-finite value")]
    NonFinite,

    /// Two points share the same `x`.
    #[error("x = {x} appears more than once")]
    DuplicateAbscissa { x: f64 },

    #[error("interpolation matrix is singular")]
    SingularMatrix,
}
