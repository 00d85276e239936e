use serde::Deserialize;
use thiserror::Error;

/// Deployment limits applied by the validation layer.
///
/// Every field has a default, so a host can deserialize a partial table:
///
/// ```
/// # use numeris::Limits;
/// let limits: Limits = serde_json::from_str(r#"{ "max_iterations": 500 }"#).unwrap();
/// assert_eq!(limits.max_iterations, 500);
/// assert_eq!(limits.max_matrix_size, 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Ceiling on the requested `max_iterations`.
    pub max_iterations: usize,
    /// Largest accepted `n` for an `n x n` linear system.
    pub max_matrix_size: usize,
    /// Most points accepted by the single-polynomial fits.
    pub max_polynomial_points: usize,
    /// Most points accepted by the splines.
    pub max_spline_points: usize,
}

/// A limit was set to zero.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("limit '{0}' must be at least 1")]
pub struct LimitsError(pub &'static str);

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            max_matrix_size: 6,
            max_polynomial_points: 10,
            max_spline_points: 8,
        }
    }
}

impl Limits {
    /// Checks that every limit admits at least one value.
    ///
    /// # Errors
    ///
    /// Returns the name of the first zero limit.
    pub fn validate(self) -> Result<Self, LimitsError> {
        let fields = [
            ("max_iterations", self.max_iterations),
            ("max_matrix_size", self.max_matrix_size),
            ("max_polynomial_points", self.max_polynomial_points),
            ("max_spline_points", self.max_spline_points),
        ];
        match fields.into_iter().find(|&(_, value)| value == 0) {
            Some((name, _)) => Err(LimitsError(name)),
            None => Ok(self),
        }
    }
}
