#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the error between two successive approximations is measured.
///
/// Iterative scalar methods stop once this error drops below the tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorMode {
    /// `|x_n - x_{n-1}|`
    #[default]
    Absolute,
    /// `|(x_n - x_{n-1}) / x_n|`, falling back to absolute when `x_n == 0`.
    Relative,
}

impl ErrorMode {
    /// Returns the error between the previous and current approximation.
    #[must_use]
    pub fn between(self, previous: f64, current: f64) -> f64 {
        let delta = (current - previous).abs();
        match self {
            Self::Absolute => delta,
            Self::Relative if current == 0.0 => delta,
            Self::Relative => delta / current.abs(),
        }
    }
}
