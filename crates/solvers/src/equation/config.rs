use numeris_core::ErrorMode;
use thiserror::Error;

/// Configuration shared by the equation solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    tolerance: f64,
    error_mode: ErrorMode,
}

/// Errors that can occur when validating an equation solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be positive")]
    MaxIters,

    #[error("tolerance must be finite and positive")]
    Tolerance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 1e-7,
            error_mode: ErrorMode::Absolute,
        }
    }
}

impl Config {
    /// Creates a new config with a validated iteration limit and tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or `tolerance` is not finite
    /// and positive.
    pub fn new(max_iters: usize, tolerance: f64, error_mode: ErrorMode) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }

        Ok(Self {
            max_iters,
            tolerance,
            error_mode,
        })
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the tolerance the iteration error must drop below.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns how the iteration error is measured.
    #[must_use]
    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    /// Returns the error of `current` relative to `previous`, or infinity on
    /// the first iteration.
    pub(super) fn error(&self, previous: Option<f64>, current: f64) -> f64 {
        previous.map_or(f64::INFINITY, |p| self.error_mode.between(p, current))
    }

    /// Returns true if `error` meets the tolerance.
    pub(super) fn is_converged(&self, error: f64) -> bool {
        error < self.tolerance
    }
}
