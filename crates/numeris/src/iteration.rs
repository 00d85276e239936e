//! Stopping settings shared by the iterative families.

use numeris_core::{ErrorMode, Rounding, RoundingKind};
use numeris_solvers::{equation, linear};

use crate::{InputError, Limits, Params};

/// Stopping settings as submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationInput {
    pub tolerance: f64,
    pub max_iterations: i64,
    pub error_mode: ErrorMode,
    /// Display rounding style; the digit count follows the tolerance.
    pub rounding: Option<RoundingKind>,
}

impl IterationInput {
    /// Reads `tolerance`, `max_iterations`, `error_mode` and `rounding`.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is missing or malformed.
    pub fn from_params(params: &Params) -> Result<Self, InputError> {
        Ok(Self {
            tolerance: params.number("tolerance")?,
            max_iterations: params.integer("max_iterations")?,
            error_mode: params.error_mode()?,
            rounding: params.rounding()?,
        })
    }

    pub(crate) fn validate(&self, limits: &Limits) -> Result<Iteration, InputError> {
        // Negative counts become zero, which the solver configs reject.
        let max_iters = usize::try_from(self.max_iterations).unwrap_or(0);
        let equation = equation::Config::new(max_iters, self.tolerance, self.error_mode)
            .map_err(|err| match err {
                equation::ConfigError::MaxIters => self.iterations_error(),
                equation::ConfigError::Tolerance => self.tolerance_error(),
            })?;
        let linear = linear::Config::new(max_iters, self.tolerance).map_err(|err| match err {
            linear::ConfigError::MaxIters => self.iterations_error(),
            linear::ConfigError::Tolerance => self.tolerance_error(),
        })?;

        if max_iters > limits.max_iterations {
            return Err(InputError::TooManyIterations {
                max: limits.max_iterations,
                found: max_iters,
            });
        }

        let rounding = match self.rounding {
            None => Rounding::None,
            Some(kind) => {
                Rounding::from_tolerance(kind, self.tolerance).map_err(|_| self.tolerance_error())?
            }
        };

        Ok(Iteration {
            equation,
            linear,
            rounding,
        })
    }

    fn iterations_error(&self) -> InputError {
        InputError::NonPositiveIterations(self.max_iterations)
    }

    fn tolerance_error(&self) -> InputError {
        InputError::InvalidTolerance(self.tolerance)
    }
}

/// Validated stopping settings, already in the form each solver family takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Iteration {
    equation: equation::Config,
    linear: linear::Config,
    pub(crate) rounding: Rounding,
}

impl Iteration {
    pub(crate) fn equation_config(&self) -> equation::Config {
        self.equation
    }

    pub(crate) fn linear_config(&self) -> linear::Config {
        self.linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tolerance: f64, max_iterations: i64) -> IterationInput {
        IterationInput {
            tolerance,
            max_iterations,
            error_mode: ErrorMode::Absolute,
            rounding: Some(RoundingKind::Decimals),
        }
    }

    #[test]
    fn derives_rounding_from_tolerance() {
        let iteration = input(1e-4, 50).validate(&Limits::default()).unwrap();
        assert_eq!(iteration.rounding, Rounding::Decimals(4));
        assert_eq!(iteration.equation_config().max_iters(), 50);
        assert_eq!(iteration.linear_config().max_iters(), 50);
    }

    #[test]
    fn rejects_non_positive_settings() {
        let limits = Limits::default();
        assert_eq!(
            input(0.0, 10).validate(&limits),
            Err(InputError::InvalidTolerance(0.0))
        );
        assert_eq!(
            input(1e-3, -2).validate(&limits),
            Err(InputError::NonPositiveIterations(-2))
        );
        assert_eq!(
            input(1e-3, 0).validate(&limits),
            Err(InputError::NonPositiveIterations(0))
        );
    }

    #[test]
    fn rejects_non_finite_tolerance() {
        let limits = Limits::default();
        assert_eq!(
            input(f64::INFINITY, 10).validate(&limits),
            Err(InputError::InvalidTolerance(f64::INFINITY))
        );
        assert!(matches!(
            input(f64::NAN, 10).validate(&limits),
            Err(InputError::InvalidTolerance(t)) if t.is_nan()
        ));
    }

    #[test]
    fn caps_iterations() {
        let limits = Limits {
            max_iterations: 100,
            ..Limits::default()
        };
        assert_eq!(
            input(1e-3, 101).validate(&limits),
            Err(InputError::TooManyIterations {
                max: 100,
                found: 101
            })
        );
    }
}
