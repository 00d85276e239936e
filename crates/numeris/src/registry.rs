//! Method lookup by name.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    Error, InputError, Limits, LimitsError, Outcome, Params,
    interpolation::{
        CubicSpline, InterpolationInput, InterpolationMethod, Lagrange, LinearSpline,
        NewtonInterpolation, Vandermonde,
    },
    interval::{Bisection, IntervalInput, IntervalMethod, RegulaFalsi},
    matrix::{GaussSeidel, Jacobi, MatrixInput, MatrixMethod, Sor},
    open::{
        FixedPoint, MultipleRoots1, MultipleRoots2, NewtonRaphson, OpenInput, OpenMethod, Secant,
    },
};

/// Every method the registry can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Bisection,
    RegulaFalsi,
    FixedPoint,
    NewtonRaphson,
    Secant,
    MultipleRoots1,
    MultipleRoots2,
    Jacobi,
    GaussSeidel,
    Sor,
    Vandermonde,
    Lagrange,
    NewtonDivided,
    LinearSpline,
    CubicSpline,
}

/// The family a [`Method`] belongs to, which decides its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Interval,
    Open,
    Matrix,
    Interpolation,
}

/// A method name the registry does not know.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown method '{0}'")]
pub struct UnknownMethod(pub String);

impl Method {
    pub const ALL: [Self; 15] = [
        Self::Bisection,
        Self::RegulaFalsi,
        Self::FixedPoint,
        Self::NewtonRaphson,
        Self::Secant,
        Self::MultipleRoots1,
        Self::MultipleRoots2,
        Self::Jacobi,
        Self::GaussSeidel,
        Self::Sor,
        Self::Vandermonde,
        Self::Lagrange,
        Self::NewtonDivided,
        Self::LinearSpline,
        Self::CubicSpline,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bisection => Bisection.name(),
            Self::RegulaFalsi => RegulaFalsi.name(),
            Self::FixedPoint => FixedPoint.name(),
            Self::NewtonRaphson => NewtonRaphson.name(),
            Self::Secant => Secant.name(),
            Self::MultipleRoots1 => MultipleRoots1.name(),
            Self::MultipleRoots2 => MultipleRoots2.name(),
            Self::Jacobi => Jacobi.name(),
            Self::GaussSeidel => GaussSeidel.name(),
            Self::Sor => Sor.name(),
            Self::Vandermonde => Vandermonde.name(),
            Self::Lagrange => Lagrange.name(),
            Self::NewtonDivided => NewtonInterpolation.name(),
            Self::LinearSpline => LinearSpline.name(),
            Self::CubicSpline => CubicSpline.name(),
        }
    }

    #[must_use]
    pub fn family(self) -> Family {
        match self {
            Self::Bisection | Self::RegulaFalsi => Family::Interval,
            Self::FixedPoint
            | Self::NewtonRaphson
            | Self::Secant
            | Self::MultipleRoots1
            | Self::MultipleRoots2 => Family::Open,
            Self::Jacobi | Self::GaussSeidel | Self::Sor => Family::Matrix,
            Self::Vandermonde
            | Self::Lagrange
            | Self::NewtonDivided
            | Self::LinearSpline
            | Self::CubicSpline => Family::Interpolation,
        }
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| UnknownMethod(name.to_owned()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs methods by name under a set of [`Limits`].
///
/// ```
/// # use numeris::{Params, Registry};
/// let params = Params::new()
///     .with("function_f", "x^2 - 2")
///     .with("x0", "1.5")
///     .with("tolerance", "1e-8")
///     .with("max_iterations", "50");
/// let outcome = Registry::default().run("newton_raphson", &params);
/// assert!(outcome.have_solution);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registry {
    limits: Limits,
}

impl Registry {
    /// Creates a registry with custom limits.
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is zero.
    pub fn new(limits: Limits) -> Result<Self, LimitsError> {
        Ok(Self {
            limits: limits.validate()?,
        })
    }

    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Looks up `name`, reads its parameters, validates, and solves.
    ///
    /// Never fails: unknown names and bad input come back as rejected
    /// outcomes.
    #[must_use]
    pub fn run(&self, name: &str, params: &Params) -> Outcome {
        match name.parse::<Method>() {
            Ok(method) => self.run_method(method, params),
            Err(err) => {
                warn!(%err, "rejected");
                let err = Error::from(InputError::InvalidChoice {
                    name: "method",
                    expected: "the registered method names",
                    value: err.0,
                });
                Outcome::rejected("unknown", &err)
            }
        }
    }

    #[must_use]
    pub fn run_method(&self, method: Method, params: &Params) -> Outcome {
        debug!(method = method.name(), family = ?method.family(), "dispatching");
        let limits = &self.limits;

        let outcome = match method {
            Method::Bisection => interval(&Bisection, params, limits),
            Method::RegulaFalsi => interval(&RegulaFalsi, params, limits),
            Method::FixedPoint => open(&FixedPoint, params, limits),
            Method::NewtonRaphson => open(&NewtonRaphson, params, limits),
            Method::Secant => open(&Secant, params, limits),
            Method::MultipleRoots1 => open(&MultipleRoots1, params, limits),
            Method::MultipleRoots2 => open(&MultipleRoots2, params, limits),
            Method::Jacobi => matrix(&Jacobi, params, limits),
            Method::GaussSeidel => matrix(&GaussSeidel, params, limits),
            Method::Sor => matrix(&Sor, params, limits),
            Method::Vandermonde => interpolation(&Vandermonde, params, limits),
            Method::Lagrange => interpolation(&Lagrange, params, limits),
            Method::NewtonDivided => interpolation(&NewtonInterpolation, params, limits),
            Method::LinearSpline => interpolation(&LinearSpline, params, limits),
            Method::CubicSpline => interpolation(&CubicSpline, params, limits),
        };

        match outcome.failure {
            Some(kind) => warn!(
                method = method.name(),
                ?kind,
                message = %outcome.message,
                "method did not run to completion"
            ),
            None => debug!(
                method = method.name(),
                iterations = outcome.trace.len(),
                have_solution = outcome.have_solution,
                "method finished"
            ),
        }
        outcome
    }
}

fn interval<M: IntervalMethod>(method: &M, params: &Params, limits: &Limits) -> Outcome {
    match IntervalInput::from_params(params) {
        Ok(input) => method.run(&input, limits),
        Err(err) => Outcome::rejected(method.name(), &err.into()),
    }
}

fn open<M: OpenMethod>(method: &M, params: &Params, limits: &Limits) -> Outcome {
    match OpenInput::from_params(params) {
        Ok(input) => method.run(&input, limits),
        Err(err) => Outcome::rejected(method.name(), &err.into()),
    }
}

fn matrix<M: MatrixMethod>(method: &M, params: &Params, limits: &Limits) -> Outcome {
    match MatrixInput::from_params(params) {
        Ok(input) => method.run(&input, limits),
        Err(err) => Outcome::rejected(method.name(), &err.into()),
    }
}

fn interpolation<M: InterpolationMethod>(method: &M, params: &Params, limits: &Limits) -> Outcome {
    match InterpolationInput::from_params(params) {
        Ok(input) => method.run(&input, limits),
        Err(err) => Outcome::rejected(method.name(), &err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ErrorKind;

    #[test]
    fn names_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.name().parse::<Method>(), Ok(method));
        }
        assert_eq!(
            "newton".parse::<Method>(),
            Err(UnknownMethod("newton".into()))
        );
    }

    #[test]
    fn families_partition_methods() {
        let count = |family: Family| Method::ALL.iter().filter(|m| m.family() == family).count();
        assert_eq!(count(Family::Interval), 2);
        assert_eq!(count(Family::Open), 5);
        assert_eq!(count(Family::Matrix), 3);
        assert_eq!(count(Family::Interpolation), 5);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let outcome = Registry::default().run("simplex", &Params::new());
        assert_eq!(outcome.failure, Some(ErrorKind::InputValidation));
        assert!(outcome.message.contains("simplex"));
    }

    #[test]
    fn missing_parameters_are_rejected() {
        let params = Params::new().with("function_f", "x");
        let outcome = Registry::default().run("bisection", &params);
        assert_eq!(outcome.method, "bisection");
        assert_eq!(outcome.failure, Some(ErrorKind::InputValidation));
        assert!(outcome.message.contains("'a'"));
    }

    #[test]
    fn zero_limits_are_refused() {
        let limits = Limits {
            max_matrix_size: 0,
            ..Limits::default()
        };
        assert_eq!(Registry::new(limits), Err(LimitsError("max_matrix_size")));
    }
}
