//! Helpers shared by the interval and open families.

use numeris_expr::{EvalError, Expression};
use numeris_solvers::equation::{self, Solution, Status};

use crate::{Error, LabeledPoint, Outcome, PlotRequest, Trace, Value};

/// Parses the expression submitted as `field`.
pub(crate) fn parse(field: &'static str, source: &str) -> Result<Expression, Error> {
    Expression::parse(source).map_err(|err| Error::parse(field, err))
}

/// Evaluates `f` during validation.
pub(crate) fn eval(f: &Expression, x: f64) -> Result<f64, Error> {
    f.eval(x).map_err(|source| Error::Evaluation { x, source })
}

/// Turns a scalar solver result into an [`Outcome`].
pub(crate) fn conclude(
    method: &'static str,
    f: &Expression,
    result: Result<Solution, equation::Error<EvalError>>,
    trace: Trace,
) -> Outcome {
    let solution = match result {
        Ok(solution) => solution,
        Err(err) => return Outcome::aborted(method, &Error::from(err), trace),
    };
    let Solution {
        status,
        x,
        error,
        iters,
    } = solution;

    let outcome = match status {
        Status::ExactRoot => Outcome::solved(
            method,
            format!("{x} is an exact root: f(x) = 0"),
            trace,
            Value::Root { root: x },
        ),
        Status::Converged => Outcome::solved(
            method,
            format!(
                "{x} approximates a root within tolerance after {iters} iteration(s) (error {error:e})"
            ),
            trace,
            Value::Root { root: x },
        ),
        Status::Stalled => Outcome::exhausted(
            method,
            format!(
                "no root found: the interval stopped shrinking at x = {x} after {iters} iteration(s)"
            ),
            trace,
            Value::None,
        ),
        Status::MaxIters | Status::StoppedByObserver => Outcome::exhausted(
            method,
            format!(
                "no root found within tolerance after {iters} iteration(s); last approximation x = {x}"
            ),
            trace,
            Value::None,
        ),
    };

    let points = if status.has_root() {
        vec![LabeledPoint::new("root", x, f.eval(x).unwrap_or(0.0))]
    } else {
        Vec::new()
    };
    outcome.with_plot(PlotRequest {
        curves: vec![f.to_string()],
        success: status.has_root(),
        points,
    })
}
