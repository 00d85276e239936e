//! Bracketing methods: Bisection and Regula Falsi.
//!
//! Validation requires `f(a)·f(b) < 0`, so an endpoint that is itself a root
//! is rejected as an invalid interval rather than reported as a solution.

use numeris_core::Rounding;
use numeris_expr::Expression;
use numeris_solvers::equation::{self, Bracket, bisection, regula_falsi};
use tracing::debug;

use crate::{
    Error, InputError, IterationInput, IterationRecord, Limits, Outcome, Params, Trace,
    iteration::Iteration,
    scalar,
};

/// Raw input of a bracketing method.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalInput {
    pub function_f: String,
    pub a: f64,
    pub b: f64,
    pub iteration: IterationInput,
}

impl IntervalInput {
    /// Reads `function_f`, `a`, `b` and the iteration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is missing or malformed.
    pub fn from_params(params: &Params) -> Result<Self, InputError> {
        Ok(Self {
            function_f: params.text("function_f")?.to_owned(),
            a: params.number("a")?,
            b: params.number("b")?,
            iteration: IterationInput::from_params(params)?,
        })
    }
}

/// A validated bracketing problem.
#[derive(Debug, Clone)]
pub struct IntervalProblem {
    f: Expression,
    bounds: [f64; 2],
    config: equation::Config,
    iteration: Iteration,
}

impl IntervalProblem {
    #[must_use]
    pub fn f(&self) -> &Expression {
        &self.f
    }

    /// The interval with its endpoints in increasing order.
    #[must_use]
    pub fn bounds(&self) -> [f64; 2] {
        self.bounds
    }
}

/// A root-finder that works on an interval with a sign change.
pub trait IntervalMethod {
    fn name(&self) -> &'static str;

    /// Checks the settings, parses `f`, and verifies the sign change.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the input.
    fn validate_input(
        &self,
        input: &IntervalInput,
        limits: &Limits,
    ) -> Result<IntervalProblem, Error> {
        let iteration = input.iteration.validate(limits)?;
        let config = iteration.equation_config();
        let f = scalar::parse("function_f", &input.function_f)?;
        let bounds = Bracket::bounds([input.a, input.b]).map_err(InputError::Bracket)?;

        let [a, b] = bounds;
        let fa = scalar::eval(&f, a)?;
        let fb = scalar::eval(&f, b)?;
        if fa * fb >= 0.0 {
            return Err(Error::InvalidInterval { a, b, fa, fb });
        }

        Ok(IntervalProblem {
            f,
            bounds,
            config,
            iteration,
        })
    }

    fn solve(&self, problem: &IntervalProblem) -> Outcome;

    /// Validates `input`, then solves.
    fn run(&self, input: &IntervalInput, limits: &Limits) -> Outcome {
        match self.validate_input(input, limits) {
            Ok(problem) => self.solve(&problem),
            Err(err) => Outcome::rejected(self.name(), &err),
        }
    }
}

/// Halves the interval each iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bisection;

/// Cuts the interval at the secant through its endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegulaFalsi;

impl IntervalMethod for Bisection {
    fn name(&self) -> &'static str {
        "bisection"
    }

    fn solve(&self, problem: &IntervalProblem) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = bisection::solve(
            &problem.f,
            problem.bounds,
            &problem.config,
            |event: &bisection::Event| {
                trace.push(record(event, rounding));
                None::<equation::Action>
            },
        );
        debug!(method = self.name(), iterations = trace.len(), "bracketing finished");
        scalar::conclude(self.name(), &problem.f, result, trace)
    }
}

impl IntervalMethod for RegulaFalsi {
    fn name(&self) -> &'static str {
        "regula_falsi"
    }

    fn solve(&self, problem: &IntervalProblem) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = regula_falsi::solve(
            &problem.f,
            problem.bounds,
            &problem.config,
            |event: &regula_falsi::Event| {
                trace.push(record(event, rounding));
                None::<equation::Action>
            },
        );
        debug!(method = self.name(), iterations = trace.len(), "bracketing finished");
        scalar::conclude(self.name(), &problem.f, result, trace)
    }
}

fn record(event: &bisection::Event, rounding: Rounding) -> IterationRecord {
    let [a, b] = event.bracket;
    let [fa, fb] = event.values;
    IterationRecord::scalar(
        event.iter,
        event.x,
        &[("a", a), ("b", b), ("f(a)", fa), ("f(b)", fb), ("f(x)", event.fx)],
        event.error,
        rounding,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use numeris_core::{ErrorMode, RoundingKind};

    use crate::{ErrorKind, Value};

    fn input(f: &str, a: f64, b: f64, tolerance: f64, max_iterations: i64) -> IntervalInput {
        IntervalInput {
            function_f: f.into(),
            a,
            b,
            iteration: IterationInput {
                tolerance,
                max_iterations,
                error_mode: ErrorMode::Absolute,
                rounding: None,
            },
        }
    }

    fn root(outcome: &Outcome) -> f64 {
        match outcome.value {
            Value::Root { root } => root,
            ref other => panic!("expected a root, got {other:?}"),
        }
    }

    #[test]
    fn bisection_finds_cube_root() {
        let outcome = Bisection.run(
            &input("x^3 - 2", 0.0, 2.0, 1e-8, 100),
            &Limits::default(),
        );

        assert!(outcome.is_successful && outcome.have_solution);
        assert_relative_eq!(root(&outcome), 2f64.cbrt(), epsilon = 1e-7);
        assert_eq!(outcome.trace.records()[0].column("a"), Some(0.0));
        assert!(outcome.trace.records()[0].error.is_infinite());
    }

    #[test]
    fn regula_falsi_finds_cosine_root() {
        let outcome = RegulaFalsi.run(
            &input("cos(x) - x", 0.0, 1.0, 1e-10, 100),
            &Limits::default(),
        );

        assert!(outcome.have_solution);
        assert_relative_eq!(root(&outcome), 0.739_085_133_215_160_6, epsilon = 1e-9);
    }

    #[test]
    fn exhausting_iterations_is_not_a_failure() {
        let outcome = Bisection.run(
            &input("x^2 - 2", 0.0, 2.0, 1e-12, 5),
            &Limits::default(),
        );

        assert!(outcome.is_successful);
        assert!(!outcome.have_solution);
        assert_eq!(outcome.trace.len(), 5);
        assert_eq!(outcome.value, Value::None);
        assert!(outcome.message.starts_with("no root found"));
    }

    #[test]
    fn endpoint_root_is_an_invalid_interval() {
        let outcome = Bisection.run(&input("x - 1", 1.0, 3.0, 1e-6, 10), &Limits::default());
        assert_eq!(outcome.failure, Some(ErrorKind::InvalidInterval));
    }

    #[test]
    fn swapped_endpoints_are_accepted() {
        let problem = Bisection
            .validate_input(&input("x - 1", 3.0, 0.0, 1e-6, 50), &Limits::default())
            .expect("valid interval");
        assert_eq!(problem.bounds(), [0.0, 3.0]);
    }

    #[test]
    fn domain_error_at_endpoint_is_reported() {
        let err = Bisection
            .validate_input(&input("sqrt(x) - 1", -1.0, 4.0, 1e-6, 50), &Limits::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn trace_is_rounded_from_tolerance() {
        let mut raw = input("x^2 - 2", 0.0, 2.0, 1e-3, 100);
        raw.iteration.rounding = Some(RoundingKind::Decimals);
        let outcome = Bisection.run(&raw, &Limits::default());

        let second = &outcome.trace.records()[1];
        assert_eq!(second.column("f(x)"), Some(0.25));
        assert_relative_eq!(root(&outcome), 1.415_039_062_5);
    }
}
