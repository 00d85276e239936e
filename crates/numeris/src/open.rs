//! Open methods: Fixed Point, Newton-Raphson, Secant and the two
//! multiple-root variants of Newton's method.
//!
//! Derivatives are taken symbolically from `function_f` during validation,
//! so a malformed derivative can never surface mid-run.

use numeris_core::Rounding;
use numeris_expr::Expression;
use numeris_solvers::equation::{self, fixed_point, multiple_roots, newton_raphson, secant};
use tracing::debug;

use crate::{
    Error, InputError, IterationInput, IterationRecord, Limits, Outcome, Params, Trace,
    iteration::Iteration,
    scalar,
};

/// Raw input of an open method.
///
/// Only [`FixedPoint`] reads `function_g`, only [`Secant`] reads `x1`, and
/// only [`MultipleRoots1`] reads `multiplicity`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenInput {
    pub function_f: String,
    pub function_g: Option<String>,
    pub x0: f64,
    pub x1: Option<f64>,
    pub multiplicity: Option<i64>,
    pub iteration: IterationInput,
}

impl OpenInput {
    /// Reads the open-method parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a required parameter is missing or any parameter
    /// is malformed.
    pub fn from_params(params: &Params) -> Result<Self, InputError> {
        Ok(Self {
            function_f: params.text("function_f")?.to_owned(),
            function_g: params.optional_text("function_g").map(str::to_owned),
            x0: params.number("x0")?,
            x1: params.optional_number("x1")?,
            multiplicity: params.optional_integer("multiplicity")?,
            iteration: IterationInput::from_params(params)?,
        })
    }
}

/// A validated open-method problem.
///
/// `extra` holds what the method needs beyond `f` and `x0`: `g`, a
/// derivative, a second seed, and so on.
#[derive(Debug, Clone)]
pub struct OpenProblem<T> {
    f: Expression,
    x0: f64,
    extra: T,
    config: equation::Config,
    iteration: Iteration,
}

impl<T> OpenProblem<T> {
    #[must_use]
    pub fn f(&self) -> &Expression {
        &self.f
    }

    #[must_use]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    #[must_use]
    pub fn extra(&self) -> &T {
        &self.extra
    }
}

/// A root-finder that iterates from one or two seeds.
pub trait OpenMethod {
    /// Everything the method needs besides `f` and `x0`.
    type Extra;

    fn name(&self) -> &'static str;

    /// Validates the method-specific part of the input.
    ///
    /// # Errors
    ///
    /// Returns an error if a required parameter is missing or invalid.
    fn extra(&self, input: &OpenInput, f: &Expression) -> Result<Self::Extra, Error>;

    /// Checks the settings, parses `f`, and prepares the method's extras.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the input.
    fn validate_input(
        &self,
        input: &OpenInput,
        limits: &Limits,
    ) -> Result<OpenProblem<Self::Extra>, Error> {
        let iteration = input.iteration.validate(limits)?;
        let config = iteration.equation_config();
        let f = scalar::parse("function_f", &input.function_f)?;
        let extra = self.extra(input, &f)?;

        Ok(OpenProblem {
            f,
            x0: input.x0,
            extra,
            config,
            iteration,
        })
    }

    fn solve(&self, problem: &OpenProblem<Self::Extra>) -> Outcome;

    /// Validates `input`, then solves.
    fn run(&self, input: &OpenInput, limits: &Limits) -> Outcome {
        match self.validate_input(input, limits) {
            Ok(problem) => self.solve(&problem),
            Err(err) => Outcome::rejected(self.name(), &err),
        }
    }
}

/// `x_{n+1} = g(x_n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPoint;

/// `x_{n+1} = x_n − f(x_n)/f'(x_n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonRaphson;

/// Newton's method with the derivative replaced by a secant slope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secant;

/// Newton's method scaled by a known root multiplicity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleRoots1;

/// Newton's method on `f/f'`, which needs `f''` but no multiplicity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleRoots2;

impl OpenMethod for FixedPoint {
    type Extra = Expression;

    fn name(&self) -> &'static str {
        "fixed_point"
    }

    fn extra(&self, input: &OpenInput, _f: &Expression) -> Result<Expression, Error> {
        let g = input
            .function_g
            .as_deref()
            .ok_or(InputError::Missing { name: "function_g" })?;
        scalar::parse("function_g", g)
    }

    fn solve(&self, problem: &OpenProblem<Expression>) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = fixed_point::solve(
            &problem.f,
            &problem.extra,
            problem.x0,
            &problem.config,
            |event: &fixed_point::Event| {
                trace.push(IterationRecord::scalar(
                    event.iter,
                    event.gx,
                    &[("x_prev", event.x), ("f(x)", event.fx)],
                    event.error,
                    rounding,
                ));
                None::<equation::Action>
            },
        );
        finish(self.name(), problem, result, trace)
    }
}

impl OpenMethod for NewtonRaphson {
    type Extra = Expression;

    fn name(&self) -> &'static str {
        "newton_raphson"
    }

    fn extra(&self, _input: &OpenInput, f: &Expression) -> Result<Expression, Error> {
        Ok(f.derivative())
    }

    fn solve(&self, problem: &OpenProblem<Expression>) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = newton_raphson::solve(
            &problem.f,
            &problem.extra,
            problem.x0,
            &problem.config,
            |event: &newton_raphson::Event| {
                trace.push(tangent_record(event, rounding));
                None::<equation::Action>
            },
        );
        finish(self.name(), problem, result, trace)
    }
}

impl OpenMethod for Secant {
    type Extra = f64;

    fn name(&self) -> &'static str {
        "secant"
    }

    fn extra(&self, input: &OpenInput, _f: &Expression) -> Result<f64, Error> {
        Ok(input.x1.ok_or(InputError::Missing { name: "x1" })?)
    }

    fn solve(&self, problem: &OpenProblem<f64>) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = secant::solve(
            &problem.f,
            [problem.x0, problem.extra],
            &problem.config,
            |event: &secant::Event| {
                trace.push(IterationRecord::scalar(
                    event.iter,
                    event.x,
                    &[
                        ("x0", event.a),
                        ("x1", event.b),
                        ("f(x0)", event.fa),
                        ("f(x1)", event.fb),
                        ("f(x)", event.fx),
                    ],
                    event.error,
                    rounding,
                ));
                None::<equation::Action>
            },
        );
        finish(self.name(), problem, result, trace)
    }
}

/// `f'` and the declared multiplicity.
#[derive(Debug, Clone)]
pub struct Multiplicity {
    pub derivative: Expression,
    pub multiplicity: u32,
}

impl OpenMethod for MultipleRoots1 {
    type Extra = Multiplicity;

    fn name(&self) -> &'static str {
        "multiple_roots_1"
    }

    fn extra(&self, input: &OpenInput, f: &Expression) -> Result<Multiplicity, Error> {
        let requested = input
            .multiplicity
            .ok_or(InputError::Missing { name: "multiplicity" })?;
        let multiplicity = u32::try_from(requested)
            .ok()
            .filter(|&m| m > 0)
            .ok_or(InputError::InvalidMultiplicity(requested))?;

        Ok(Multiplicity {
            derivative: f.derivative(),
            multiplicity,
        })
    }

    fn solve(&self, problem: &OpenProblem<Multiplicity>) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = multiple_roots::solve_known_multiplicity(
            &problem.f,
            &problem.extra.derivative,
            problem.x0,
            problem.extra.multiplicity,
            &problem.config,
            |event: &multiple_roots::Event| {
                trace.push(tangent_record(event, rounding));
                None::<equation::Action>
            },
        );
        finish(self.name(), problem, result, trace)
    }
}

/// `f'` and `f''`.
#[derive(Debug, Clone)]
pub struct Derivatives {
    pub first: Expression,
    pub second: Expression,
}

impl OpenMethod for MultipleRoots2 {
    type Extra = Derivatives;

    fn name(&self) -> &'static str {
        "multiple_roots_2"
    }

    fn extra(&self, _input: &OpenInput, f: &Expression) -> Result<Derivatives, Error> {
        let first = f.derivative();
        let second = first.derivative();
        Ok(Derivatives { first, second })
    }

    fn solve(&self, problem: &OpenProblem<Derivatives>) -> Outcome {
        let mut trace = Trace::default();
        let rounding = problem.iteration.rounding;
        let result = multiple_roots::solve_second_order(
            &problem.f,
            &problem.extra.first,
            &problem.extra.second,
            problem.x0,
            &problem.config,
            |event: &multiple_roots::Event| {
                trace.push(tangent_record(event, rounding));
                None::<equation::Action>
            },
        );
        finish(self.name(), problem, result, trace)
    }
}

fn tangent_record(event: &newton_raphson::Event, rounding: Rounding) -> IterationRecord {
    let mut columns = vec![
        ("x_prev", event.x),
        ("f(x_prev)", event.fx),
        ("f'(x_prev)", event.dfx),
    ];
    if let Some(d2fx) = event.d2fx {
        columns.push(("f''(x_prev)", d2fx));
    }
    IterationRecord::scalar(event.iter, event.next, &columns, event.error, rounding)
}

fn finish<T>(
    method: &'static str,
    problem: &OpenProblem<T>,
    result: Result<equation::Solution, equation::Error<numeris_expr::EvalError>>,
    trace: Trace,
) -> Outcome {
    debug!(method, iterations = trace.len(), "open method finished");
    scalar::conclude(method, &problem.f, result, trace)
}
