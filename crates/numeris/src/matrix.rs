//! Iterative linear solvers: Jacobi, Gauss-Seidel and SOR.

use numeris_solvers::linear::{
    self, GaussSeidel as GaussSeidelSweep, Jacobi as JacobiSweep, Sor as SorSweep, System,
};
use tracing::{debug, warn};

use crate::{
    Error, InputError, IterationInput, IterationRecord, LabeledPoint, Limits, Outcome, Params,
    PlotRequest, Trace, Value,
    iteration::Iteration,
};

/// Raw input of a linear solver.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixInput {
    /// Rows of `A`.
    pub matrix_a: Vec<Vec<f64>>,
    pub vector_b: Vec<f64>,
    pub initial_guess: Vec<f64>,
    /// Relaxation factor, read only by [`Sor`].
    pub w: Option<f64>,
    pub iteration: IterationInput,
}

impl MatrixInput {
    /// Reads `matrix_a`, `vector_b`, `initial_guess`, `w` and the
    /// iteration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required parameter is missing or any parameter
    /// is malformed.
    pub fn from_params(params: &Params) -> Result<Self, InputError> {
        Ok(Self {
            matrix_a: params.matrix("matrix_a")?,
            vector_b: params.vector("vector_b")?,
            initial_guess: params.vector("initial_guess")?,
            w: params.optional_number("w")?,
            iteration: IterationInput::from_params(params)?,
        })
    }
}

/// A validated linear system paired with the sweep that solves it.
#[derive(Debug, Clone)]
pub struct MatrixProblem<M> {
    system: System,
    method: M,
    config: linear::Config,
    iteration: Iteration,
}

impl<M> MatrixProblem<M> {
    #[must_use]
    pub fn system(&self) -> &System {
        &self.system
    }
}

/// An iterative solver for `A·x = b`.
pub trait MatrixMethod {
    /// The sweep this method runs.
    type Sweep: linear::Method;

    fn name(&self) -> &'static str;

    /// Builds the sweep from the input.
    ///
    /// # Errors
    ///
    /// Returns an error if a method parameter is missing or out of range.
    fn sweep(&self, input: &MatrixInput) -> Result<Self::Sweep, Error>;

    /// Checks the settings, the system shape and the diagonal.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the input.
    fn validate_input(
        &self,
        input: &MatrixInput,
        limits: &Limits,
    ) -> Result<MatrixProblem<Self::Sweep>, Error> {
        let iteration = input.iteration.validate(limits)?;
        let config = iteration.linear_config();

        let n = input.matrix_a.len();
        if n > limits.max_matrix_size {
            return Err(InputError::MatrixTooLarge {
                max: limits.max_matrix_size,
                found: n,
            }
            .into());
        }
        let method = self.sweep(input)?;
        let system = System::new(&input.matrix_a, &input.vector_b, &input.initial_guess)?;

        Ok(MatrixProblem {
            system,
            method,
            config,
            iteration,
        })
    }

    /// Runs the sweep from the initial guess.
    fn solve(&self, problem: &MatrixProblem<Self::Sweep>) -> Outcome {
        let method = self.name();
        let rounding = problem.iteration.rounding;
        let mut trace = Trace::default();
        let result = linear::solve(
            &problem.method,
            &problem.system,
            &problem.config,
            |event: &linear::Event<'_>| -> Option<linear::Action> {
                trace.push(IterationRecord::vector(event.iter, event.x, event.error, rounding));
                None
            },
        );

        let solution = match result {
            Ok(solution) => solution,
            Err(err) => {
                warn!(method, %err, "linear solve aborted");
                return Outcome::aborted(method, &Error::from(err), trace);
            }
        };
        debug!(
            method,
            iterations = solution.iters,
            status = ?solution.status,
            "linear solve finished"
        );

        let radius = match solution.spectral_radius {
            Some(rho) => format!("spectral radius {rho:.6}"),
            None => "spectral radius unavailable".to_owned(),
        };
        let converged = solution.status == linear::Status::Converged;
        let plot = plot(&problem.system, &solution.x, converged);
        let value = Value::Vector {
            solution: solution.x,
            spectral_radius: solution.spectral_radius,
        };

        let outcome = if converged {
            Outcome::solved(
                method,
                format!("converged after {} iteration(s); {radius}", solution.iters),
                trace,
                value,
            )
        } else {
            Outcome::exhausted(
                method,
                format!(
                    "no solution within tolerance after {} iteration(s); {radius}",
                    solution.iters
                ),
                trace,
                value,
            )
        };
        match plot {
            Some(plot) => outcome.with_plot(plot),
            None => outcome,
        }
    }

    /// Validates `input`, then solves.
    fn run(&self, input: &MatrixInput, limits: &Limits) -> Outcome {
        match self.validate_input(input, limits) {
            Ok(problem) => self.solve(&problem),
            Err(err) => Outcome::rejected(self.name(), &err),
        }
    }
}

/// Jacobi iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jacobi;

/// Gauss-Seidel iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussSeidel;

/// Successive over-relaxation; reads the relaxation factor `w`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sor;

impl MatrixMethod for Jacobi {
    type Sweep = JacobiSweep;

    fn name(&self) -> &'static str {
        "jacobi"
    }

    fn sweep(&self, _input: &MatrixInput) -> Result<JacobiSweep, Error> {
        Ok(JacobiSweep)
    }
}

impl MatrixMethod for GaussSeidel {
    type Sweep = GaussSeidelSweep;

    fn name(&self) -> &'static str {
        "gauss_seidel"
    }

    fn sweep(&self, _input: &MatrixInput) -> Result<GaussSeidelSweep, Error> {
        Ok(GaussSeidelSweep)
    }
}

impl MatrixMethod for Sor {
    type Sweep = SorSweep;

    fn name(&self) -> &'static str {
        "sor"
    }

    fn sweep(&self, input: &MatrixInput) -> Result<SorSweep, Error> {
        let w = input.w.ok_or(InputError::Missing { name: "w" })?;
        Ok(SorSweep::new(w)?)
    }
}

/// For a 2x2 system, the two lines `a·x + b·y = c` and their intersection.
fn plot(system: &System, solution: &[f64], success: bool) -> Option<PlotRequest> {
    if system.dim() != 2 {
        return None;
    }
    let a = system.a();
    let b = system.b();
    let curves = (0..2)
        .filter(|&i| a[(i, 1)] != 0.0)
        .map(|i| line(a[(i, 0)], a[(i, 1)], b[i]))
        .collect();

    Some(PlotRequest {
        curves,
        success,
        points: vec![LabeledPoint::new("solution", solution[0], solution[1])],
    })
}

/// `y` as a function of `x` on the line `p·x + q·y = c`, with `q != 0`.
fn line(p: f64, q: f64, c: f64) -> String {
    let slope = -p / q;
    let intercept = c / q;
    match (slope == 0.0, intercept == 0.0) {
        (true, _) => format!("{intercept}"),
        (false, true) => format!("{slope}*x"),
        (false, false) if intercept < 0.0 => format!("{slope}*x - {}", -intercept),
        (false, false) => format!("{slope}*x + {intercept}"),
    }
}
