//! Interpolation methods: Vandermonde, Lagrange, Newton divided
//! differences, and linear and natural cubic splines.
//!
//! Point counts and distinct abscissas are checked before any construction.

use numeris_solvers::interpolation::{
    self as interp, Points, Polynomial, lagrange, newton, spline, vandermonde,
};
use tracing::debug;

use crate::{
    Error, InputError, LabeledPoint, Limits, Outcome, Params, PieceValue, PlotRequest, Trace,
    Value,
};

/// Raw interpolation input: parallel `x` and `y` lists.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationInput {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl InterpolationInput {
    /// Reads the vectors `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if either is missing, empty or non-numeric.
    pub fn from_params(params: &Params) -> Result<Self, InputError> {
        Ok(Self {
            x: params.vector("x")?,
            y: params.vector("y")?,
        })
    }
}

/// Which point cap a method is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One polynomial through every point.
    Polynomial,
    /// One piece per pair of neighbouring points.
    Piecewise,
}

/// A single-pass interpolant builder.
pub trait InterpolationMethod {
    fn name(&self) -> &'static str;

    fn shape(&self) -> Shape;

    /// Fewest points the method accepts.
    fn min_points(&self) -> usize {
        2
    }

    /// Checks the point count against the limits and builds [`Points`].
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the input.
    fn validate_input(&self, input: &InterpolationInput, limits: &Limits) -> Result<Points, Error> {
        let (xs, ys) = (input.x.len(), input.y.len());
        if xs != ys {
            return Err(InputError::LengthMismatch { xs, ys }.into());
        }
        let max = match self.shape() {
            Shape::Polynomial => limits.max_polynomial_points,
            Shape::Piecewise => limits.max_spline_points,
        };
        if xs > max {
            return Err(Error::TooManyPoints { max, found: xs });
        }
        let min = self.min_points();
        if xs < min {
            return Err(InputError::TooFewPoints { min, found: xs }.into());
        }
        Ok(Points::new(input.x.clone(), input.y.clone())?)
    }

    fn solve(&self, points: &Points) -> Outcome;

    /// Validates `input`, then solves.
    fn run(&self, input: &InterpolationInput, limits: &Limits) -> Outcome {
        match self.validate_input(input, limits) {
            Ok(points) => self.solve(&points),
            Err(err) => Outcome::rejected(self.name(), &err),
        }
    }
}

/// Solves the Vandermonde system for the monomial coefficients.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vandermonde;

/// Sums `y_i` times the Lagrange basis polynomials.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lagrange;

/// Builds the polynomial from the divided-difference table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonInterpolation;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSpline;

/// Natural cubic spline.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicSpline;

impl InterpolationMethod for Vandermonde {
    fn name(&self) -> &'static str {
        "vandermonde"
    }

    fn shape(&self) -> Shape {
        Shape::Polynomial
    }

    fn solve(&self, points: &Points) -> Outcome {
        polynomial_outcome(self.name(), points, vandermonde::interpolate(points))
    }
}

impl InterpolationMethod for Lagrange {
    fn name(&self) -> &'static str {
        "lagrange"
    }

    fn shape(&self) -> Shape {
        Shape::Polynomial
    }

    fn solve(&self, points: &Points) -> Outcome {
        polynomial_outcome(self.name(), points, Ok(lagrange::interpolate(points)))
    }
}

impl InterpolationMethod for NewtonInterpolation {
    fn name(&self) -> &'static str {
        "newton_divided"
    }

    fn shape(&self) -> Shape {
        Shape::Polynomial
    }

    fn solve(&self, points: &Points) -> Outcome {
        let table = newton::DividedDifferences::new(points);
        debug!(method = self.name(), coefficients = ?table.coefficients(), "divided differences");
        polynomial_outcome(self.name(), points, Ok(table.polynomial()))
    }
}

impl InterpolationMethod for LinearSpline {
    fn name(&self) -> &'static str {
        "linear_spline"
    }

    fn shape(&self) -> Shape {
        Shape::Piecewise
    }

    fn solve(&self, points: &Points) -> Outcome {
        spline_outcome(self.name(), points, spline::linear(points))
    }
}

impl InterpolationMethod for CubicSpline {
    fn name(&self) -> &'static str {
        "cubic_spline"
    }

    fn shape(&self) -> Shape {
        Shape::Piecewise
    }

    fn min_points(&self) -> usize {
        3
    }

    fn solve(&self, points: &Points) -> Outcome {
        spline_outcome(self.name(), points, spline::cubic(points))
    }
}

fn polynomial_outcome(
    method: &'static str,
    points: &Points,
    result: Result<Polynomial, interp::Error>,
) -> Outcome {
    let polynomial = match result {
        Ok(polynomial) => polynomial,
        Err(err) => return Outcome::aborted(method, &Error::from(err), Trace::default()),
    };

    let expression = polynomial.to_string();
    let message = format!(
        "interpolating polynomial of degree {} through {} points",
        polynomial.degree(),
        points.len()
    );
    Outcome::solved(
        method,
        message,
        Trace::default(),
        Value::Polynomial {
            expression: expression.clone(),
            coefficients: polynomial.coeffs().to_vec(),
        },
    )
    .with_plot(plot(vec![expression], points))
}

fn spline_outcome(
    method: &'static str,
    points: &Points,
    result: Result<spline::Spline, interp::Error>,
) -> Outcome {
    let spline = match result {
        Ok(spline) => spline,
        Err(err) => return Outcome::aborted(method, &Error::from(err), Trace::default()),
    };

    let pieces: Vec<PieceValue> = spline
        .pieces()
        .iter()
        .map(|piece| PieceValue {
            interval: piece.interval,
            expression: piece.to_string(),
        })
        .collect();
    let curves = pieces.iter().map(|piece| piece.expression.clone()).collect();
    let message = format!("spline with {} piece(s) through {} points", pieces.len(), points.len());

    Outcome::solved(method, message, Trace::default(), Value::Piecewise { pieces })
        .with_plot(plot(curves, points))
}

fn plot(curves: Vec<String>, points: &Points) -> PlotRequest {
    PlotRequest {
        curves,
        success: true,
        points: points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| LabeledPoint::new(format!("P{i}"), x, y))
            .collect(),
    }
}
