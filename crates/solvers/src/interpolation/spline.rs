//! Piecewise interpolation.
//!
//! Both splines sort the points by `x` and produce one [`Piece`] per pair of
//! neighbouring points. A piece stores its coefficients in powers of
//! `(x − x_i)`, where `x_i` is the left end of its interval.

use std::fmt;

use super::{Error, Points, Polynomial};

/// One polynomial segment of a spline.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    /// Closed interval `[x_i, x_{i+1}]` where the piece applies.
    pub interval: [f64; 2],
    /// Coefficients by ascending powers of `(x − x_i)`.
    pub coeffs: Vec<f64>,
}

impl Piece {
    /// Evaluates the piece at `x`, inside or outside its interval.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let t = x - self.interval[0];
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Expands the piece into powers of `x`.
    #[must_use]
    pub fn expand(&self) -> Polynomial {
        Polynomial::shifted(&self.coeffs, self.interval[0])
    }
}

/// Prints the expanded polynomial of the piece.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expand(), f)
    }
}

/// A sequence of pieces over increasing, adjacent intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pieces: Vec<Piece>,
}

impl Spline {
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Evaluates the spline, extending the end pieces beyond the knots.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let index = self
            .pieces
            .iter()
            .position(|piece| x <= piece.interval[1])
            .unwrap_or(self.pieces.len() - 1);
        self.pieces[index].eval(x)
    }
}

/// Builds the linear spline through `points`.
///
/// # Errors
///
/// Returns [`Error::TooFewPoints`] for fewer than two points.
pub fn linear(points: &Points) -> Result<Spline, Error> {
    points.require(2)?;
    let points = points.sorted();
    let (xs, ys) = (points.xs(), points.ys());

    let pieces = (0..xs.len() - 1)
        .map(|i| {
            let slope = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]);
            Piece {
                interval: [xs[i], xs[i + 1]],
                coeffs: vec![ys[i], slope],
            }
        })
        .collect();

    Ok(Spline { pieces })
}

/// Builds the natural cubic spline through `points`.
///
/// The second derivative is zero at both ends. The second derivatives at
/// the interior knots solve a tridiagonal system, done here with the Thomas
/// algorithm since the system is diagonally dominant.
///
/// # Errors
///
/// Returns [`Error::TooFewPoints`] for fewer than three points.
pub fn cubic(points: &Points) -> Result<Spline, Error> {
    points.require(3)?;
    let points = points.sorted();
    let (xs, ys) = (points.xs(), points.ys());
    let n = xs.len() - 1;

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let slopes: Vec<f64> = (0..n).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    // Interior unknowns M_1..M_{n-1}.
    let lower: Vec<f64> = (1..n).map(|i| h[i - 1]).collect();
    let diagonal: Vec<f64> = (1..n).map(|i| 2.0 * (h[i - 1] + h[i])).collect();
    let upper: Vec<f64> = (1..n).map(|i| h[i]).collect();
    let rhs: Vec<f64> = (1..n).map(|i| 6.0 * (slopes[i] - slopes[i - 1])).collect();

    let mut m = vec![0.0; n + 1];
    m[1..n].copy_from_slice(&solve_tridiagonal(&lower, &diagonal, &upper, &rhs));

    let pieces = (0..n)
        .map(|i| Piece {
            interval: [xs[i], xs[i + 1]],
            coeffs: vec![
                ys[i],
                slopes[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0,
                m[i] / 2.0,
                (m[i + 1] - m[i]) / (6.0 * h[i]),
            ],
        })
        .collect();

    Ok(Spline { pieces })
}

/// Solves a tridiagonal system; `lower[0]` and `upper[last]` are ignored.
fn solve_tridiagonal(lower: &[f64], diagonal: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diagonal.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    for i in 0..n {
        let (prev_c, prev_d) = if i == 0 { (0.0, 0.0) } else { (c[i - 1], d[i - 1]) };
        let a = if i == 0 { 0.0 } else { lower[i] };
        let denominator = diagonal[i] - a * prev_c;
        c[i] = upper[i] / denominator;
        d[i] = (rhs[i] - a * prev_d) / denominator;
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        x[i] = if i + 1 == n { d[i] } else { d[i] - c[i] * x[i + 1] };
    }
    x
}
