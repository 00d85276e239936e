use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use super::System;

/// A stationary iterative method `x ← T·x + c`.
pub trait Method {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Computes the next iterate from `current` into `next`.
    fn sweep(&self, system: &System, current: &DVector<f64>, next: &mut DVector<f64>);

    /// Returns the iteration matrix `T`, or `None` if it cannot be formed.
    fn iteration_matrix(&self, system: &System) -> Option<DMatrix<f64>>;
}

/// Jacobi iteration.
///
/// `x'[i] = (b[i] − Σ_{j≠i} A[i][j]·x[j]) / A[i][i]`, with every update
/// reading only the previous iterate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jacobi;

/// Gauss-Seidel iteration: SOR with `w = 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussSeidel;

/// Successive over-relaxation.
///
/// `x'[i] = (1 − w)·x[i] + (w / A[i][i])·(b[i] − Σ_{j<i} A[i][j]·x'[j] − Σ_{j>i} A[i][j]·x[j])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sor {
    w: f64,
}

/// The relaxation factor lies outside `(0, 2)`.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("relaxation factor must be in (0, 2), got {w}")]
pub struct RelaxationError {
    pub w: f64,
}

impl Sor {
    /// Creates an SOR method with relaxation factor `w`.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < w < 2`.
    pub fn new(w: f64) -> Result<Self, RelaxationError> {
        if w > 0.0 && w < 2.0 {
            Ok(Self { w })
        } else {
            Err(RelaxationError { w })
        }
    }

    /// Returns the relaxation factor.
    #[must_use]
    pub fn w(&self) -> f64 {
        self.w
    }
}

impl Method for Jacobi {
    fn name(&self) -> &'static str {
        "jacobi"
    }

    fn sweep(&self, system: &System, current: &DVector<f64>, next: &mut DVector<f64>) {
        let (a, b) = (system.a(), system.b());
        for i in 0..system.dim() {
            let off_diagonal: f64 = (0..system.dim())
                .filter(|&j| j != i)
                .map(|j| a[(i, j)] * current[j])
                .sum();
            next[i] = (b[i] - off_diagonal) / a[(i, i)];
        }
    }

    /// `T = D⁻¹·(L + U)`, formed row by row so scaling `A` leaves it unchanged.
    fn iteration_matrix(&self, system: &System) -> Option<DMatrix<f64>> {
        let a = system.a();
        let n = system.dim();
        Some(DMatrix::from_fn(n, n, |i, j| {
            if i == j { 0.0 } else { -a[(i, j)] / a[(i, i)] }
        }))
    }
}

impl Method for GaussSeidel {
    fn name(&self) -> &'static str {
        "gauss_seidel"
    }

    fn sweep(&self, system: &System, current: &DVector<f64>, next: &mut DVector<f64>) {
        relaxed_sweep(1.0, system, current, next);
    }

    fn iteration_matrix(&self, system: &System) -> Option<DMatrix<f64>> {
        relaxed_iteration_matrix(1.0, system)
    }
}

impl Method for Sor {
    fn name(&self) -> &'static str {
        "sor"
    }

    fn sweep(&self, system: &System, current: &DVector<f64>, next: &mut DVector<f64>) {
        relaxed_sweep(self.w, system, current, next);
    }

    fn iteration_matrix(&self, system: &System) -> Option<DMatrix<f64>> {
        relaxed_iteration_matrix(self.w, system)
    }
}

fn relaxed_sweep(w: f64, system: &System, current: &DVector<f64>, next: &mut DVector<f64>) {
    let (a, b) = (system.a(), system.b());
    let n = system.dim();
    for i in 0..n {
        let updated: f64 = (0..i).map(|j| a[(i, j)] * next[j]).sum();
        let previous: f64 = (i + 1..n).map(|j| a[(i, j)] * current[j]).sum();
        next[i] = (1.0 - w) * current[i] + w * (b[i] - updated - previous) / a[(i, i)];
    }
}

/// `T = (D − w·L)⁻¹·((1 − w)·D + w·U)`
fn relaxed_iteration_matrix(w: f64, system: &System) -> Option<DMatrix<f64>> {
    let (d, l, u) = system.splitting();
    let lower = &d - &l * w;
    let rhs = d * (1.0 - w) + u * w;
    lower.solve_lower_triangular(&rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn system() -> System {
        System::new(
            &[
                vec![10.0, -1.0, 2.0],
                vec![-1.0, 11.0, -1.0],
                vec![2.0, -1.0, 10.0],
            ],
            &[6.0, 25.0, -11.0],
            &[0.0, 0.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn jacobi_uses_previous_iterate_only() {
        let system = system();
        let mut next = DVector::zeros(3);
        Jacobi.sweep(&system, system.x0(), &mut next);

        assert_relative_eq!(next[0], 0.6);
        assert_relative_eq!(next[1], 25.0 / 11.0);
        assert_relative_eq!(next[2], -1.1);
    }

    #[test]
    fn gauss_seidel_uses_fresh_values() {
        let system = system();
        let mut next = DVector::zeros(3);
        GaussSeidel.sweep(&system, system.x0(), &mut next);

        let x1 = 0.6;
        let x2 = (25.0 + x1) / 11.0;
        let x3 = (-11.0 - 2.0 * x1 + x2) / 10.0;
        assert_relative_eq!(next[0], x1);
        assert_relative_eq!(next[1], x2);
        assert_relative_eq!(next[2], x3, epsilon = 1e-14);
    }

    #[test]
    fn sor_with_unit_factor_is_gauss_seidel() {
        let system = system();
        let (mut gs, mut sor) = (DVector::zeros(3), DVector::zeros(3));
        GaussSeidel.sweep(&system, system.x0(), &mut gs);
        Sor::new(1.0).unwrap().sweep(&system, system.x0(), &mut sor);

        assert_eq!(gs, sor);
    }

    #[test]
    fn relaxation_factor_bounds() {
        assert!(Sor::new(0.0).is_err());
        assert!(Sor::new(2.0).is_err());
        assert!(Sor::new(f64::NAN).is_err());
        assert_relative_eq!(Sor::new(1.5).unwrap().w(), 1.5);
    }

    #[test]
    fn jacobi_matrix_is_scale_invariant() {
        let system = system();
        let rows: Vec<Vec<f64>> = system
            .a()
            .row_iter()
            .map(|row| row.iter().map(|v| v * 1e160).collect())
            .collect();
        let scaled = System::new(&rows, &[0.0; 3], &[0.0; 3]).unwrap();

        let t = Jacobi.iteration_matrix(&system).unwrap();
        let t_scaled = Jacobi.iteration_matrix(&scaled).unwrap();
        assert_relative_eq!(t[(0, 1)], 0.1);
        assert_relative_eq!(t[(2, 0)], -0.2);
        assert_eq!(t[(1, 1)], 0.0);
        for (x, y) in t.iter().zip(t_scaled.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-15);
        }
    }

    #[test]
    fn iteration_matrix_reproduces_sweep() {
        // For a linear method, sweep(x) - sweep(0) = T·x.
        let system = system();
        let method = Sor::new(1.3).unwrap();
        let t = method.iteration_matrix(&system).unwrap();

        let x = DVector::from_column_slice(&[1.0, -2.0, 0.5]);
        let (mut from_x, mut from_zero) = (DVector::zeros(3), DVector::zeros(3));
        method.sweep(&system, &x, &mut from_x);
        method.sweep(&system, system.x0(), &mut from_zero);

        let expected = &t * &x;
        for i in 0..3 {
            assert_relative_eq!(from_x[i] - from_zero[i], expected[i], epsilon = 1e-12);
        }
    }
}
