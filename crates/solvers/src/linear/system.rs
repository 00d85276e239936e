use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Errors that can occur when building a [`System`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SystemError {
    #[error("matrix is empty")]
    Empty,

    #[error("matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{name} has {found} entries, expected {expected}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("system contains a non-finite value")]
    NonFinite,

    /// A diagonal entry is zero, so the sweep would divide by it.
    #[error("diagonal entry in row {row} is zero")]
    ZeroPivot { row: usize },
}

/// A validated square system `A·x = b` with an initial guess `x0`.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    a: DMatrix<f64>,
    b: DVector<f64>,
    x0: DVector<f64>,
}

impl System {
    /// Builds a system from the rows of `A`, the right-hand side, and the
    /// initial guess.
    ///
    /// # Errors
    ///
    /// Returns an error if `A` is empty or not square, `b` or `x0` has the
    /// wrong length, any value is non-finite, or a diagonal entry is zero.
    pub fn new(rows: &[Vec<f64>], b: &[f64], x0: &[f64]) -> Result<Self, SystemError> {
        let n = rows.len();
        if n == 0 {
            return Err(SystemError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(SystemError::NotSquare {
                row,
                expected: n,
                found: r.len(),
            });
        }
        for (name, v) in [("b", b), ("x0", x0)] {
            if v.len() != n {
                return Err(SystemError::DimensionMismatch {
                    name,
                    expected: n,
                    found: v.len(),
                });
            }
        }

        let finite = rows.iter().flatten().chain(b).chain(x0).all(|v| v.is_finite());
        if !finite {
            return Err(SystemError::NonFinite);
        }
        if let Some(row) = (0..n).find(|&i| rows[i][i] == 0.0) {
            return Err(SystemError::ZeroPivot { row });
        }

        Ok(Self {
            a: DMatrix::from_fn(n, n, |i, j| rows[i][j]),
            b: DVector::from_column_slice(b),
            x0: DVector::from_column_slice(x0),
        })
    }

    /// Returns the number of unknowns.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.b.len()
    }

    #[must_use]
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    #[must_use]
    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    #[must_use]
    pub fn x0(&self) -> &DVector<f64> {
        &self.x0
    }

    /// Returns `(D, L, U)` with `A = D − L − U`.
    pub(super) fn splitting(&self) -> (DMatrix<f64>, DMatrix<f64>, DMatrix<f64>) {
        let n = self.dim();
        let d = DMatrix::from_diagonal(&self.a.diagonal());
        let l = DMatrix::from_fn(n, n, |i, j| if i > j { -self.a[(i, j)] } else { 0.0 });
        let u = DMatrix::from_fn(n, n, |i, j| if i < j { -self.a[(i, j)] } else { 0.0 });
        (d, l, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_shape() {
        assert_eq!(System::new(&[], &[], &[]), Err(SystemError::Empty));
        assert_eq!(
            System::new(&[vec![1.0, 2.0], vec![3.0]], &[1.0, 1.0], &[0.0, 0.0]),
            Err(SystemError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            System::new(&[vec![1.0]], &[1.0, 2.0], &[0.0]),
            Err(SystemError::DimensionMismatch {
                name: "b",
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_zero_pivot() {
        assert_eq!(
            System::new(&[vec![1.0, 2.0], vec![3.0, 0.0]], &[1.0, 1.0], &[0.0, 0.0]),
            Err(SystemError::ZeroPivot { row: 1 })
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(
            System::new(&[vec![f64::NAN]], &[1.0], &[0.0]),
            Err(SystemError::NonFinite)
        );
    }

    #[test]
    fn splitting_reassembles() {
        let system =
            System::new(&[vec![4.0, 1.0], vec![2.0, 5.0]], &[1.0, 2.0], &[0.0, 0.0]).unwrap();
        let (d, l, u) = system.splitting();
        assert_eq!(&d - &l - &u, *system.a());
    }
}
