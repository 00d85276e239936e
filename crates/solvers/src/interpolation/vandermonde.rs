//! Interpolation by solving the Vandermonde system.
//!
//! Builds `V[i][j] = x_i^j` and solves `V·c = y` by LU decomposition. The
//! system is ill-conditioned for many points, which is acceptable for the
//! small point counts this is meant for.

use nalgebra::{DMatrix, DVector};

use super::{Error, Points, Polynomial};

/// Returns the Vandermonde matrix of the abscissas.
#[must_use]
pub fn matrix(points: &Points) -> DMatrix<f64> {
    let n = points.len();
    DMatrix::from_fn(n, n, |i, j| points.xs()[i].powi(exponent(j)))
}

/// Fits the interpolating polynomial.
///
/// # Errors
///
/// Returns [`Error::SingularMatrix`] if the linear solve fails.
pub fn interpolate(points: &Points) -> Result<Polynomial, Error> {
    let y = DVector::from_column_slice(points.ys());
    let coeffs = matrix(points).lu().solve(&y).ok_or(Error::SingularMatrix)?;
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(Error::SingularMatrix);
    }
    Ok(Polynomial::new(coeffs.as_slice().to_vec()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn exponent(j: usize) -> i32 {
    j as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn recovers_quadratic() {
        let points = Points::new(vec![-1.0, 0.0, 2.0], vec![6.0, 2.0, 3.0]).unwrap();
        let p = interpolate(&points).expect("should fit");

        for (x, y) in points.iter() {
            assert_relative_eq!(p.eval(x), y, epsilon = 1e-12);
        }
        assert_relative_eq!(p.coeffs()[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.coeffs()[1], -2.5, epsilon = 1e-12);
        assert_relative_eq!(p.coeffs()[2], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn builds_matrix_by_ascending_powers() {
        let points = Points::new(vec![2.0, 3.0], vec![0.0, 0.0]).unwrap();
        let v = matrix(&points);
        assert_eq!(v[(0, 0)], 1.0);
        assert_eq!(v[(0, 1)], 2.0);
        assert_eq!(v[(1, 1)], 3.0);
    }

    #[test]
    fn single_point_is_constant() {
        let points = Points::new(vec![4.0], vec![7.0]).unwrap();
        assert_eq!(interpolate(&points).unwrap(), Polynomial::constant(7.0));
    }
}
