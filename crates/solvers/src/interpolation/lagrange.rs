//! Lagrange interpolation.
//!
//! `p(x) = Σ y_i·L_i(x)` with `L_i(x) = Π_{j≠i} (x − x_j) / (x_i − x_j)`.
//! Each basis polynomial is expanded by multiplying out its linear factors.

use super::{Points, Polynomial};

/// Returns the basis polynomials `L_i`, one per point.
#[must_use]
pub fn basis(points: &Points) -> Vec<Polynomial> {
    let xs = points.xs();
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let (numerator, denominator) = xs
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold((Polynomial::constant(1.0), 1.0), |(p, d), (_, &xj)| {
                    (p.mul_linear(xj), d * (xi - xj))
                });
            Polynomial::zero().add_scaled(&numerator, 1.0 / denominator)
        })
        .collect()
}

/// Fits the interpolating polynomial.
#[must_use]
pub fn interpolate(points: &Points) -> Polynomial {
    basis(points)
        .iter()
        .zip(points.ys())
        .fold(Polynomial::zero(), |sum, (l, &y)| sum.add_scaled(l, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn basis_is_cardinal() {
        let points = Points::new(vec![0.0, 1.0, 3.0], vec![0.0, 0.0, 0.0]).unwrap();
        for (i, l) in basis(&points).iter().enumerate() {
            for (j, &x) in points.xs().iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(l.eval(x), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn fits_cubic_exactly() {
        let cubic = |x: f64| x * x * x - 2.0 * x + 1.0;
        let xs = vec![-2.0, -0.5, 1.0, 2.5];
        let ys = xs.iter().map(|&x| cubic(x)).collect();
        let p = interpolate(&Points::new(xs, ys).unwrap());

        assert_eq!(p.degree(), 3);
        assert_relative_eq!(p.coeffs()[3], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.coeffs()[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.coeffs()[1], -2.0, epsilon = 1e-12);
        assert_relative_eq!(p.coeffs()[0], 1.0, epsilon = 1e-12);
    }
}
