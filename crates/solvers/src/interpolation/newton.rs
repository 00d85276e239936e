//! Newton's divided-difference interpolation.
//!
//! The table is built column by column:
//! `f[x_i, …, x_{i+k}] = (f[x_{i+1}, …, x_{i+k}] − f[x_i, …, x_{i+k−1}]) / (x_{i+k} − x_i)`,
//! and the polynomial is `f[x0] + f[x0,x1](x − x0) + f[x0,x1,x2](x − x0)(x − x1) + …`.

use super::{Points, Polynomial};

/// The divided-difference table of a set of points.
#[derive(Debug, Clone, PartialEq)]
pub struct DividedDifferences {
    xs: Vec<f64>,
    /// `columns[k][i] = f[x_i, …, x_{i+k}]`.
    columns: Vec<Vec<f64>>,
}

impl DividedDifferences {
    /// Builds the table in the order the points are given.
    #[must_use]
    pub fn new(points: &Points) -> Self {
        let xs = points.xs().to_vec();
        let mut columns = vec![points.ys().to_vec()];

        for k in 1..xs.len() {
            let previous = &columns[k - 1];
            let column = (0..xs.len() - k)
                .map(|i| (previous[i + 1] - previous[i]) / (xs[i + k] - xs[i]))
                .collect();
            columns.push(column);
        }

        Self { xs, columns }
    }

    /// Returns the columns of the table; column `k` has `n − k` entries.
    #[must_use]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Returns the Newton-form coefficients `f[x0], f[x0,x1], …`.
    #[must_use]
    pub fn coefficients(&self) -> Vec<f64> {
        self.columns.iter().map(|column| column[0]).collect()
    }

    /// Expands the Newton form into powers of `x`.
    #[must_use]
    pub fn polynomial(&self) -> Polynomial {
        let mut basis = Polynomial::constant(1.0);
        let mut sum = Polynomial::zero();
        for (coefficient, &x) in self.coefficients().into_iter().zip(&self.xs) {
            sum = sum.add_scaled(&basis, coefficient);
            basis = basis.mul_linear(x);
        }
        sum
    }
}

/// Fits the interpolating polynomial.
#[must_use]
pub fn interpolate(points: &Points) -> Polynomial {
    DividedDifferences::new(points).polynomial()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn builds_table() {
        let points = Points::new(vec![1.0, 2.0, 4.0], vec![1.0, 4.0, 16.0]).unwrap();
        let table = DividedDifferences::new(&points);

        assert_eq!(table.columns()[0], vec![1.0, 4.0, 16.0]);
        assert_eq!(table.columns()[1], vec![3.0, 6.0]);
        assert_eq!(table.columns()[2], vec![1.0]);
        assert_eq!(table.coefficients(), vec![1.0, 3.0, 1.0]);
    }

    #[test]
    fn expands_to_monomials() {
        let points = Points::new(vec![1.0, 2.0, 4.0], vec![1.0, 4.0, 16.0]).unwrap();
        let p = interpolate(&points);

        assert_eq!(p.degree(), 2);
        assert_relative_eq!(p.coeffs()[2], 1.0);
        assert_relative_eq!(p.coeffs()[1], 0.0);
        assert_relative_eq!(p.coeffs()[0], 0.0);
    }
}
