use std::fmt;

/// A real polynomial stored by ascending powers.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from coefficients `c0 + c1·x + c2·x² + …`.
    ///
    /// Trailing zero coefficients are dropped.
    #[must_use]
    pub fn new(mut coeffs: Vec<f64>) -> Self {
        while coeffs.len() > 1 && coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0.0);
        }
        Self { coeffs }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    #[must_use]
    pub fn constant(c: f64) -> Self {
        Self { coeffs: vec![c] }
    }

    /// Returns the coefficients by ascending power.
    #[must_use]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Evaluates by Horner's rule.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Returns `self · (x − root)`.
    #[must_use]
    pub fn mul_linear(&self, root: f64) -> Self {
        let mut coeffs = vec![0.0; self.coeffs.len() + 1];
        for (k, &c) in self.coeffs.iter().enumerate() {
            coeffs[k + 1] += c;
            coeffs[k] -= root * c;
        }
        Self::new(coeffs)
    }

    /// Returns `self + k · other`.
    #[must_use]
    pub fn add_scaled(&self, other: &Self, k: f64) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                self.coeffs.get(i).copied().unwrap_or(0.0)
                    + k * other.coeffs.get(i).copied().unwrap_or(0.0)
            })
            .collect();
        Self::new(coeffs)
    }

    /// Expands `Σ c_k·(x − origin)^k` into powers of `x`.
    #[must_use]
    pub fn shifted(coeffs: &[f64], origin: f64) -> Self {
        let mut power = Self::constant(1.0);
        let mut sum = Self::zero();
        for &c in coeffs {
            sum = sum.add_scaled(&power, c);
            power = power.mul_linear(origin);
        }
        sum
    }
}

/// Prints by descending powers, e.g. `1.5*x^2 - 3*x + 2`, in a form the
/// expression parser accepts.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for (power, &c) in self.coeffs.iter().enumerate().rev() {
            if c == 0.0 {
                continue;
            }
            let magnitude = c.abs();
            match (wrote, c < 0.0) {
                (false, true) => f.write_str("-")?,
                (true, true) => f.write_str(" - ")?,
                (true, false) => f.write_str(" + ")?,
                (false, false) => {}
            }
            wrote = true;

            #[allow(clippy::float_cmp)]
            let unit = magnitude == 1.0;
            match power {
                0 => write!(f, "{magnitude}")?,
                1 if unit => f.write_str("x")?,
                1 => write!(f, "{magnitude}*x")?,
                _ if unit => write!(f, "x^{power}")?,
                _ => write!(f, "{magnitude}*x^{power}")?,
            }
        }
        if !wrote {
            f.write_str("0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn evaluates_with_horner() {
        let p = Polynomial::new(vec![2.0, -3.0, 1.5]);
        assert_relative_eq!(p.eval(2.0), 2.0 - 6.0 + 6.0);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(Polynomial::new(vec![1.0, 0.0, 0.0]).degree(), 0);
        assert_eq!(Polynomial::new(vec![]), Polynomial::zero());
    }

    #[test]
    fn multiplies_linear_factors() {
        let p = Polynomial::constant(1.0).mul_linear(1.0).mul_linear(-2.0);
        assert_eq!(p.coeffs(), &[-2.0, 1.0, 1.0]);
    }

    #[test]
    fn expands_shifted_form() {
        // 1 + 2(x - 1) + (x - 1)^2 = x^2
        let p = Polynomial::shifted(&[1.0, 2.0, 1.0], 1.0);
        assert_eq!(p.coeffs(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn prints_descending_terms() {
        assert_eq!(
            Polynomial::new(vec![2.0, -3.0, 1.5]).to_string(),
            "1.5*x^2 - 3*x + 2"
        );
        assert_eq!(Polynomial::new(vec![0.0, 1.0, -1.0]).to_string(), "-x^2 + x");
        assert_eq!(Polynomial::new(vec![-4.0]).to_string(), "-4");
        assert_eq!(Polynomial::zero().to_string(), "0");
    }
}
