use thiserror::Error;

/// Errors that can occur when creating a [`Bracket`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
    /// The function has the same sign at both endpoints.
    #[error("no sign change: f(a) = {fa}, f(b) = {fb}")]
    NoSignChange { fa: f64, fb: f64 },
}

/// An interval `[a, b]` where the function changes sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    a: f64,
    b: f64,
    fa: f64,
    fb: f64,
}

impl Bracket {
    /// Validates and orders the endpoints, returning `[a, b]` with `a < b`.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is non-finite or both are equal.
    pub fn bounds(endpoints: [f64; 2]) -> Result<[f64; 2], BracketError> {
        let [a, b] = endpoints;
        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }
        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }
        Ok(if a < b { [a, b] } else { [b, a] })
    }

    /// Creates a bracket from ordered bounds and the function values there.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::NoSignChange` unless `fa` and `fb` have
    /// strictly opposite signs.
    pub fn new(bounds: [f64; 2], fa: f64, fb: f64) -> Result<Self, BracketError> {
        if fa * fb >= 0.0 {
            return Err(BracketError::NoSignChange { fa, fb });
        }
        let [a, b] = bounds;
        Ok(Self { a, b, fa, fb })
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.a, self.b]
    }

    /// Returns the function values at the bounds.
    #[must_use]
    pub fn values(&self) -> [f64; 2] {
        [self.fa, self.fb]
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.a + self.b)
    }

    /// Returns where the secant through both endpoints crosses zero.
    #[must_use]
    pub fn secant_intercept(&self) -> f64 {
        (self.a * self.fb - self.b * self.fa) / (self.fb - self.fa)
    }

    /// Replaces the endpoint whose value has the same sign as `fx`.
    ///
    /// The left side is checked first. Returns `false`, leaving the bracket
    /// unchanged, if `x` is not strictly inside or neither product is
    /// negative.
    pub(super) fn shrink(&mut self, x: f64, fx: f64) -> bool {
        if !(self.a < x && x < self.b) {
            return false;
        }
        if self.fa * fx < 0.0 {
            self.b = x;
            self.fb = fx;
            true
        } else if self.fb * fx < 0.0 {
            self.a = x;
            self.fa = fx;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_bounds() {
        assert_eq!(Bracket::bounds([3.0, 1.0]), Ok([1.0, 3.0]));
        assert_eq!(Bracket::bounds([1.0, 1.0]), Err(BracketError::ZeroWidth));
        assert_eq!(
            Bracket::bounds([f64::NEG_INFINITY, 1.0]),
            Err(BracketError::NonFinite)
        );
    }

    #[test]
    fn needs_sign_change() {
        assert!(Bracket::new([0.0, 1.0], -1.0, 1.0).is_ok());
        assert_eq!(
            Bracket::new([0.0, 1.0], 2.0, 1.0),
            Err(BracketError::NoSignChange { fa: 2.0, fb: 1.0 })
        );
    }

    #[test]
    fn shrinks_toward_sign_change() {
        let mut bracket = Bracket::new([0.0, 4.0], -4.0, 12.0).unwrap();

        assert!(bracket.shrink(2.0, 0.5));
        assert_eq!(bracket.as_array(), [0.0, 2.0]);

        assert!(bracket.shrink(1.0, -3.0));
        assert_eq!(bracket.as_array(), [1.0, 2.0]);
        assert_eq!(bracket.values(), [-3.0, 0.5]);
    }

    #[test]
    fn refuses_points_outside() {
        let mut bracket = Bracket::new([0.0, 4.0], -4.0, 12.0).unwrap();
        assert!(!bracket.shrink(4.0, 12.0));
        assert!(!bracket.shrink(-1.0, -5.0));
        assert_eq!(bracket.as_array(), [0.0, 4.0]);
    }

    #[test]
    fn secant_intercept_of_a_line() {
        // f(x) = 2x - 2 has its root at x = 1.
        let bracket = Bracket::new([0.0, 4.0], -2.0, 6.0).unwrap();
        approx::assert_relative_eq!(bracket.secant_intercept(), 1.0);
    }
}
