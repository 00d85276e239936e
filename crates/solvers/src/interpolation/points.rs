use super::Error;

/// A validated, non-empty set of points with distinct finite abscissas.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Points {
    /// Pairs `xs` with `ys`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ, there are no points, a value
    /// is non-finite, or an `x` value repeats.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, Error> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(Error::TooFewPoints { min: 1, found: 0 });
        }
        if !xs.iter().chain(&ys).all(|v| v.is_finite()) {
            return Err(Error::NonFinite);
        }

        let mut sorted = xs.clone();
        sorted.sort_by(f64::total_cmp);
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::DuplicateAbscissa { x: pair[0] });
        }

        Ok(Self { xs, ys })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false: [`Points::new`] rejects an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Iterates over `(x, y)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Returns the points ordered by increasing `x`.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys) = pairs.into_iter().unzip();
        Self { xs, ys }
    }

    /// Errors unless there are at least `min` points.
    pub(super) fn require(&self, min: usize) -> Result<(), Error> {
        if self.len() < min {
            Err(Error::TooFewPoints {
                min,
                found: self.len(),
            })
        } else {
            Ok(())
        }
    }
}
