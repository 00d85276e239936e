#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest digit count derived from a tolerance.
const MAX_DIGITS: u32 = 15;

/// How recorded values are rounded for display.
///
/// Rounding never affects convergence decisions; solvers always iterate in
/// full precision and only the trace shown to a user is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    /// Values are shown as computed.
    #[default]
    None,
    /// Round to a fixed number of digits after the decimal point.
    Decimals(u32),
    /// Round to a number of significant figures.
    SignificantFigures(u32),
}

/// The rounding style requested without a digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoundingKind {
    Decimals,
    SignificantFigures,
}

/// Errors that can occur when deriving a [`Rounding`] from a tolerance.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RoundingError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),
}

impl Rounding {
    /// Derives a rounding from a tolerance.
    ///
    /// The digit count is the number of decimal places needed to write the
    /// tolerance, so `1e-4` and `0.0005` give four digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn from_tolerance(kind: RoundingKind, tolerance: f64) -> Result<Self, RoundingError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(RoundingError::Tolerance(tolerance));
        }

        let digits = tolerance_digits(tolerance);
        Ok(match kind {
            RoundingKind::Decimals => Self::Decimals(digits),
            RoundingKind::SignificantFigures => Self::SignificantFigures(digits.max(1)),
        })
    }

    /// Rounds a single value.
    ///
    /// Non-finite values and zero are returned unchanged.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if !value.is_finite() || value == 0.0 {
            return value;
        }

        match self {
            Self::None => value,
            Self::Decimals(digits) => round_to(value, i32::try_from(digits).unwrap_or(i32::MAX)),
            Self::SignificantFigures(figures) => {
                let figures = i32::try_from(figures.max(1)).unwrap_or(i32::MAX);
                #[allow(clippy::cast_possible_truncation)]
                let magnitude = value.abs().log10().floor() as i32;
                round_to(value, figures.saturating_sub(1).saturating_sub(magnitude))
            }
        }
    }

    /// Rounds every value in a slice.
    #[must_use]
    pub fn apply_all(self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.apply(v)).collect()
    }
}

/// Rounds to `decimals` places, leaving the value alone if scaling overflows.
///
/// Negative `decimals` round to tens, hundreds, and so on.
fn round_to(value: f64, decimals: i32) -> f64 {
    let rounded = if decimals >= 0 {
        let scale = 10f64.powi(decimals);
        (value * scale).round() / scale
    } else {
        let factor = 10f64.powi(decimals.saturating_neg());
        (value / factor).round() * factor
    };

    if rounded.is_finite() { rounded } else { value }
}

fn tolerance_digits(tolerance: f64) -> u32 {
    (0..=MAX_DIGITS)
        .find(|&digits| {
            #[allow(clippy::cast_possible_wrap)]
            let scaled = tolerance * 10f64.powi(digits as i32);
            scaled.round() != 0.0 && (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs()
        })
        .unwrap_or(MAX_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn digits_follow_tolerance() {
        let decimals = |tol| Rounding::from_tolerance(RoundingKind::Decimals, tol).unwrap();
        assert_eq!(decimals(1e-4), Rounding::Decimals(4));
        assert_eq!(decimals(0.0005), Rounding::Decimals(4));
        assert_eq!(decimals(0.5), Rounding::Decimals(1));
        assert_eq!(decimals(2.0), Rounding::Decimals(0));
        assert_eq!(decimals(1e-7), Rounding::Decimals(7));
    }

    #[test]
    fn significant_figures_never_zero() {
        let rounding = Rounding::from_tolerance(RoundingKind::SignificantFigures, 1.0).unwrap();
        assert_eq!(rounding, Rounding::SignificantFigures(1));
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert!(Rounding::from_tolerance(RoundingKind::Decimals, 0.0).is_err());
        assert!(Rounding::from_tolerance(RoundingKind::Decimals, f64::NAN).is_err());
    }

    #[test]
    fn rounds_decimals() {
        assert_relative_eq!(Rounding::Decimals(3).apply(1.414_213_56), 1.414);
        assert_relative_eq!(Rounding::Decimals(0).apply(-2.6), -3.0);
    }

    #[test]
    fn rounds_significant_figures() {
        assert_relative_eq!(Rounding::SignificantFigures(3).apply(123_456.0), 123_000.0);
        assert_relative_eq!(Rounding::SignificantFigures(2).apply(0.001_234), 0.0012);
    }

    #[test]
    fn leaves_special_values_alone() {
        assert!(Rounding::Decimals(2).apply(f64::INFINITY).is_infinite());
        assert_eq!(Rounding::SignificantFigures(2).apply(0.0), 0.0);
        assert_relative_eq!(Rounding::None.apply(0.123_456), 0.123_456);
    }

    #[test]
    fn rounds_slices() {
        let rounded = Rounding::Decimals(1).apply_all(&[0.25, 1.04, 3.96]);
        assert_eq!(rounded.len(), 3);
        assert_relative_eq!(rounded[1], 1.0);
        assert_relative_eq!(rounded[2], 4.0);
    }
}
