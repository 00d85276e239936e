//! Raw named parameters, as a front end submits them.

use std::collections::BTreeMap;

use numeris_core::{ErrorMode, RoundingKind};

use crate::InputError;

/// Named string parameters for one method run.
///
/// Vectors are written as numbers separated by commas or whitespace,
/// optionally wrapped in brackets. Matrix rows are separated by `;`.
///
/// ```
/// # use numeris::Params;
/// let params = Params::new()
///     .with("matrix_a", "4 1; 2 5")
///     .with("vector_b", "[1, 2]");
/// assert_eq!(params.get("vector_b"), Some("[1, 2]"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// A parameter that is present and not blank.
    fn present(&self, name: &'static str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|value| !value.is_empty())
    }

    pub(crate) fn text(&self, name: &'static str) -> Result<&str, InputError> {
        self.present(name).ok_or(InputError::Missing { name })
    }

    pub(crate) fn optional_text(&self, name: &'static str) -> Option<&str> {
        self.present(name)
    }

    pub(crate) fn number(&self, name: &'static str) -> Result<f64, InputError> {
        parse_number(name, self.text(name)?)
    }

    pub(crate) fn optional_number(&self, name: &'static str) -> Result<Option<f64>, InputError> {
        self.present(name)
            .map(|token| parse_number(name, token))
            .transpose()
    }

    pub(crate) fn integer(&self, name: &'static str) -> Result<i64, InputError> {
        parse_integer(name, self.text(name)?)
    }

    pub(crate) fn optional_integer(&self, name: &'static str) -> Result<Option<i64>, InputError> {
        self.present(name)
            .map(|token| parse_integer(name, token))
            .transpose()
    }

    pub(crate) fn vector(&self, name: &'static str) -> Result<Vec<f64>, InputError> {
        let values = parse_vector(name, self.text(name)?)?;
        if values.is_empty() {
            return Err(InputError::Empty { name });
        }
        Ok(values)
    }

    pub(crate) fn matrix(&self, name: &'static str) -> Result<Vec<Vec<f64>>, InputError> {
        let source = strip_brackets(self.text(name)?);
        let rows = source
            .split([';', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| parse_vector(name, row))
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Err(InputError::Empty { name });
        }
        Ok(rows)
    }

    /// `error_mode`: `absolute` (default) or `relative`.
    pub(crate) fn error_mode(&self) -> Result<ErrorMode, InputError> {
        const NAME: &str = "error_mode";
        match self.optional_text(NAME) {
            None | Some("absolute") => Ok(ErrorMode::Absolute),
            Some("relative") => Ok(ErrorMode::Relative),
            Some(other) => Err(InputError::InvalidChoice {
                name: NAME,
                expected: "'absolute' or 'relative'",
                value: other.to_owned(),
            }),
        }
    }

    /// `rounding`: `none` (default), `decimals`, or `significant_figures`.
    pub(crate) fn rounding(&self) -> Result<Option<RoundingKind>, InputError> {
        const NAME: &str = "rounding";
        match self.optional_text(NAME) {
            None | Some("none") => Ok(None),
            Some("decimals") => Ok(Some(RoundingKind::Decimals)),
            Some("significant_figures") => Ok(Some(RoundingKind::SignificantFigures)),
            Some(other) => Err(InputError::InvalidChoice {
                name: NAME,
                expected: "'none', 'decimals' or 'significant_figures'",
                value: other.to_owned(),
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

fn parse_number(name: &'static str, token: &str) -> Result<f64, InputError> {
    let value: f64 = token.parse().map_err(|_| InputError::NotNumeric {
        name,
        token: token.to_owned(),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFinite { name })
    }
}

fn parse_integer(name: &'static str, token: &str) -> Result<i64, InputError> {
    token.parse().map_err(|_| InputError::NotNumeric {
        name,
        token: token.to_owned(),
    })
}

fn parse_vector(name: &'static str, source: &str) -> Result<Vec<f64>, InputError> {
    strip_brackets(source)
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_number(name, token))
        .collect()
}

fn strip_brackets(source: &str) -> &str {
    let source = source.trim();
    source
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(source)
}
