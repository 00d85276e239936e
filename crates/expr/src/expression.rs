use std::{fmt, str::FromStr};

use numeris_core::Function;

use crate::{
    error::{Error, EvalError, ParseError},
    expr::Expr,
    parser::parse,
};

/// A parsed single-variable expression together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    /// Parses an expression in `x`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed input or for any name outside
    /// the whitelist.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            source: source.trim().to_owned(),
            root: parse(source)?,
        })
    }

    /// Returns the text the expression was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the root of the expression tree.
    #[must_use]
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Evaluates the expression at `x`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] if the expression is undefined at `x` or the
    /// result is not finite.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        self.root.eval(x)
    }

    /// Returns the derivative with respect to `x`.
    ///
    /// The source of the returned expression is its canonical printed form.
    #[must_use]
    pub fn derivative(&self) -> Self {
        Self::from(self.root.derivative())
    }

    /// Returns true if the expression does not reference `x`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        !self.root.depends_on_x()
    }
}

impl From<Expr> for Expression {
    fn from(root: Expr) -> Self {
        Self {
            source: root.to_string(),
            root,
        }
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Prints the canonical form, which parses back to an equivalent expression.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl Function for Expression {
    type Error = EvalError;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        self.eval(x)
    }
}

/// Parses and evaluates `source` at `x` in one step.
///
/// # Errors
///
/// Returns an error if the source does not parse or cannot be evaluated at `x`.
pub fn evaluate(source: &str, x: f64) -> Result<f64, Error> {
    Ok(Expression::parse(source)?.eval(x)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn evaluates_the_usual_examples() {
        assert_relative_eq!(evaluate("x^2 - 2", 3.0).unwrap(), 7.0);
        assert_relative_eq!(evaluate("x**2 - 4", 2.0).unwrap(), 0.0);
        assert_relative_eq!(evaluate("exp(-x) - x", 0.0).unwrap(), 1.0);
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let deep = format!("{}x", "-".repeat(5_000));
        assert!(matches!(
            evaluate(&deep, 1.0),
            Err(Error::Parse(ParseError::TooDeep { .. }))
        ));

        let nested = format!("{}x{}", "sin(".repeat(200), ")".repeat(200));
        let f = Expression::parse(&nested).expect("within the nesting limit");
        let df = f.derivative();
        assert!(df.eval(0.0).is_ok());
    }

    #[test]
    fn reports_evaluation_errors() {
        assert_eq!(
            evaluate("1/x", 0.0),
            Err(Error::Eval(EvalError::DivisionByZero))
        );
        assert!(matches!(
            evaluate("log(x)", -1.0),
            Err(Error::Eval(EvalError::Domain { function: "log", .. }))
        ));
        assert!(matches!(evaluate("foo", 1.0), Err(Error::Parse(_))));
    }

    #[test]
    fn display_round_trips() {
        for source in [
            "x^2 - 2",
            "-x^2 + 3*x - 1/(x + 1)",
            "(x - 1)^(x + 1)",
            "2^-x",
            "log(x + 1, 10) - sin(pi*x)",
            "x - (x - 1) - x/(x/2)",
        ] {
            let parsed = Expression::parse(source).unwrap();
            let reparsed = Expression::parse(&parsed.to_string()).unwrap();
            for x in [1.3, 1.7, 2.9] {
                assert_relative_eq!(parsed.eval(x).unwrap(), reparsed.eval(x).unwrap());
            }
        }
    }

    #[test]
    fn keeps_source_text() {
        let f: Expression = "  x**2  ".parse().unwrap();
        assert_eq!(f.source(), "x**2");
        assert_eq!(f.to_string(), "x^2");
        assert!(!f.is_constant());
        assert!(Expression::parse("pi + 1").unwrap().is_constant());
    }

    #[test]
    fn works_as_function() {
        fn twice(f: &impl Function, x: f64) -> f64 {
            2.0 * f.call(x).unwrap_or_default()
        }
        let f = Expression::parse("x + 1").unwrap();
        assert_relative_eq!(twice(&f, 1.0), 4.0);
    }
}
