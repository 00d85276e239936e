use numeris_expr::{EvalError, ParseError};
use numeris_solvers::{
    equation::{self, BracketError},
    interpolation,
    linear::{self, RelaxationError, SystemError},
};
use serde::Serialize;
use thiserror::Error;

/// Malformed or out-of-range input, detected before any solving starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("missing parameter '{name}'")]
    Missing { name: &'static str },

    #[error("parameter '{name}' has non-numeric value '{token}'")]
    NotNumeric { name: &'static str, token: String },

    #[error("parameter '{name}' must be finite")]
    NonFinite { name: &'static str },

    #[error("parameter '{name}' is empty")]
    Empty { name: &'static str },

    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("max_iterations must be a positive integer, got {0}")]
    NonPositiveIterations(i64),

    #[error("max_iterations is {found}, the limit is {max}")]
    TooManyIterations { max: usize, found: usize },

    #[error("multiplicity must be a positive integer, got {0}")]
    InvalidMultiplicity(i64),

    #[error("invalid interval: {0}")]
    Bracket(BracketError),

    #[error("parameter '{name}' must be one of {expected}, got '{value}'")]
    InvalidChoice {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("matrix is not square: row {row} has {found} entries, expected {expected}")]
    MatrixNotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("matrix is {found}x{found}, the limit is {max}x{max}")]
    MatrixTooLarge { max: usize, found: usize },

    #[error("{name} has {found} entries, expected {expected}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("x has {xs} values but y has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("at least {min} points are needed, got {found}")]
    TooFewPoints { min: usize, found: usize },
}

/// Every way a method run can fail.
///
/// Variants are grouped by [`ErrorKind`], the stable tag reported to callers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    InputValidation(#[from] InputError),

    #[error("syntax error in {field}: {source}")]
    Syntax {
        field: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("{field} uses '{name}', which is not a known variable, constant, or function")]
    UndefinedName { field: &'static str, name: String },

    /// An expression could not be evaluated at `x`.
    #[error("cannot evaluate at x = {x}: {source}")]
    Evaluation {
        x: f64,
        #[source]
        source: EvalError,
    },

    #[error("f(a) and f(b) must have opposite signs: f({a}) = {fa}, f({b}) = {fb}")]
    InvalidInterval { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("{} is zero at x = {x}", if *order == 1 { "f'(x)" } else { "f''(x)" })]
    ZeroDerivative { x: f64, order: u8 },

    /// An update formula divides by zero, e.g. `f(x1) == f(x0)` in the secant method.
    #[error("division by zero in the update at x = {x}")]
    ZeroDenominator { x: f64 },

    #[error("diagonal entry in row {row} is zero")]
    ZeroPivot { row: usize },

    #[error("relaxation factor must be in (0, 2), got {w}")]
    InvalidRelaxationFactor { w: f64 },

    #[error("the interpolation system is singular")]
    SingularMatrix,

    #[error("x = {x} appears more than once")]
    DuplicateAbscissa { x: f64 },

    #[error("{found} points given, the limit is {max}")]
    TooManyPoints { max: usize, found: usize },

    /// The update from `x` produced a non-finite iterate.
    #[error("the update from x = {x} is not finite")]
    NonFiniteStep { x: f64 },

    /// The iterates stopped being finite.
    #[error("the iteration diverged at step {iter}")]
    Diverged { iter: usize },
}

/// Stable, serializable tag for an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InputValidation,
    Syntax,
    UndefinedName,
    Domain,
    DivisionByZero,
    InvalidInterval,
    ZeroDerivative,
    ZeroPivot,
    InvalidRelaxationFactor,
    SingularMatrix,
    DuplicateAbscissa,
    TooManyPoints,
    Diverged,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputValidation(_) => ErrorKind::InputValidation,
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::UndefinedName { .. } => ErrorKind::UndefinedName,
            Self::Evaluation {
                source: EvalError::DivisionByZero,
                ..
            }
            | Self::ZeroDenominator { .. } => ErrorKind::DivisionByZero,
            Self::Evaluation { .. } => ErrorKind::Domain,
            Self::InvalidInterval { .. } => ErrorKind::InvalidInterval,
            Self::ZeroDerivative { .. } => ErrorKind::ZeroDerivative,
            Self::ZeroPivot { .. } => ErrorKind::ZeroPivot,
            Self::InvalidRelaxationFactor { .. } => ErrorKind::InvalidRelaxationFactor,
            Self::SingularMatrix => ErrorKind::SingularMatrix,
            Self::DuplicateAbscissa { .. } => ErrorKind::DuplicateAbscissa,
            Self::TooManyPoints { .. } => ErrorKind::TooManyPoints,
            Self::NonFiniteStep { .. } | Self::Diverged { .. } => ErrorKind::Diverged,
        }
    }

    /// Maps a parse failure of the expression in `field`.
    pub(crate) fn parse(field: &'static str, err: ParseError) -> Self {
        match err {
            ParseError::UndefinedName { name, .. } | ParseError::UnknownFunction { name, .. } => {
                Self::UndefinedName { field, name }
            }
            source => Self::Syntax { field, source },
        }
    }
}

impl From<equation::Error<EvalError>> for Error {
    fn from(err: equation::Error<EvalError>) -> Self {
        use equation::Error as E;

        match err {
            E::InvalidBracket(err) => InputError::Bracket(err).into(),
            E::NonFiniteStart { .. } => InputError::NonFinite { name: "x0" }.into(),
            E::Function { x, source } => Self::Evaluation { x, source },
            E::NonFiniteValue { x, .. } => Self::Evaluation {
                x,
                source: EvalError::Overflow { function: "f" },
            },
            E::ZeroDerivative { x, order } => Self::ZeroDerivative { x, order },
            E::ZeroDenominator { x } => Self::ZeroDenominator { x },
            E::NonFiniteStep { x } => Self::NonFiniteStep { x },
            E::InvalidMultiplicity(m) => InputError::InvalidMultiplicity(i64::from(m)).into(),
        }
    }
}

impl From<SystemError> for Error {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::Empty => InputError::Empty { name: "matrix_a" }.into(),
            SystemError::NotSquare {
                row,
                expected,
                found,
            } => InputError::MatrixNotSquare {
                row,
                expected,
                found,
            }
            .into(),
            SystemError::DimensionMismatch {
                name,
                expected,
                found,
            } => InputError::DimensionMismatch {
                name,
                expected,
                found,
            }
            .into(),
            SystemError::NonFinite => InputError::NonFinite { name: "system" }.into(),
            SystemError::ZeroPivot { row } => Self::ZeroPivot { row },
        }
    }
}

impl From<RelaxationError> for Error {
    fn from(RelaxationError { w }: RelaxationError) -> Self {
        Self::InvalidRelaxationFactor { w }
    }
}

impl From<linear::Error> for Error {
    fn from(err: linear::Error) -> Self {
        match err {
            linear::Error::Diverged { iter } => Self::Diverged { iter },
        }
    }
}

impl From<interpolation::Error> for Error {
    fn from(err: interpolation::Error) -> Self {
        use interpolation::Error as E;

        match err {
            E::LengthMismatch { xs, ys } => InputError::LengthMismatch { xs, ys }.into(),
            E::TooFewPoints { min, found } => InputError::TooFewPoints { min, found }.into(),
            E::NonFinite => InputError::NonFinite { name: "points" }.into(),
            E::DuplicateAbscissa { x } => Self::DuplicateAbscissa { x },
            E::SingularMatrix => Self::SingularMatrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_split_by_kind() {
        let undefined = Error::parse(
            "function_f",
            ParseError::UndefinedName {
                name: "y".into(),
                pos: 0,
            },
        );
        assert_eq!(undefined.kind(), ErrorKind::UndefinedName);
        assert_eq!(
            Error::parse("function_f", ParseError::Empty).kind(),
            ErrorKind::Syntax
        );
    }

    #[test]
    fn evaluation_errors_split_by_kind() {
        let division = Error::Evaluation {
            x: 0.0,
            source: EvalError::DivisionByZero,
        };
        let domain = Error::Evaluation {
            x: -1.0,
            source: EvalError::Domain {
                function: "sqrt",
                arg: -1.0,
            },
        };
        assert_eq!(division.kind(), ErrorKind::DivisionByZero);
        assert_eq!(domain.kind(), ErrorKind::Domain);
    }

    #[test]
    fn solver_errors_keep_their_kind() {
        let zero_pivot = Error::from(SystemError::ZeroPivot { row: 1 });
        assert_eq!(zero_pivot, Error::ZeroPivot { row: 1 });

        let relaxation = Error::from(RelaxationError { w: 2.5 });
        assert_eq!(relaxation.kind(), ErrorKind::InvalidRelaxationFactor);

        let duplicate = Error::from(interpolation::Error::DuplicateAbscissa { x: 1.0 });
        assert_eq!(duplicate.kind(), ErrorKind::DuplicateAbscissa);

        let step = Error::from(equation::Error::<EvalError>::NonFiniteStep { x: 3.0 });
        assert_eq!(step.kind(), ErrorKind::Diverged);
    }

    #[test]
    fn messages_name_the_problem() {
        let err = Error::ZeroDerivative { x: 0.0, order: 2 };
        assert_eq!(err.to_string(), "f''(x) is zero at x = 0");
        assert_eq!(
            Error::from(InputError::InvalidTolerance(-1.0)).to_string(),
            "tolerance must be finite and positive, got -1"
        );
    }
}
