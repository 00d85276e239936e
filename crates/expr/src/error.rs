use thiserror::Error;

/// Errors that can occur while parsing an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{literal}' at position {pos}")]
    InvalidNumber { literal: String, pos: usize },

    /// A name that is neither `x` nor a known constant.
    #[error("undefined name '{name}' at position {pos}")]
    UndefinedName { name: String, pos: usize },

    /// A call to a function outside the whitelist.
    #[error("unknown function '{name}' at position {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("unexpected '{token}' at position {pos}")]
    UnexpectedToken { token: String, pos: usize },

    #[error("mismatched parenthesis at position {pos}")]
    MismatchedParen { pos: usize },

    #[error("expression ends where an operand is expected")]
    MissingOperand,

    /// Parentheses, calls or operators nest past the supported depth.
    #[error("expression nests more than {max} levels deep")]
    TooDeep { max: usize },

    #[error("function '{function}' takes {expected} argument(s), got {found}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        found: usize,
    },
}

/// Errors that can occur while evaluating a parsed expression.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalError {
    /// The argument lies outside the function's real domain.
    #[error("'{function}' is undefined at {arg}")]
    Domain { function: &'static str, arg: f64 },

    #[error("division by zero")]
    DivisionByZero,

    /// The result is too large to represent.
    #[error("'{function}' overflowed")]
    Overflow { function: &'static str },
}

/// Either a parse or an evaluation failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
