//! Parsing and evaluation of single-variable mathematical expressions.
//!
//! Expressions are written in `x` using the usual infix notation:
//!
//! ```
//! use numeris_expr::Expression;
//!
//! let f: Expression = "x^2 - 2".parse().unwrap();
//! assert_eq!(f.eval(3.0), Ok(7.0));
//! assert_eq!(f.derivative().to_string(), "2*x");
//! ```
//!
//! Only a fixed whitelist of names is understood: the variable `x`, the
//! constants `pi` and `e`, and the functions listed in [`Func`]. Anything
//! else is rejected at parse time, so evaluating an [`Expression`] can never
//! reach beyond arithmetic on `f64`.
//!
//! # Syntax
//!
//! - Binary operators `+ - * / ^` (`**` is accepted as `^`)
//! - Prefix `-` and `+`
//! - `^` is right-associative and binds tighter than prefix minus, so
//!   `-x^2` is `-(x^2)` and `2^-1` is `0.5`
//! - `log(a, b)` is the logarithm of `a` in base `b`; `log(a)` is natural
//! - A `math.` qualifier on any name is accepted and ignored

mod derivative;
mod error;
mod expr;
mod expression;
mod lexer;
mod parser;

pub use error::{Error, EvalError, ParseError};
pub use expr::{BinOp, Constant, Expr, Func};
pub use expression::{Expression, evaluate};
