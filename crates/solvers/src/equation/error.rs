use std::error::Error as StdError;

use thiserror::Error;

use super::BracketError;

/// Errors that can occur while solving an equation.
///
/// `E` is the error type of the [`Function`] being solved.
///
/// [`Function`]: numeris_core::Function
#[derive(Debug, Error)]
pub enum Error<E>
where
    E: StdError + 'static,
{
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("starting point {x} is not finite")]
    NonFiniteStart { x: f64 },

    /// The function could not be evaluated.
    #[error("function evaluation failed at x = {x}")]
    Function {
        x: f64,
        #[source]
        source: E,
    },

    #[error("function value {value} at x = {x} is not finite")]
    NonFiniteValue { x: f64, value: f64 },

    /// A derivative vanished where the update divides by it.
    ///
    /// `order` is 1 for `f'` and 2 for `f''`.
    #[error("derivative of order {order} is zero at x = {x}")]
    ZeroDerivative { x: f64, order: u8 },

    /// The update formula divides by zero.
    #[error("update denominator is zero at x = {x}")]
    ZeroDenominator { x: f64 },

    /// The update produced a non-finite iterate.
    #[error("update from x = {x} is not finite")]
    NonFiniteStep { x: f64 },

    #[error("multiplicity must be at least 1, got {0}")]
    InvalidMultiplicity(u32),
}
