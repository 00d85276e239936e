//! Core traits and types for Numeris.
//!
//! This crate defines the shared abstractions that the expression evaluator,
//! the solvers, and the method layer build on:
//!
//! - [`Function`]: a fallible scalar map `f64 -> f64`
//! - [`FnFunction`]: wraps an infallible closure as a [`Function`]
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`ErrorMode`]: the stopping metric used between successive approximations
//! - [`Rounding`]: how recorded values are rounded for display

mod error_mode;
mod function;
mod observer;
mod rounding;

pub use error_mode::ErrorMode;
pub use function::{FnFunction, Function};
pub use observer::Observer;
pub use rounding::{Rounding, RoundingError, RoundingKind};
