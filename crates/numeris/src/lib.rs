//! Classical numerical methods behind one validate-then-solve contract.
//!
//! Each method belongs to a family with its own trait and input type:
//!
//! - [`interval`]: Bisection and Regula Falsi on a sign-changing interval
//! - [`open`]: Fixed Point, Newton-Raphson, Secant, and two multiple-root variants
//! - [`matrix`]: Jacobi, Gauss-Seidel and SOR for `A·x = b`
//! - [`interpolation`]: polynomial fits and splines through points
//!
//! Every run produces an [`Outcome`]: a message, an iteration [`Trace`], the
//! independent `is_successful`/`have_solution` flags, and a [`Value`].
//! Input is rejected before any computation when it is malformed.
//!
//! The [`Registry`] selects a method by name from raw [`Params`]:
//!
//! ```
//! use numeris::{Params, Registry, Value};
//!
//! let params = Params::new()
//!     .with("function_f", "x^2 - 4")
//!     .with("a", "0")
//!     .with("b", "10")
//!     .with("tolerance", "1e-4")
//!     .with("max_iterations", "100");
//!
//! let outcome = Registry::default().run("bisection", &params);
//! assert!(outcome.is_successful && outcome.have_solution);
//! let Value::Root { root } = outcome.value else { unreachable!() };
//! assert!((root - 2.0).abs() < 1e-3);
//! ```

mod config;
mod error;
mod iteration;
mod outcome;
mod params;
mod registry;
mod scalar;

pub mod interpolation;
pub mod interval;
pub mod matrix;
pub mod open;

pub use config::{Limits, LimitsError};
pub use error::{Error, ErrorKind, InputError};
pub use iteration::IterationInput;
pub use outcome::{
    Approximation, IterationRecord, LabeledPoint, Outcome, PieceValue, PlotRequest, Trace, Value,
};
pub use params::Params;
pub use registry::{Family, Method, Registry, UnknownMethod};

pub use numeris_core::{ErrorMode, Rounding, RoundingKind};
