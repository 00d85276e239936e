//! Solvers for scalar equations `f(x) = 0`.
//!
//! # Solvers
//!
//! Bracketing methods need an interval where `f` changes sign and never
//! leave it:
//!
//! - [`bisection`]: halves the bracket every iteration
//! - [`regula_falsi`]: cuts the bracket at the secant intercept
//!
//! Open methods start from one or two seeds and may diverge:
//!
//! - [`fixed_point`]: iterates `x = g(x)`
//! - [`newton_raphson`]: tangent steps using `f'`
//! - [`secant`]: tangent steps with a finite-difference slope
//! - [`multiple_roots`]: Newton variants for roots of multiplicity above one
//!
//! All solvers share [`Config`], [`Status`], [`Solution`], and [`Error`],
//! and report every iteration to an [`Observer`] as a method-specific event.
//! The observer can return [`Action::StopEarly`] to end the run.
//!
//! # Error between iterations
//!
//! The error of iteration `n` compares its approximation with the one from
//! iteration `n - 1` using the configured [`ErrorMode`]. The first iteration
//! has no predecessor and reports an infinite error, so no method can
//! converge before its second iteration unless it lands on an exact root.
//!
//! [`Observer`]: numeris_core::Observer
//! [`ErrorMode`]: numeris_core::ErrorMode

mod bracket;
mod bracketing;
mod config;
mod error;
mod evaluate;
mod solution;
mod tangent;

pub mod bisection;
pub mod fixed_point;
pub mod multiple_roots;
pub mod newton_raphson;
pub mod regula_falsi;
pub mod secant;

pub use bracket::{Bracket, BracketError};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::{Solution, Status};

/// Control actions supported by the equation solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early, reporting the latest approximation.
    StopEarly,
}
