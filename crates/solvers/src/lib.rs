//! Numerical solvers for Numeris.
//!
//! - [`equation`]: roots of scalar equations `f(x) = 0`
//! - [`linear`]: iterative solvers for `A·x = b`
//! - [`interpolation`]: polynomials and splines through a set of points
//!
//! Solvers work on plain numbers and [`Function`]s. They know nothing about
//! user input formats; validation of raw input belongs to the caller.
//!
//! [`Function`]: numeris_core::Function

pub mod equation;
pub mod interpolation;
pub mod linear;
