//! Interpolation through a set of points with distinct abscissas.
//!
//! # Methods
//!
//! Polynomial fits, all producing the unique polynomial of degree `< n`
//! through `n` points:
//!
//! - [`vandermonde`]: solves `V·c = y` with `V[i][j] = x_i^j`
//! - [`lagrange`]: sums `y_i·L_i(x)` over the basis polynomials
//! - [`newton`]: builds the divided-difference table
//!
//! Piecewise fits over the points sorted by `x`:
//!
//! - [`spline::linear`]: one segment per pair of neighbours
//! - [`spline::cubic`]: natural cubic spline, continuous up to `f''`
//!
//! Construction is a single pass; there is no iteration or tolerance.

mod error;
mod points;
mod polynomial;

pub mod lagrange;
pub mod newton;
pub mod spline;
pub mod vandermonde;

pub use error::Error;
pub use points::Points;
pub use polynomial::Polynomial;
