//! Bisection method.
//!
//! # Algorithm
//!
//! Starting from a bracket `[a, b]` where `f(a)` and `f(b)` have opposite
//! signs, each iteration evaluates the midpoint `m = (a + b) / 2` and keeps
//! the half where the sign change persists. The bracket width halves every
//! iteration, so convergence is slow but guaranteed for continuous `f`.
//!
//! # When to Use
//!
//! When a sign-changing bracket is known and robustness matters more than
//! speed.
//!
//! # Observer Events
//!
//! Each iteration emits an [`Event`] with the bracket before the update, the
//! midpoint, `f` at the midpoint, and the error against the previous
//! midpoint.

use numeris_core::{Function, Observer};

use super::{
    Action, Bracket, Config, Error, Solution,
    bracketing::{self, Strategy},
};

pub use super::bracketing::Event;

struct Midpoint;

impl Strategy for Midpoint {
    fn next_point(bracket: &Bracket) -> f64 {
        bracket.midpoint()
    }
}

/// Finds a root of `f` in `bracket` by bisection.
///
/// Endpoints may be given in either order. An endpoint where `f` is exactly
/// zero is returned immediately as [`Status::ExactRoot`] with zero iterations.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, `f` does not change sign over
/// it, or `f` cannot be evaluated.
///
/// [`Status::ExactRoot`]: super::Status::ExactRoot
pub fn solve<F, Obs>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    Obs: Observer<Event, Action>,
{
    bracketing::solve::<Midpoint, _, _>(f, bracket, config, observer)
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error<F::Error>> {
    solve(f, bracket, config, ())
}
