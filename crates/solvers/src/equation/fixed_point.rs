//! Fixed-point iteration.
//!
//! # Algorithm
//!
//! Rewrites `f(x) = 0` as `x = g(x)` and iterates `x' = g(x)` from a seed.
//! `f` is only evaluated at each new approximation to detect an exact root.
//! The iteration converges when `|g'| < 1` near the fixed point.
//!
//! # Observer Events
//!
//! Each iteration emits an [`Event`] with the input `x`, the new
//! approximation `g(x)`, `f(g(x))`, and the error against the previous
//! approximation.

use numeris_core::{Function, Observer};
use tracing::trace;

use super::{
    Action, Config, Error, Solution, Status,
    evaluate::{check_start, evaluate},
};

/// Iteration event emitted by the fixed-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Input to `g` for this iteration.
    pub x: f64,
    /// New approximation `g(x)`.
    pub gx: f64,
    /// `f(g(x))`.
    pub fx: f64,
    /// Error relative to the previous approximation.
    pub error: f64,
}

/// Finds a root of `f` by iterating `g` from `x0`.
///
/// # Errors
///
/// Returns an error if `x0` is not finite or `f` or `g` cannot be evaluated.
pub fn solve<F, G, Obs>(
    f: &F,
    g: &G,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    G: Function<Error = F::Error>,
    Obs: Observer<Event, Action>,
{
    check_start(x0)?;

    let mut x = x0;
    let mut previous = None;
    let mut error = f64::INFINITY;

    for iter in 1..=config.max_iters() {
        let gx = evaluate(g, x)?;
        let fx = evaluate(f, gx)?;
        error = config.error(previous, gx);
        trace!(iter, x, gx, fx, error, "fixed point step");

        let event = Event {
            iter,
            x,
            gx,
            fx,
            error,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(Status::StoppedByObserver, gx, error, iter));
        }

        if fx == 0.0 {
            return Ok(Solution::new(Status::ExactRoot, gx, error, iter));
        }
        if config.is_converged(error) {
            return Ok(Solution::new(Status::Converged, gx, error, iter));
        }

        previous = Some(gx);
        x = gx;
    }

    Ok(Solution::new(Status::MaxIters, x, error, config.max_iters()))
}

/// Runs fixed-point iteration without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F, G>(
    f: &F,
    g: &G,
    x0: f64,
    config: &Config,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    G: Function<Error = F::Error>,
{
    solve(f, g, x0, config, ())
}
