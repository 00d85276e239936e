//! Secant method.
//!
//! # Algorithm
//!
//! Replaces the derivative in Newton's update with the slope through the
//! two latest iterates:
//! `x' = b − f(b)·(b − a) / (f(b) − f(a))`, then shifts `a ← b, b ← x'`.
//!
//! # When to Use
//!
//! When `f'` is unavailable or expensive. Two seeds are needed and they do
//! not have to bracket a root.
//!
//! # Observer Events
//!
//! Each iteration emits an [`Event`] with both seeds, their function values,
//! the new approximation, `f` there, and the error against the previous
//! approximation.

use numeris_core::{Function, Observer};
use tracing::trace;

use super::{
    Action, Config, Error, Solution, Status,
    evaluate::{check_start, check_step, evaluate},
};

/// Iteration event emitted by the secant solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Older seed.
    pub a: f64,
    /// Newer seed.
    pub b: f64,
    pub fa: f64,
    pub fb: f64,
    /// New approximation.
    pub x: f64,
    /// `f(x)`.
    pub fx: f64,
    /// Error relative to the previous approximation.
    pub error: f64,
}

/// Finds a root of `f` by the secant method from the seeds `[x0, x1]`.
///
/// # Errors
///
/// Returns an error if a seed is not finite, `f` cannot be evaluated, the
/// two latest function values are equal, or an update is not finite.
pub fn solve<F, Obs>(
    f: &F,
    seeds: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    Obs: Observer<Event, Action>,
{
    let [mut a, mut b] = seeds;
    check_start(a)?;
    check_start(b)?;

    let mut fa = evaluate(f, a)?;
    let mut fb = evaluate(f, b)?;
    let mut previous = None;
    let mut x = b;
    let mut error = f64::INFINITY;

    for iter in 1..=config.max_iters() {
        let denominator = fb - fa;
        if denominator == 0.0 {
            return Err(Error::ZeroDenominator { x: b });
        }
        x = check_step(b, b - fb * (b - a) / denominator)?;
        let fx = evaluate(f, x)?;
        error = config.error(previous, x);
        trace!(iter, x, fx, error, "secant step");

        let event = Event {
            iter,
            a,
            b,
            fa,
            fb,
            x,
            fx,
            error,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(Status::StoppedByObserver, x, error, iter));
        }

        if fx == 0.0 {
            return Ok(Solution::new(Status::ExactRoot, x, error, iter));
        }
        if config.is_converged(error) {
            return Ok(Solution::new(Status::Converged, x, error, iter));
        }

        (a, fa) = (b, fb);
        (b, fb) = (x, fx);
        previous = Some(x);
    }

    Ok(Solution::new(Status::MaxIters, x, error, config.max_iters()))
}

/// Runs the secant method without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    f: &F,
    seeds: [f64; 2],
    config: &Config,
) -> Result<Solution, Error<F::Error>> {
    solve(f, seeds, config, ())
}
