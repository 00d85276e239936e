//! Iteration loop shared by Newton-type methods.

use numeris_core::Observer;
use tracing::trace;

use super::{
    Action, Config, Error, Solution, Status,
    evaluate::check_start,
};

/// Iteration event emitted by Newton-type solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Current iterate.
    pub x: f64,
    /// `f(x)`.
    pub fx: f64,
    /// `f'(x)`.
    pub dfx: f64,
    /// `f''(x)`, for methods that use it.
    pub d2fx: Option<f64>,
    /// Next iterate, equal to `x` when `f(x)` is exactly zero.
    pub next: f64,
    /// Error between `x` and `next`; infinite on the first iteration.
    pub error: f64,
}

/// Derivative values and the update computed at one iterate.
pub(super) struct Step {
    pub(super) fx: f64,
    pub(super) dfx: f64,
    pub(super) d2fx: Option<f64>,
    pub(super) next: f64,
}

/// Runs `step` from `x0` until `f(x)` is zero, the error meets the
/// tolerance, or the iteration limit is reached.
///
/// On convergence the updated iterate is reported; on an exact root the
/// current one.
pub(super) fn iterate<E, Obs>(
    x0: f64,
    config: &Config,
    mut observer: Obs,
    mut step: impl FnMut(f64) -> Result<Step, Error<E>>,
) -> Result<Solution, Error<E>>
where
    E: std::error::Error + 'static,
    Obs: Observer<Event, Action>,
{
    check_start(x0)?;

    let mut x = x0;
    let mut error = f64::INFINITY;

    for iter in 1..=config.max_iters() {
        let Step {
            fx,
            dfx,
            d2fx,
            next,
        } = step(x)?;
        error = if iter == 1 {
            f64::INFINITY
        } else {
            config.error_mode().between(x, next)
        };
        trace!(iter, x, fx, next, error, "tangent step");

        let event = Event {
            iter,
            x,
            fx,
            dfx,
            d2fx,
            next,
            error,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(Status::StoppedByObserver, x, error, iter));
        }

        if fx == 0.0 {
            return Ok(Solution::new(Status::ExactRoot, x, error, iter));
        }
        if config.is_converged(error) {
            return Ok(Solution::new(Status::Converged, next, error, iter));
        }

        x = next;
    }

    Ok(Solution::new(Status::MaxIters, x, error, config.max_iters()))
}
