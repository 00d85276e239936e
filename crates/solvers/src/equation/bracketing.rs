//! Iteration loop shared by the bracketing methods.

use numeris_core::{Function, Observer};
use tracing::trace;

use super::{
    Action, Bracket, Config, Error, Solution, Status,
    evaluate::evaluate,
};

/// Iteration event emitted by the bracketing solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Bracket at the start of the iteration.
    pub bracket: [f64; 2],
    /// Function values at the bracket bounds.
    pub values: [f64; 2],
    /// New approximation chosen inside the bracket.
    pub x: f64,
    /// Function value at `x`.
    pub fx: f64,
    /// Error relative to the previous approximation.
    pub error: f64,
}

/// Picks the next approximation inside a bracket.
pub(super) trait Strategy {
    fn next_point(bracket: &Bracket) -> f64;
}

pub(super) fn solve<S, F, Obs>(
    f: &F,
    endpoints: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    S: Strategy,
    F: Function,
    Obs: Observer<Event, Action>,
{
    let bounds = Bracket::bounds(endpoints)?;
    let [a, b] = bounds;

    let fa = evaluate(f, a)?;
    if fa == 0.0 {
        return Ok(Solution::exact_at_start(a));
    }
    let fb = evaluate(f, b)?;
    if fb == 0.0 {
        return Ok(Solution::exact_at_start(b));
    }

    let mut bracket = Bracket::new(bounds, fa, fb)?;
    let mut previous = None;
    let mut error = f64::INFINITY;
    let mut x = bracket.midpoint();

    for iter in 1..=config.max_iters() {
        x = S::next_point(&bracket);
        let fx = evaluate(f, x)?;
        error = config.error(previous, x);
        trace!(iter, x, fx, error, "bracketing step");

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            values: bracket.values(),
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
        if !bracket.shrink(x, fx) {
            return Ok(Solution::new(Status::Stalled, x, error, iter));
        }

        previous = Some(x);
    }

    Ok(Solution::new(Status::MaxIters, x, error, config.max_iters()))
}
