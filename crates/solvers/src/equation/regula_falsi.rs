//! Regula falsi (false position) method.
//!
//! # Algorithm
//!
//! Like bisection, but the new point is where the straight line through
//! `(a, f(a))` and `(b, f(b))` crosses zero:
//! `m = (a·f(b) − b·f(a)) / (f(b) − f(a))`. The bracket always keeps the
//! sign change.
//!
//! # When to Use
//!
//! When `f` is close to linear over the bracket. For strongly curved `f`
//! one endpoint can stay fixed and progress slows down.
//!
//! # Observer Events
//!
//! Same [`Event`] as [`bisection`](super::bisection), with `x` the secant
//! intercept.

use numeris_core::{Function, Observer};

use super::{
    Action, Bracket, Config, Error, Solution,
    bracketing::{self, Strategy},
};

pub use super::bracketing::Event;

struct FalsePosition;

impl Strategy for FalsePosition {
    fn next_point(bracket: &Bracket) -> f64 {
        bracket.secant_intercept()
    }
}

/// Finds a root of `f` in `bracket` by false position.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, `f` does not change sign over
/// it, or `f` cannot be evaluated.
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
    bracketing::solve::<FalsePosition, _, _>(f, bracket, config, observer)
}

/// Runs regula falsi without observation.
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

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use numeris_core::{ErrorMode, FnFunction};

    use crate::equation::{Status, bisection};

    #[test]
    fn linear_function_is_exact_in_one_step() {
        let f = FnFunction::new(|x: f64| 3.0 * x - 6.0);
        let solution = solve_unobserved(&f, [0.0, 10.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::ExactRoot);
        assert_eq!(solution.iters, 1);
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn beats_bisection_on_smooth_function() {
        let f = FnFunction::new(|x: f64| x.exp() - 3.0);
        let config = Config::new(200, 1e-10, ErrorMode::Absolute).unwrap();

        let falsi = solve_unobserved(&f, [0.0, 2.0], &config).expect("should solve");
        let bisect = bisection::solve_unobserved(&f, [0.0, 2.0], &config).expect("should solve");

        assert!(falsi.status.has_root());
        assert_relative_eq!(falsi.x, 3f64.ln(), epsilon = 1e-9);
        assert!(falsi.iters < bisect.iters);
    }

    #[test]
    fn relative_error_mode() {
        let f = FnFunction::new(|x: f64| x * x * x - 2.0 * x - 5.0);
        let config = Config::new(100, 1e-8, ErrorMode::Relative).unwrap();
        let mut last_error = f64::NAN;

        let solution = solve(&f, [2.0, 3.0], &config, |event: &Event| {
            last_error = event.error;
            None::<Action>
        })
        .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.error, last_error);
        assert_relative_eq!(solution.x, 2.094_551_481_5, epsilon = 1e-7);
    }
}
