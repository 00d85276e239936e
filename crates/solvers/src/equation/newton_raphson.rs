//! Newton-Raphson method.
//!
//! # Algorithm
//!
//! From the current iterate `x`, follows the tangent of `f` to zero:
//! `x' = x − f(x) / f'(x)`. Convergence is quadratic near a simple root.
//!
//! The derivative is supplied by the caller as a second [`Function`], for
//! example the symbolic derivative of a parsed expression.
//!
//! # When to Use
//!
//! When `f'` is available and a seed near the root is known. A zero
//! derivative at any iterate ends the run with [`Error::ZeroDerivative`].
//!
//! # Observer Events
//!
//! Each iteration emits an [`Event`] with `x`, `f(x)`, `f'(x)`, the next
//! iterate, and the error between the two.

use numeris_core::{Function, Observer};

use super::{
    Action, Config, Error, Solution,
    evaluate::{check_step, evaluate},
    tangent::{self, Step},
};

pub use super::tangent::Event;

/// Finds a root of `f` by Newton-Raphson iteration from `x0`.
///
/// # Errors
///
/// Returns an error if `x0` is not finite, `f` or `df` cannot be evaluated,
/// the derivative vanishes at an iterate, or an update is not finite.
pub fn solve<F, D, Obs>(
    f: &F,
    df: &D,
    x0: f64,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    D: Function<Error = F::Error>,
    Obs: Observer<Event, Action>,
{
    tangent::iterate(x0, config, observer, |x| {
        let fx = evaluate(f, x)?;
        let dfx = evaluate(df, x)?;
        let next = if fx == 0.0 {
            x
        } else if dfx == 0.0 {
            return Err(Error::ZeroDerivative { x, order: 1 });
        } else {
            check_step(x, x - fx / dfx)?
        };
        Ok(Step {
            fx,
            dfx,
            d2fx: None,
            next,
        })
    })
}

/// Runs Newton-Raphson without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F, D>(
    f: &F,
    df: &D,
    x0: f64,
    config: &Config,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    D: Function<Error = F::Error>,
{
    solve(f, df, x0, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use numeris_core::{ErrorMode, FnFunction};

    use crate::equation::Status;

    #[test]
    fn square_root_of_two() {
        let f = FnFunction::new(|x: f64| x * x - 2.0);
        let df = FnFunction::new(|x: f64| 2.0 * x);
        let config = Config::new(100, 1e-6, ErrorMode::Absolute).unwrap();

        let solution = solve_unobserved(&f, &df, 1.5, &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert!(solution.iters < 10);
        assert_relative_eq!(solution.x, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn events_carry_derivative() {
        let f = FnFunction::new(|x: f64| x * x - 2.0);
        let df = FnFunction::new(|x: f64| 2.0 * x);
        let mut events = Vec::new();

        solve(&f, &df, 1.0, &Config::default(), |event: &Event| {
            events.push(*event);
            None::<Action>
        })
        .expect("should solve");

        assert_relative_eq!(events[0].x, 1.0);
        assert_relative_eq!(events[0].fx, -1.0);
        assert_relative_eq!(events[0].dfx, 2.0);
        assert_relative_eq!(events[0].next, 1.5);
        assert!(events[0].error.is_infinite());
        assert_relative_eq!(events[1].x, 1.5);
        assert_relative_eq!(events[1].error, 1.5 - 17.0 / 12.0, epsilon = 1e-12);
        assert_eq!(events[0].d2fx, None);
    }

    #[test]
    fn exact_root_at_seed() {
        let f = FnFunction::new(|x: f64| x - 3.0);
        let df = FnFunction::new(|_: f64| 1.0);
        let solution = solve_unobserved(&f, &df, 3.0, &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::ExactRoot);
        assert_eq!(solution.iters, 1);
        assert_relative_eq!(solution.x, 3.0);
    }

    #[test]
    fn zero_derivative_is_an_error() {
        let f = FnFunction::new(|x: f64| x * x + 1.0);
        let df = FnFunction::new(|x: f64| 2.0 * x);
        let result = solve_unobserved(&f, &df, 0.0, &Config::default());

        assert!(matches!(
            result,
            Err(Error::ZeroDerivative { x, order: 1 }) if x == 0.0
        ));
    }

    #[test]
    fn rejects_non_finite_seed() {
        let f = FnFunction::new(|x: f64| x);
        let result = solve_unobserved(&f, &f, f64::INFINITY, &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteStart { .. })));
    }

    #[test]
    fn gives_up_after_max_iters() {
        // Newton cycles between 0 and 1 on this cubic.
        let f = FnFunction::new(|x: f64| x * x * x - 2.0 * x + 2.0);
        let df = FnFunction::new(|x: f64| 3.0 * x * x - 2.0);
        let config = Config::new(12, 1e-8, ErrorMode::Absolute).unwrap();

        let solution = solve_unobserved(&f, &df, 0.0, &config).expect("should run");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 12);
    }
}
