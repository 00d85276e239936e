//! Newton variants for roots of multiplicity greater than one.
//!
//! Plain Newton-Raphson only converges linearly at a root of multiplicity
//! `m > 1`. Two modifications restore fast convergence:
//!
//! - [`solve_known_multiplicity`] scales the Newton step by a known `m`:
//!   `x' = x − m·f(x) / f'(x)`
//! - [`solve_second_order`] applies Newton to `f / f'`, which has only simple
//!   roots: `x' = x − f·f' / (f'² − f·f'')`
//!
//! # Observer Events
//!
//! Both emit the same [`Event`] as [`newton_raphson`](super::newton_raphson);
//! the second-order variant also fills in `d2fx`.

use numeris_core::{Function, Observer};

use super::{
    Action, Config, Error, Solution,
    evaluate::{check_step, evaluate},
    tangent::{self, Step},
};

pub use super::tangent::Event;

/// Finds a root of multiplicity `multiplicity` by the scaled Newton step.
///
/// # Errors
///
/// Returns an error if `multiplicity` is zero, `x0` is not finite, a
/// function cannot be evaluated, `f'` vanishes at an iterate, or an update
/// is not finite.
pub fn solve_known_multiplicity<F, D, Obs>(
    f: &F,
    df: &D,
    x0: f64,
    multiplicity: u32,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    D: Function<Error = F::Error>,
    Obs: Observer<Event, Action>,
{
    if multiplicity == 0 {
        return Err(Error::InvalidMultiplicity(multiplicity));
    }
    let m = f64::from(multiplicity);

    tangent::iterate(x0, config, observer, |x| {
        let fx = evaluate(f, x)?;
        let dfx = evaluate(df, x)?;
        let next = if fx == 0.0 {
            x
        } else if dfx == 0.0 {
            return Err(Error::ZeroDerivative { x, order: 1 });
        } else {
            check_step(x, x - m * fx / dfx)?
        };
        Ok(Step {
            fx,
            dfx,
            d2fx: None,
            next,
        })
    })
}

/// Finds a root using the first and second derivatives.
///
/// # Errors
///
/// Returns an error if `x0` is not finite, a function cannot be evaluated,
/// `f'` or `f''` vanishes at an iterate, the update denominator is zero, or
/// an update is not finite.
pub fn solve_second_order<F, D, D2, Obs>(
    f: &F,
    df: &D,
    d2f: &D2,
    x0: f64,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    D: Function<Error = F::Error>,
    D2: Function<Error = F::Error>,
    Obs: Observer<Event, Action>,
{
    tangent::iterate(x0, config, observer, |x| {
        let fx = evaluate(f, x)?;
        let dfx = evaluate(df, x)?;
        let d2fx = evaluate(d2f, x)?;
        let next = if fx == 0.0 {
            x
        } else if dfx == 0.0 {
            return Err(Error::ZeroDerivative { x, order: 1 });
        } else if d2fx == 0.0 {
            return Err(Error::ZeroDerivative { x, order: 2 });
        } else {
            let denominator = dfx * dfx - fx * d2fx;
            if denominator == 0.0 {
                return Err(Error::ZeroDenominator { x });
            }
            check_step(x, x - fx * dfx / denominator)?
        };
        Ok(Step {
            fx,
            dfx,
            d2fx: Some(d2fx),
            next,
        })
    })
}

/// Runs [`solve_known_multiplicity`] without observation.
///
/// # Errors
///
/// See [`solve_known_multiplicity`].
pub fn solve_known_multiplicity_unobserved<F, D>(
    f: &F,
    df: &D,
    x0: f64,
    multiplicity: u32,
    config: &Config,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    D: Function<Error = F::Error>,
{
    solve_known_multiplicity(f, df, x0, multiplicity, config, ())
}

/// Runs [`solve_second_order`] without observation.
///
/// # Errors
///
/// See [`solve_second_order`].
pub fn solve_second_order_unobserved<F, D, D2>(
    f: &F,
    df: &D,
    d2f: &D2,
    x0: f64,
    config: &Config,
) -> Result<Solution, Error<F::Error>>
where
    F: Function,
    D: Function<Error = F::Error>,
    D2: Function<Error = F::Error>,
{
    solve_second_order(f, df, d2f, x0, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use numeris_core::{ErrorMode, FnFunction};

    use crate::equation::{Status, newton_raphson};

    // (x - 1)^2 (x + 2) has a double root at 1.
    fn f(x: f64) -> f64 {
        (x - 1.0).powi(2) * (x + 2.0)
    }
    fn df(x: f64) -> f64 {
        3.0 * x * x - 3.0
    }
    fn d2f(x: f64) -> f64 {
        6.0 * x
    }

    fn config() -> Config {
        Config::new(100, 1e-10, ErrorMode::Absolute).unwrap()
    }

    #[test]
    fn multiplicity_speeds_up_double_root() {
        let (f, df) = (FnFunction::new(f), FnFunction::new(df));

        let plain = newton_raphson::solve_unobserved(&f, &df, 2.0, &config()).expect("should run");
        let scaled =
            solve_known_multiplicity_unobserved(&f, &df, 2.0, 2, &config()).expect("should solve");

        assert!(scaled.status.has_root());
        assert_relative_eq!(scaled.x, 1.0, epsilon = 1e-8);
        assert!(scaled.iters < plain.iters);
    }

    #[test]
    fn multiplicity_one_is_newton() {
        let f = FnFunction::new(|x: f64| x * x - 2.0);
        let df = FnFunction::new(|x: f64| 2.0 * x);

        let newton = newton_raphson::solve_unobserved(&f, &df, 1.5, &config()).unwrap();
        let mr = solve_known_multiplicity_unobserved(&f, &df, 1.5, 1, &config()).unwrap();

        assert_eq!(newton, mr);
    }

    #[test]
    fn rejects_zero_multiplicity() {
        let (f, df) = (FnFunction::new(f), FnFunction::new(df));
        let result = solve_known_multiplicity_unobserved(&f, &df, 2.0, 0, &config());
        assert!(matches!(result, Err(Error::InvalidMultiplicity(0))));
    }

    #[test]
    fn second_order_finds_double_root() {
        let (f, df, d2f) = (FnFunction::new(f), FnFunction::new(df), FnFunction::new(d2f));
        let mut saw_second = false;

        let solution = solve_second_order(&f, &df, &d2f, 2.0, &config(), |event: &Event| {
            saw_second |= event.d2fx.is_some();
            None::<Action>
        })
        .expect("should solve");

        assert!(solution.status.has_root());
        assert_relative_eq!(solution.x, 1.0, epsilon = 1e-8);
        assert!(saw_second);
    }

    #[test]
    fn second_order_rejects_vanishing_second_derivative() {
        let (f, df, d2f) = (FnFunction::new(f), FnFunction::new(df), FnFunction::new(d2f));
        let result = solve_second_order_unobserved(&f, &df, &d2f, 0.0, &config());

        assert!(matches!(result, Err(Error::ZeroDerivative { order: 2, .. })));
    }
}
