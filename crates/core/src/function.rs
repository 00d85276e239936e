use std::{convert::Infallible, error::Error as StdError, fmt};

/// A scalar function of one real variable that may fail to evaluate.
///
/// Solvers are generic over this trait so they can drive parsed expressions,
/// closures, or any other callable with the same contract.
pub trait Function {
    type Error: StdError + Send + Sync + 'static;

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the function is undefined at `x`.
    fn call(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<T: Function + ?Sized> Function for &T {
    type Error = T::Error;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).call(x)
    }
}

/// Wraps an infallible closure so it can be used as a [`Function`].
///
/// ```
/// use numeris_core::{FnFunction, Function};
///
/// let square = FnFunction::new(|x: f64| x * x);
/// assert_eq!(square.call(3.0), Ok(9.0));
/// ```
#[derive(Clone, Copy)]
pub struct FnFunction<F> {
    func: F,
}

impl<F> FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    /// Creates a new function from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Function for FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    type Error = Infallible;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        Ok((self.func)(x))
    }
}

impl<F> From<F> for FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn from(func: F) -> Self {
        Self::new(func)
    }
}

impl<F> fmt::Debug for FnFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFunction").finish_non_exhaustive()
    }
}
