use numeris_core::Function;

use super::Error;

/// Evaluates `f` at `x`, requiring a finite value.
pub(super) fn evaluate<F: Function>(f: &F, x: f64) -> Result<f64, Error<F::Error>> {
    let value = f.call(x).map_err(|source| Error::Function { x, source })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteValue { x, value })
    }
}

/// Rejects non-finite seeds.
pub(super) fn check_start<E: std::error::Error + 'static>(x: f64) -> Result<(), Error<E>> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFiniteStart { x })
    }
}

/// Rejects a non-finite iterate produced by an update from `x`.
pub(super) fn check_step<E: std::error::Error + 'static>(x: f64, next: f64) -> Result<f64, Error<E>> {
    if next.is_finite() {
        Ok(next)
    } else {
        Err(Error::NonFiniteStep { x })
    }
}
