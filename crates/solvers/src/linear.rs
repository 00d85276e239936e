//! Iterative solvers for square linear systems `A·x = b`.
//!
//! Every method splits `A = D − L − U` (diagonal, strictly lower, strictly
//! upper) and repeats a sweep `x ← T·x + c` until successive iterates agree
//! within the tolerance in the infinity norm.
//!
//! # Methods
//!
//! - [`Jacobi`]: every update uses only the previous iterate
//! - [`GaussSeidel`]: updates use values already computed in the same sweep
//! - [`Sor`]: Gauss-Seidel blended with the previous iterate by a factor `w`
//!
//! # Spectral Radius
//!
//! Before iterating, the driver computes the spectral radius `ρ(T)` of the
//! method's iteration matrix. `ρ(T) < 1` guarantees convergence from any
//! start; otherwise the run still proceeds and a warning is logged. The
//! radius is reported in the [`Solution`] whatever the outcome.
//!
//! # Observer Events
//!
//! Each sweep emits an [`Event`] with the new iterate and its distance from
//! the previous one. The observer can return [`Action::StopEarly`].

mod config;
mod error;
mod method;
mod solution;
mod system;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use method::{GaussSeidel, Jacobi, Method, RelaxationError, Sor};
pub use solution::{Solution, Status};
pub use system::{System, SystemError};

use nalgebra::DVector;
use numeris_core::Observer;
use tracing::{debug, trace, warn};

/// Control actions supported by the linear solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current sweep.
    StopEarly,
}

/// Iteration event emitted by the linear solvers.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Iterate after this sweep.
    pub x: &'a [f64],
    /// `‖x_k − x_{k−1}‖∞`.
    pub error: f64,
}

/// Solves `system` with `method`.
///
/// # Errors
///
/// Returns [`Error::Diverged`] if a sweep produces a non-finite component.
pub fn solve<M, Obs>(
    method: &M,
    system: &System,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    M: Method,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let spectral_radius = spectral_radius(method, system);

    let mut current = system.x0().clone();
    let mut next = DVector::zeros(system.dim());
    let mut error = f64::INFINITY;

    for iter in 1..=config.max_iters() {
        method.sweep(system, &current, &mut next);
        if next.iter().any(|v| !v.is_finite()) {
            warn!(method = method.name(), iter, "iterate is no longer finite");
            return Err(Error::Diverged { iter });
        }

        error = (&next - &current).amax();
        trace!(method = method.name(), iter, error, "sweep");
        std::mem::swap(&mut current, &mut next);

        let event = Event {
            iter,
            x: current.as_slice(),
            error,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(
                Status::StoppedByObserver,
                &current,
                error,
                iter,
                spectral_radius,
            ));
        }

        if error < config.tolerance() {
            debug!(method = method.name(), iter, error, "converged");
            return Ok(Solution::new(
                Status::Converged,
                &current,
                error,
                iter,
                spectral_radius,
            ));
        }
    }

    Ok(Solution::new(
        Status::MaxIters,
        &current,
        error,
        config.max_iters(),
        spectral_radius,
    ))
}

/// Runs [`solve`] without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M: Method>(
    method: &M,
    system: &System,
    config: &Config,
) -> Result<Solution, Error> {
    solve(method, system, config, ())
}

/// Returns the largest eigenvalue magnitude of the method's iteration
/// matrix, or `None` if the eigenvalues could not be computed.
pub fn spectral_radius<M: Method>(method: &M, system: &System) -> Option<f64> {
    const MAX_SCHUR_ITERS: usize = 10_000;

    let t = method.iteration_matrix(system)?;
    let Some(schur) = t.try_schur(f64::EPSILON, MAX_SCHUR_ITERS) else {
        warn!(method = method.name(), "eigenvalues of iteration matrix did not converge");
        return None;
    };

    let rho = schur
        .complex_eigenvalues()
        .iter()
        .map(|z| z.norm())
        .fold(0.0, f64::max);

    if rho < 1.0 {
        debug!(method = method.name(), rho, "spectral radius below 1, convergence guaranteed");
    } else {
        warn!(method = method.name(), rho, "spectral radius >= 1.0, iteration may diverge");
    }
    Some(rho)
}
