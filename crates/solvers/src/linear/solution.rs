use nalgebra::DVector;

/// How a linear solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Successive iterates agreed within the tolerance.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a linear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: Status,
    /// Final iterate.
    pub x: Vec<f64>,
    /// `‖x_k − x_{k−1}‖∞` of the final sweep.
    pub error: f64,
    pub iters: usize,
    /// Spectral radius of the iteration matrix, if it could be computed.
    pub spectral_radius: Option<f64>,
}

impl Solution {
    pub(super) fn new(
        status: Status,
        x: &DVector<f64>,
        error: f64,
        iters: usize,
        spectral_radius: Option<f64>,
    ) -> Self {
        Self {
            status,
            x: x.as_slice().to_vec(),
            error,
            iters,
            spectral_radius,
        }
    }
}
