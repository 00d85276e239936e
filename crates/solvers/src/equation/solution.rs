/// How an equation solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `f` evaluated to exactly zero at the reported point.
    ExactRoot,
    /// The iteration error dropped below the tolerance.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
    /// A bracketing step could not shrink the bracket, so iterating further
    /// would repeat the same point.
    Stalled,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns true if the reported point is accepted as a root.
    #[must_use]
    pub fn has_root(self) -> bool {
        matches!(self, Self::ExactRoot | Self::Converged)
    }
}

/// The result of an equation solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,
    /// Latest approximation of the root.
    pub x: f64,
    /// Iteration error at `x`; infinite if only one iteration ran.
    pub error: f64,
    /// Number of iterations performed.
    pub iters: usize,
}

impl Solution {
    pub(super) fn new(status: Status, x: f64, error: f64, iters: usize) -> Self {
        Self {
            status,
            x,
            error,
            iters,
        }
    }

    /// A root found before iterating, such as a bracket endpoint.
    pub(super) fn exact_at_start(x: f64) -> Self {
        Self::new(Status::ExactRoot, x, 0.0, 0)
    }
}
