//! Optional early-exit test & stats for the truncated series.

/// Early-exit tolerance on the ∞-norm of the latest series term.
///
/// The inversion performs a fixed number of iterations by default; a `Convergence`
/// is only consulted when the caller opts in.
#[derive(Clone, Copy, Debug)]
pub struct Convergence<T> {
    pub tol: T,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvertStats<T> {
    /// Series terms accumulated after the leading identity.
    pub iterations: usize,
    /// ∞-norm of the last term added, when tracked.
    pub final_term_norm: Option<T>,
    /// True when the tolerance stopped the series before the requested order.
    pub converged_early: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    pub fn new(tol: T) -> Self {
        Self { tol }
    }

    /// Returns true once the term just added is negligible.
    pub fn check(&self, term_norm: T) -> bool {
        term_norm <= self.tol
    }
}
