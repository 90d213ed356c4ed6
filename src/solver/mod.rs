//! Approximate inversion interfaces.

use crate::backend::FaerBackend;
use crate::core::traits::{Backend, Scalar};
use crate::error::InvError;
use crate::matrix::Matrix;
use crate::utils::convergence::InvertStats;

/// Common interface for any approximate inverter.
pub trait ApproxInverse<T: Scalar> {
    /// Approximate A⁻¹, writing the result into `out` (same size as `a`).
    /// Returns iteration stats.
    fn invert(&self, a: &Matrix<T>, out: &mut Matrix<T>) -> Result<InvertStats<T>, InvError>;
}

pub mod neumann;
pub use neumann::{NeumannInverse, invert_approx_with, residual_norm};

/// Approximate `A⁻¹` with an `m`-term Neumann series on the default faer backend.
pub fn invert_approx<T: Scalar>(a: &Matrix<T>, m: usize) -> Result<Matrix<T>, InvError>
where
    FaerBackend: Backend<T>,
{
    invert_approx_with(FaerBackend::default(), a, m)
}
