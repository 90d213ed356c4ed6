//! Factory for approximate inversion runs.
//!
//! `InvContext` turns an [`InvOptions`] into a concrete backend and runs the
//! Neumann-series inversion on it. It exists so callers can pick the backend at
//! run time (from configuration or the environment) while the algorithm itself
//! stays generic.
//!
//! # Usage
//!
//! 1. Build `InvOptions` (or use `InvOptions::from_env()`).
//! 2. Call `InvContext::new(opts).invert(&a)`.

use crate::backend::{FaerBackend, ReferenceBackend};
use crate::config::{BackendKind, InvOptions};
use crate::core::traits::{Backend, Scalar};
use crate::error::InvError;
use crate::matrix::Matrix;
use crate::solver::{ApproxInverse, NeumannInverse};
use crate::utils::convergence::InvertStats;

/// Configured inversion context.
#[derive(Debug, Clone)]
pub struct InvContext {
    pub opts: InvOptions,
}

impl InvContext {
    pub fn new(opts: InvOptions) -> Self {
        Self { opts }
    }

    /// Context configured from the `NSINV_*` environment.
    pub fn from_env() -> Self {
        Self::new(InvOptions::from_env())
    }

    /// Instantiate the selected backend.
    pub fn backend<T: Scalar>(&self) -> Box<dyn Backend<T>>
    where
        FaerBackend: Backend<T>,
    {
        match self.opts.backend {
            BackendKind::Reference => Box::new(ReferenceBackend::new()),
            BackendKind::Faer => Box::new(FaerBackend::with_threads(self.opts.threads)),
        }
    }

    /// Approximate `a⁻¹` into `out`.
    pub fn invert_into<T: Scalar>(
        &self,
        a: &Matrix<T>,
        out: &mut Matrix<T>,
    ) -> Result<InvertStats<T>, InvError>
    where
        FaerBackend: Backend<T>,
    {
        let backend = self.backend::<T>();
        let mut inv = NeumannInverse::new(backend.as_ref(), self.opts.order);
        if let Some(tol) = self.opts.tol.and_then(num_traits::cast::<f64, T>) {
            inv = inv.with_tolerance(tol);
        }
        inv.invert(a, out)
    }

    /// Approximate `a⁻¹` into a freshly allocated matrix.
    pub fn invert<T: Scalar>(&self, a: &Matrix<T>) -> Result<Matrix<T>, InvError>
    where
        FaerBackend: Backend<T>,
    {
        let mut out = Matrix::new(a.size())?;
        self.invert_into(a, &mut out)?;
        Ok(out)
    }
}

impl Default for InvContext {
    fn default() -> Self {
        Self::new(InvOptions::default())
    }
}
