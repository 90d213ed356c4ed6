//! Optimized backend on top of faer's dense GEMM.
//!
//! Row-major buffers are viewed in place as `faer::MatRef`/`MatMut` (no copies), and
//! the product is a single `matmul` call with unit scale that replaces the
//! destination. The pre-transposed operand of [`Backend::multiply_transposed`] is
//! handled by passing a transposed view, so both multiply forms cost one call.
//! Elementwise updates go through faer's matrix arithmetic (`+=`, `-=` and
//! `*= Scale(c)`) over the same views.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use crate::core::traits::Backend;
use crate::error::{InvError, check_same_size};
use crate::matrix::Matrix;
use faer::linalg::matmul::matmul;
use faer::{Accum, MatMut, MatRef, Par, Scale};

/// GEMM backend; implemented for `f32` and `f64`.
#[derive(Clone, Copy)]
pub struct FaerBackend {
    par: Par,
}

impl FaerBackend {
    /// Backend with the given faer parallelism.
    pub fn new(par: Par) -> Self {
        Self { par }
    }

    /// Single-threaded GEMM.
    pub fn sequential() -> Self {
        Self::new(Par::Seq)
    }

    /// `0` uses every rayon thread, `1` runs sequentially.
    pub fn with_threads(threads: usize) -> Self {
        match threads {
            1 => Self::new(Par::Seq),
            t => Self::new(Par::rayon(t)),
        }
    }

    pub fn par(&self) -> Par {
        self.par
    }
}

impl Default for FaerBackend {
    fn default() -> Self {
        Self::with_threads(0)
    }
}

impl std::fmt::Debug for FaerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let par = match self.par {
            Par::Seq => "seq",
            _ => "rayon",
        };
        f.debug_struct("FaerBackend").field("par", &par).finish()
    }
}

macro_rules! impl_faer_backend {
    ($t:ty) => {
        impl Backend<$t> for FaerBackend {
            fn name(&self) -> &'static str {
                "faer"
            }

            fn multiply(
                &self,
                a: &Matrix<$t>,
                b: &Matrix<$t>,
                out: &mut Matrix<$t>,
            ) -> Result<(), InvError> {
                let n = a.size();
                check_same_size(n, b.size())?;
                check_same_size(n, out.size())?;
                let lhs = MatRef::from_row_major_slice(a.as_slice(), n, n);
                let rhs = MatRef::from_row_major_slice(b.as_slice(), n, n);
                let dst = MatMut::from_row_major_slice_mut(out.as_mut_slice(), n, n);
                matmul(dst, Accum::Replace, lhs, rhs, 1.0 as $t, self.par);
                Ok(())
            }

            fn multiply_transposed(
                &self,
                a: &Matrix<$t>,
                bt: &Matrix<$t>,
                out: &mut Matrix<$t>,
            ) -> Result<(), InvError> {
                let n = a.size();
                check_same_size(n, bt.size())?;
                check_same_size(n, out.size())?;
                let lhs = MatRef::from_row_major_slice(a.as_slice(), n, n);
                let rhs = MatRef::from_row_major_slice(bt.as_slice(), n, n).transpose();
                let dst = MatMut::from_row_major_slice_mut(out.as_mut_slice(), n, n);
                matmul(dst, Accum::Replace, lhs, rhs, 1.0 as $t, self.par);
                Ok(())
            }

            fn scale(&self, m: &mut Matrix<$t>, c: $t) {
                let n = m.size();
                let mut dst = MatMut::from_row_major_slice_mut(m.as_mut_slice(), n, n);
                dst *= Scale(c);
            }

            fn add(&self, m: &mut Matrix<$t>, term: &Matrix<$t>) -> Result<(), InvError> {
                let n = m.size();
                check_same_size(n, term.size())?;
                let mut dst = MatMut::from_row_major_slice_mut(m.as_mut_slice(), n, n);
                dst += MatRef::from_row_major_slice(term.as_slice(), n, n);
                Ok(())
            }

            fn sub(&self, m: &mut Matrix<$t>, term: &Matrix<$t>) -> Result<(), InvError> {
                let n = m.size();
                check_same_size(n, term.size())?;
                let mut dst = MatMut::from_row_major_slice_mut(m.as_mut_slice(), n, n);
                dst -= MatRef::from_row_major_slice(term.as_slice(), n, n);
                Ok(())
            }
        }
    };
}

impl_faer_backend!(f32);
impl_faer_backend!(f64);
