//! Hand-written triple-loop backend.
//!
//! Each output element is the dot product of a row of the left operand and a row of
//! the pre-transposed right operand, so both reads walk memory in storage order.
//! [`Backend::multiply`] transposes its right operand into a scratch matrix first.

use crate::core::kernels;
use crate::core::traits::{Backend, Scalar};
use crate::error::{InvError, check_same_size};
use crate::matrix::Matrix;

/// Single-threaded O(n³) reference implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    pub fn new() -> Self {
        ReferenceBackend
    }
}

impl<T: Scalar> Backend<T> for ReferenceBackend {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, out: &mut Matrix<T>) -> Result<(), InvError> {
        check_same_size(a.size(), b.size())?;
        let bt = b.transposed()?;
        kernels::multiply_transposed(a, &bt, out)
    }

    fn multiply_transposed(
        &self,
        a: &Matrix<T>,
        bt: &Matrix<T>,
        out: &mut Matrix<T>,
    ) -> Result<(), InvError> {
        kernels::multiply_transposed(a, bt, out)
    }

    fn scale(&self, m: &mut Matrix<T>, c: T) {
        kernels::scale(m, c)
    }

    fn add(&self, m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError> {
        kernels::add(m, term)
    }

    fn sub(&self, m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError> {
        kernels::sub(m, term)
    }
}
