//! Core linear-algebra traits for nsinv.

use crate::error::InvError;
use crate::matrix::Matrix;

/// Real scalar usable as a matrix element.
pub trait Scalar: num_traits::Float + Send + Sync + std::fmt::Debug + 'static {}

impl<T: num_traits::Float + Send + Sync + std::fmt::Debug + 'static> Scalar for T {}

/// The compute capabilities the inversion algorithm is written against.
///
/// Every backend must satisfy the same numeric contract; results may differ
/// only by accumulated floating-point rounding. Operand sizes are checked and
/// a mismatch is reported as [`InvError::SizeMismatch`] before any element is
/// written.
pub trait Backend<T: Scalar> {
    /// Short name used in logs and benchmarks.
    fn name(&self) -> &'static str;

    /// out = a · b
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, out: &mut Matrix<T>) -> Result<(), InvError>;

    /// out = a · btᵀ, i.e. `out[i,j] = Σₖ a[i,k]·bt[j,k]`.
    fn multiply_transposed(
        &self,
        a: &Matrix<T>,
        bt: &Matrix<T>,
        out: &mut Matrix<T>,
    ) -> Result<(), InvError>;

    /// m ← c · m
    fn scale(&self, m: &mut Matrix<T>, c: T);

    /// m ← m + term
    fn add(&self, m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError>;

    /// m ← m − term
    fn sub(&self, m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError>;

    /// m ← m · other, routed through `tmp` since a multiply never writes into
    /// one of its own operands.
    fn mul_assign(
        &self,
        m: &mut Matrix<T>,
        other: &Matrix<T>,
        tmp: &mut Matrix<T>,
    ) -> Result<(), InvError> {
        self.multiply(m, other, tmp)?;
        m.copy_from(tmp)
    }
}

impl<T: Scalar, B: Backend<T> + ?Sized> Backend<T> for &B {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, out: &mut Matrix<T>) -> Result<(), InvError> {
        (**self).multiply(a, b, out)
    }
    fn multiply_transposed(
        &self,
        a: &Matrix<T>,
        bt: &Matrix<T>,
        out: &mut Matrix<T>,
    ) -> Result<(), InvError> {
        (**self).multiply_transposed(a, bt, out)
    }
    fn scale(&self, m: &mut Matrix<T>, c: T) {
        (**self).scale(m, c)
    }
    fn add(&self, m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError> {
        (**self).add(m, term)
    }
    fn sub(&self, m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError> {
        (**self).sub(m, term)
    }
}
