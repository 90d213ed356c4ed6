//! Elementwise, norm and multiply kernels over row-major storage.
//!
//! The elementwise kernels here are the single-threaded reference versions used by
//! [`ReferenceBackend`](crate::backend::ReferenceBackend). The norm kernels are shared
//! by every backend: they only feed the initial scale factor of the inversion.
//!
//! Both norms walk the buffer in storage order. The 1-norm needs column sums, so it
//! accumulates a running vector of column totals row by row instead of striding
//! down each column, which would touch one cache line per element for large `n`.

use crate::core::traits::Scalar;
use crate::error::{InvError, check_same_size};
use crate::matrix::Matrix;

/// Inner product of two equal-length rows.
#[inline]
pub fn dot<T: Scalar>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// out = a · btᵀ by row-by-row dot products.
pub fn multiply_transposed<T: Scalar>(
    a: &Matrix<T>,
    bt: &Matrix<T>,
    out: &mut Matrix<T>,
) -> Result<(), InvError> {
    let n = a.size();
    check_same_size(n, bt.size())?;
    check_same_size(n, out.size())?;
    for i in 0..n {
        let row_a = a.row(i);
        let out_row = &mut out.as_mut_slice()[i * n..(i + 1) * n];
        for (j, o) in out_row.iter_mut().enumerate() {
            *o = dot(row_a, bt.row(j));
        }
    }
    Ok(())
}

pub fn add<T: Scalar>(m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError> {
    check_same_size(m.size(), term.size())?;
    for (x, &t) in m.as_mut_slice().iter_mut().zip(term.as_slice()) {
        *x = *x + t;
    }
    Ok(())
}

pub fn sub<T: Scalar>(m: &mut Matrix<T>, term: &Matrix<T>) -> Result<(), InvError> {
    check_same_size(m.size(), term.size())?;
    for (x, &t) in m.as_mut_slice().iter_mut().zip(term.as_slice()) {
        *x = *x - t;
    }
    Ok(())
}

pub fn scale<T: Scalar>(m: &mut Matrix<T>, c: T) {
    for x in m.as_mut_slice().iter_mut() {
        *x = *x * c;
    }
}

/// Maximum absolute column sum.
pub fn one_norm<T: Scalar>(m: &Matrix<T>) -> T {
    let n = m.size();
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        let sums = m
            .as_slice()
            .par_chunks(n)
            .fold(
                || vec![T::zero(); n],
                |mut acc, row| {
                    accumulate_abs(&mut acc, row);
                    acc
                },
            )
            .reduce(
                || vec![T::zero(); n],
                |mut lhs, rhs| {
                    for (l, r) in lhs.iter_mut().zip(rhs) {
                        *l = *l + r;
                    }
                    lhs
                },
            );
        sums.into_iter().fold(T::zero(), nan_max)
    }
    #[cfg(not(feature = "rayon"))]
    {
        let mut sums = vec![T::zero(); n];
        for row in m.as_slice().chunks(n) {
            accumulate_abs(&mut sums, row);
        }
        sums.into_iter().fold(T::zero(), nan_max)
    }
}

/// Maximum absolute row sum.
pub fn inf_norm<T: Scalar>(m: &Matrix<T>) -> T {
    let n = m.size();
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        m.as_slice()
            .par_chunks(n)
            .map(abs_sum)
            .reduce(|| T::zero(), nan_max)
    }
    #[cfg(not(feature = "rayon"))]
    {
        m.as_slice().chunks(n).map(abs_sum).fold(T::zero(), nan_max)
    }
}

/// Larger of two values; a NaN in either operand wins.
pub(crate) fn nan_max<T: Scalar>(acc: T, x: T) -> T {
    if acc.is_nan() || x.is_nan() {
        T::nan()
    } else if x > acc {
        x
    } else {
        acc
    }
}

fn accumulate_abs<T: Scalar>(acc: &mut [T], row: &[T]) {
    for (a, &x) in acc.iter_mut().zip(row) {
        *a = *a + x.abs();
    }
}

fn abs_sum<T: Scalar>(row: &[T]) -> T {
    row.iter().fold(T::zero(), |acc, &x| acc + x.abs())
}
