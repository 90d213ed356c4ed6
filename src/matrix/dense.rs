//! Square dense matrix with contiguous row-major storage.
//!
//! Element `(i, j)` of an `n x n` matrix lives at offset `i * n + j`. The size is
//! fixed at creation; every binary operation checks that its operands agree and
//! reports [`InvError::SizeMismatch`] otherwise. A `Matrix` exclusively owns its
//! buffer and is never copied implicitly: use [`Matrix::copy_from`] or
//! [`Clone`] explicitly. Dropping the matrix releases the buffer.

use crate::core::kernels::nan_max;
use crate::core::traits::Scalar;
use crate::error::{InvError, check_same_size};
use rand::Rng;
use rand::distributions::{Distribution, Standard};
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    size: usize,
    elements: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Allocate a zero-filled `n x n` matrix.
    ///
    /// Fails with [`InvError::EmptyMatrix`] for `n == 0` and with
    /// [`InvError::Allocation`] when `n²` elements cannot be reserved.
    pub fn new(n: usize) -> Result<Self, InvError> {
        if n == 0 {
            return Err(InvError::EmptyMatrix);
        }
        let len = n.checked_mul(n).ok_or(InvError::Allocation { n })?;
        let mut elements = Vec::new();
        elements
            .try_reserve_exact(len)
            .map_err(|_| InvError::Allocation { n })?;
        elements.resize(len, T::zero());
        Ok(Self { size: n, elements })
    }

    /// Allocate the `n x n` identity.
    pub fn identity(n: usize) -> Result<Self, InvError> {
        let mut m = Self::new(n)?;
        m.set_identity();
        Ok(m)
    }

    /// Take ownership of a row-major buffer of length `n²`.
    pub fn from_row_major(n: usize, data: Vec<T>) -> Result<Self, InvError> {
        if n == 0 {
            return Err(InvError::EmptyMatrix);
        }
        let expected = n.checked_mul(n).ok_or(InvError::Allocation { n })?;
        if data.len() != expected {
            return Err(InvError::BufferLength { expected, found: data.len() });
        }
        Ok(Self { size: n, elements: data })
    }

    /// Build an `n x n` matrix from `f(i, j)`.
    pub fn from_fn(n: usize, f: impl Fn(usize, usize) -> T) -> Result<Self, InvError> {
        let mut m = Self::new(n)?;
        for (idx, x) in m.elements.iter_mut().enumerate() {
            *x = f(idx / n, idx % n);
        }
        Ok(m)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Release the matrix, handing back its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Row `i` as a contiguous slice.
    pub fn row(&self, i: usize) -> &[T] {
        let n = self.size;
        &self.elements[i * n..(i + 1) * n]
    }

    pub fn get(&self, i: usize, j: usize) -> T {
        self.elements[i * self.size + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.elements[i * self.size + j] = value;
    }

    /// Assign every element an independent uniform sample from `[0, 1)`.
    pub fn fill_random<R: Rng>(&mut self, rng: &mut R)
    where
        Standard: Distribution<T>,
    {
        for x in self.elements.iter_mut() {
            *x = rng.r#gen();
        }
    }

    /// Overwrite in place with the identity.
    pub fn set_identity(&mut self) {
        let n = self.size;
        self.elements.fill(T::zero());
        for i in 0..n {
            self.elements[i * n + i] = T::one();
        }
    }

    /// In-place transpose by swapping `(i, j)` with `(j, i)` for `i < j`.
    pub fn transpose(&mut self) {
        let n = self.size;
        for i in 0..n {
            for j in (i + 1)..n {
                self.elements.swap(i * n + j, j * n + i);
            }
        }
    }

    /// Transposed copy; `self` is left untouched.
    pub fn transposed(&self) -> Result<Self, InvError> {
        let mut t = Self::new(self.size)?;
        t.elements.copy_from_slice(&self.elements);
        t.transpose();
        Ok(t)
    }

    /// Overwrite `self` with the contents of `src`.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), InvError> {
        check_same_size(self.size, src.size)?;
        self.elements.copy_from_slice(&src.elements);
        Ok(())
    }

    /// Largest elementwise absolute difference; NaN if any element pair is NaN.
    pub fn max_abs_diff(&self, other: &Self) -> Result<T, InvError> {
        check_same_size(self.size, other.size)?;
        Ok(self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(&a, &b)| (a - b).abs())
            .fold(T::zero(), nan_max))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.elements[i * self.size + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.elements[i * self.size + j]
    }
}
