//! Approximate inverse by a scaled, truncated Neumann series.
//!
//! Given a square `A`, the initial approximation is
//!
//! ```text
//! B0 = Aᵀ / (‖A‖₁ · ‖A‖∞)
//! ```
//!
//! which keeps the spectral radius of the error matrix `R = I − B0·A` below one
//! without any eigenvalue computation (‖A‖₂² ≤ ‖A‖₁‖A‖∞). The series
//! `I + R + R² + … + R^(m−1)` then approximates `(B0·A)⁻¹`, and post-multiplying by
//! `B0` yields an approximation of `A⁻¹`. The whole procedure is `m + 1` matrix
//! products plus O(n²) updates: no pivoting, no division beyond the two norm
//! scalings.
//!
//! The truncation order is a fixed iteration count. No accuracy check is made
//! unless a [`Convergence`] tolerance is supplied; singular or ill-conditioned inputs
//! simply produce a poor approximation, never an error. Use [`residual_norm`] to
//! measure the result when it matters.

use crate::core::kernels::{inf_norm, one_norm};
use crate::core::traits::{Backend, Scalar};
use crate::error::{InvError, check_same_size};
use crate::matrix::Matrix;
use crate::solver::ApproxInverse;
use crate::utils::convergence::{Convergence, InvertStats};

/// Truncated Neumann-series inverter over backend `B`.
pub struct NeumannInverse<B, T> {
    pub backend: B,
    /// Number of series terms `m`, including the leading identity.
    pub order: usize,
    /// Optional early exit; `None` keeps the fixed-order contract.
    pub conv: Option<Convergence<T>>,
}

impl<B: Backend<T>, T: Scalar> NeumannInverse<B, T> {
    pub fn new(backend: B, order: usize) -> Self {
        Self { backend, order, conv: None }
    }

    /// Stop once the ∞-norm of the latest power `Rᵏ` drops to `tol`.
    pub fn with_tolerance(mut self, tol: T) -> Self {
        self.conv = Some(Convergence::new(tol));
        self
    }
}

impl<B: Backend<T>, T: Scalar> ApproxInverse<T> for NeumannInverse<B, T> {
    fn invert(&self, a: &Matrix<T>, out: &mut Matrix<T>) -> Result<InvertStats<T>, InvError> {
        if self.order == 0 {
            return Err(InvError::InvalidOrder);
        }
        let n = a.size();
        check_same_size(n, out.size())?;
        let backend = &self.backend;

        let a1 = one_norm(a);
        let ainf = inf_norm(a);
        if !(a1 > T::zero() && ainf > T::zero() && a1.is_finite() && ainf.is_finite()) {
            return Err(InvError::DegenerateInput);
        }
        log::debug!(
            "neumann inverse: n={}, order={}, backend={}, |A|_1={:?}, |A|_inf={:?}",
            n,
            self.order,
            backend.name(),
            a1,
            ainf
        );

        // B0 = Aᵀ / (|A|_1 |A|_inf), scaled in two steps so the product never overflows
        let mut b0 = a.transposed()?;
        backend.scale(&mut b0, ainf.recip());
        backend.scale(&mut b0, a1.recip());

        // R = I - B0 A
        let mut tmp = Matrix::new(n)?;
        let mut r = Matrix::identity(n)?;
        backend.multiply(&b0, a, &mut tmp)?;
        backend.sub(&mut r, &tmp)?;

        // Both right-hand factors are stored transposed from here on, so every
        // remaining product is a `multiply_transposed` with no per-call scratch.
        r.transpose();
        b0.transpose();

        let mut r_pow = Matrix::identity(n)?;
        out.set_identity();

        let mut stats = InvertStats {
            iterations: 0,
            final_term_norm: None,
            converged_early: false,
        };
        for k in 1..self.order {
            backend.multiply_transposed(&r_pow, &r, &mut tmp)?;
            std::mem::swap(&mut r_pow, &mut tmp);
            backend.add(out, &r_pow)?;
            stats.iterations = k;
            if let Some(conv) = &self.conv {
                let term = inf_norm(&r_pow);
                log::trace!("neumann inverse: k={}, |R^k|_inf={:?}", k, term);
                stats.final_term_norm = Some(term);
                if conv.check(term) {
                    stats.converged_early = k + 1 < self.order;
                    if stats.converged_early {
                        log::debug!(
                            "neumann inverse: term below tolerance after {} of {} terms",
                            k + 1,
                            self.order
                        );
                    }
                    break;
                }
            }
        }

        backend.multiply_transposed(out, &b0, &mut tmp)?;
        std::mem::swap(out, &mut tmp);
        Ok(stats)
    }
}

/// Approximate `A⁻¹` with `m` series terms on `backend`.
pub fn invert_approx_with<T: Scalar, B: Backend<T>>(
    backend: B,
    a: &Matrix<T>,
    m: usize,
) -> Result<Matrix<T>, InvError> {
    let mut out = Matrix::new(a.size())?;
    NeumannInverse::new(backend, m).invert(a, &mut out)?;
    Ok(out)
}

/// ‖I − X·A‖∞: how far `x` is from a left inverse of `a`.
pub fn residual_norm<T: Scalar, B: Backend<T>>(
    backend: &B,
    a: &Matrix<T>,
    x: &Matrix<T>,
) -> Result<T, InvError> {
    check_same_size(a.size(), x.size())?;
    let mut e = Matrix::identity(a.size())?;
    let mut xa = Matrix::new(a.size())?;
    backend.multiply(x, a, &mut xa)?;
    backend.sub(&mut e, &xa)?;
    Ok(inf_norm(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ReferenceBackend;
    use approx::assert_abs_diff_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reference backend that counts how often each product form is used.
    #[derive(Default)]
    struct CountingBackend {
        multiply: AtomicUsize,
        multiply_transposed: AtomicUsize,
    }

    impl Backend<f64> for CountingBackend {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn multiply(
            &self,
            a: &Matrix<f64>,
            b: &Matrix<f64>,
            out: &mut Matrix<f64>,
        ) -> Result<(), InvError> {
            self.multiply.fetch_add(1, Ordering::Relaxed);
            ReferenceBackend.multiply(a, b, out)
        }
        fn multiply_transposed(
            &self,
            a: &Matrix<f64>,
            bt: &Matrix<f64>,
            out: &mut Matrix<f64>,
        ) -> Result<(), InvError> {
            self.multiply_transposed.fetch_add(1, Ordering::Relaxed);
            ReferenceBackend.multiply_transposed(a, bt, out)
        }
        fn scale(&self, m: &mut Matrix<f64>, c: f64) {
            ReferenceBackend.scale(m, c)
        }
        fn add(&self, m: &mut Matrix<f64>, term: &Matrix<f64>) -> Result<(), InvError> {
            ReferenceBackend.add(m, term)
        }
        fn sub(&self, m: &mut Matrix<f64>, term: &Matrix<f64>) -> Result<(), InvError> {
            ReferenceBackend.sub(m, term)
        }
    }

    fn diag(d: &[f64]) -> Matrix<f64> {
        Matrix::from_fn(d.len(), |i, j| if i == j { d[i] } else { 0.0 }).unwrap()
    }

    #[test]
    fn identity_is_a_fixed_point() {
        let a = Matrix::<f32>::identity(5).unwrap();
        for m in [1, 2, 7] {
            let x = invert_approx_with(ReferenceBackend, &a, m).unwrap();
            assert!(x.max_abs_diff(&a).unwrap() <= 1e-6);
        }
    }

    #[test]
    fn order_one_is_the_initial_scaling() {
        // m = 1 returns B0 itself
        let a = diag(&[2.0, 4.0]);
        let x = invert_approx_with(ReferenceBackend, &a, 1).unwrap();
        assert_abs_diff_eq!(x[(0, 0)], 2.0 / 16.0, epsilon = 1e-15);
        assert_abs_diff_eq!(x[(1, 1)], 4.0 / 16.0, epsilon = 1e-15);
    }

    #[test]
    fn diagonal_matches_closed_form() {
        // For A = diag(d), B0 = diag(d)/16 and the m-term result is (1 - r^m)/d
        let d = [1.0, 2.0, 3.0, 4.0];
        let a = diag(&d);
        let m = 12;
        let x = invert_approx_with(ReferenceBackend, &a, m).unwrap();
        for (i, &di) in d.iter().enumerate() {
            let r = 1.0 - di * di / 16.0;
            let expected = (1.0 - r.powi(m as i32)) / di;
            assert_abs_diff_eq!(x[(i, i)], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn series_loop_uses_pre_transposed_products() {
        // the conventional product, which transposes into a scratch, runs once for B0·A
        let a = diag(&[1.0, 2.0, 3.0]);
        for m in [1, 5, 20] {
            let backend = CountingBackend::default();
            let mut out = Matrix::new(3).unwrap();
            NeumannInverse::new(&backend, m).invert(&a, &mut out).unwrap();
            assert_eq!(backend.multiply.load(Ordering::Relaxed), 1);
            assert_eq!(backend.multiply_transposed.load(Ordering::Relaxed), m);
        }
    }

    #[test]
    fn pre_transposed_products_match_closed_form_on_non_symmetric_input() {
        // A = [[2, 1], [0, 1]], A⁻¹ = [[0.5, -0.5], [0, 1]]
        let a = Matrix::<f64>::from_row_major(2, vec![2.0, 1.0, 0.0, 1.0]).unwrap();
        let x = invert_approx_with(ReferenceBackend, &a, 400).unwrap();
        let expected = [0.5, -0.5, 0.0, 1.0];
        for (got, want) in x.as_slice().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_matrix_is_rejected() {
        let a = Matrix::<f32>::new(3).unwrap();
        let mut out = Matrix::new(3).unwrap();
        let inv = NeumannInverse::new(ReferenceBackend, 4);
        assert_eq!(inv.invert(&a, &mut out), Err(InvError::DegenerateInput));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut a = Matrix::<f64>::identity(2).unwrap();
        a[(0, 1)] = f64::NAN;
        assert_eq!(
            invert_approx_with(ReferenceBackend, &a, 3),
            Err(InvError::DegenerateInput)
        );
    }

    #[test]
    fn zero_order_is_rejected() {
        let a = Matrix::<f32>::identity(2).unwrap();
        assert_eq!(
            invert_approx_with(ReferenceBackend, &a, 0),
            Err(InvError::InvalidOrder)
        );
    }

    #[test]
    fn output_size_must_match() {
        let a = Matrix::<f32>::identity(2).unwrap();
        let mut out = Matrix::new(3).unwrap();
        let inv = NeumannInverse::new(ReferenceBackend, 2);
        assert_eq!(
            inv.invert(&a, &mut out),
            Err(InvError::SizeMismatch { expected: 2, found: 3 })
        );
    }

    #[test]
    fn tolerance_stops_early_on_identity() {
        let a = Matrix::<f64>::identity(3).unwrap();
        let mut out = Matrix::new(3).unwrap();
        let inv = NeumannInverse::new(ReferenceBackend, 50).with_tolerance(1e-12);
        let stats = inv.invert(&a, &mut out).unwrap();
        assert_eq!(stats.iterations, 1);
        assert!(stats.converged_early);
        assert_eq!(stats.final_term_norm, Some(0.0));
        assert_eq!(out, a);
    }

    #[test]
    fn fixed_order_runs_every_iteration() {
        let a = diag(&[1.0, 3.0]);
        let mut out = Matrix::new(2).unwrap();
        let stats = NeumannInverse::new(ReferenceBackend, 6).invert(&a, &mut out).unwrap();
        assert_eq!(stats.iterations, 5);
        assert!(!stats.converged_early);
        assert_eq!(stats.final_term_norm, None);
    }

    #[test]
    fn residual_shrinks_with_order() {
        let a = diag(&[1.0, 2.0, 3.0]);
        let lo = invert_approx_with(ReferenceBackend, &a, 4).unwrap();
        let hi = invert_approx_with(ReferenceBackend, &a, 40).unwrap();
        let r_lo = residual_norm(&ReferenceBackend, &a, &lo).unwrap();
        let r_hi = residual_norm(&ReferenceBackend, &a, &hi).unwrap();
        assert!(r_hi < r_lo);
        assert!(r_hi < 1e-1);
    }
}
