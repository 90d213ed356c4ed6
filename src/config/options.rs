//! Command-line or API options for approximate inversion.
//!
//! This module provides the `InvOptions` struct, which selects the compute backend,
//! the truncation order and the optional early-exit tolerance. Options can be built
//! in code or overlaid from `NSINV_*` environment variables.

use crate::error::InvError;
use std::str::FromStr;

/// Which compute backend runs the kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Hand-written triple loop
    Reference,
    /// faer GEMM
    Faer,
}

impl FromStr for BackendKind {
    type Err = InvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "ref" | "naive" => Ok(BackendKind::Reference),
            "faer" | "blas" | "optimized" => Ok(BackendKind::Faer),
            other => Err(InvError::UnknownBackend(other.to_string())),
        }
    }
}

/// Inversion parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InvOptions {
    /// Truncation order m (number of series terms)
    pub order: usize,

    /// Early-exit tolerance on the latest term; `None` runs all `order` terms
    pub tol: Option<f64>,

    /// Compute backend
    pub backend: BackendKind,

    /// Worker threads for the faer backend (0 = auto, 1 = sequential)
    pub threads: usize,
}

impl Default for InvOptions {
    fn default() -> Self {
        Self {
            order: 10,
            tol: None,
            backend: BackendKind::Faer,
            threads: default_threads(),
        }
    }
}

impl InvOptions {
    /// Defaults overlaid with `NSINV_ORDER`, `NSINV_TOL`, `NSINV_BACKEND` and
    /// `NSINV_THREADS`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(order) = lookup("NSINV_ORDER").and_then(|v| v.parse().ok()) {
            self.order = order;
        }
        if let Some(tol) = lookup("NSINV_TOL").and_then(|v| v.parse().ok()) {
            self.tol = Some(tol);
        }
        if let Some(backend) = lookup("NSINV_BACKEND").and_then(|v| v.parse().ok()) {
            self.backend = backend;
        }
        if let Some(threads) = lookup("NSINV_THREADS").and_then(|v| v.parse().ok()) {
            self.threads = threads;
        }
        self
    }
}

#[cfg(feature = "rayon")]
fn default_threads() -> usize {
    num_cpus::get()
}

#[cfg(not(feature = "rayon"))]
fn default_threads() -> usize {
    1
}
