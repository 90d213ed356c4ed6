//! nsinv: approximate dense matrix inversion over faer
//!
//! This crate approximates the inverse of a square dense matrix with a scaled,
//! truncated Neumann series built only from matrix products, additions and scalar
//! scaling. The algorithm is written once against a small backend trait, with a
//! hand-written reference backend and a faer GEMM backend behind it.

pub mod backend;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use backend::*;
pub use config::*;
pub use context::*;
pub use crate::core::*;
pub use error::*;
pub use matrix::*;
pub use solver::*;
pub use utils::*;
