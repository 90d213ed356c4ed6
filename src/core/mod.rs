//! Core traits and kernels shared by every backend.

pub mod kernels;
pub mod traits;
pub use traits::{Backend, Scalar};
