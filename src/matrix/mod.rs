//! Matrix module: the dense square matrix type.

pub mod dense;
pub use dense::Matrix;
