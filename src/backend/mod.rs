//! Compute backends implementing [`Backend`](crate::core::traits::Backend).
//!
//! - [`ReferenceBackend`]: hand-written triple loop, single-threaded.
//! - [`FaerBackend`]: faer GEMM for the multiply, rayon for elementwise updates.
//!
//! The inversion routine is generic over the trait, so swapping backends never changes
//! the algorithm, only how its four primitives are computed.

pub mod faer_gemm;
pub mod reference;

pub use faer_gemm::FaerBackend;
pub use reference::ReferenceBackend;
