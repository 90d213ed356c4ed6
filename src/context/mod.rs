//! Context module: run-time backend selection for inversion.
//!
//! - [`inv_context`]: `InvContext`, which builds a backend from `InvOptions` and runs
//!   the Neumann-series inversion on it.

pub mod inv_context;
pub use inv_context::InvContext;
