//! Configuration: backend selection and inversion parameters.

pub mod options;
pub use options::{BackendKind, InvOptions};
