//! module for compression matrices
//!
//! A compression matrix Φ of shape (param_dim, input_dim) compresses an input vector (Φ·x) or the parameters
//! of a learner (weights are Φᵀ·α). The factory module selects one of the builders :
//!
//! - dct : deterministic, orthonormal cosine basis. Best for smooth inputs.
//! - gaussmat : dense gaussian random projection (Johnson-Lindenstrauss).
//! - sparse : Achlioptas sparse random projection. Same norm conservation as gaussmat, cheaper to apply.
//! - filters : block averaging and first difference along the input ordering.
//!
//! Random builders take the generator as argument so draws are reproducible by seeding it.
pub mod builder;
pub mod dct;
pub mod factory;
pub mod filters;
pub mod gaussmat;
pub mod reducer;
pub mod sparse;

pub use builder::{MatrixBuilder, Projection};
pub use factory::{CompressionConfig, CompressionMatrixFactory, Transformation};
pub use reducer::{CompressionMatrix, Reducer};
