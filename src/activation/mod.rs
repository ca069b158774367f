//! module for layer transfer functions.
//!
//! functions module implements the forward transfer functions and their derivatives on matrices whose rows are samples.
//! kind module gathers them in an enum so that a layer can be configured by name or code.
//!
//! All functions are stateless and can be called concurrently on disjoint matrices.
pub mod functions;
pub mod kind;

pub use functions::*;
pub use kind::*;
