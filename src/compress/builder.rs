//! trait for compression matrix construction

use num_traits::float::Float;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::dct::DctBuilder;
use super::filters::{AverageBuilder, EdgeBuilder};
use super::gaussmat::GaussianBuilder;
use super::sparse::SparseRandomBuilder;

/// A MatrixBuilder fills a (param_dim, input_dim) matrix with one family of projection.
/// Dimensions are read from the shape of the matrix to fill.
///
/// Deterministic builders do not consume the random generator.
pub trait MatrixBuilder {
    /// name used in logs
    fn name(&self) -> &'static str;

    /// fills all entries of cm, whatever its previous content
    fn fill<T, R>(&self, cm: &mut Array2<T>, rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized;

    /// allocates and fills a (param_dim, input_dim) matrix
    fn build<T, R>(&self, input_dim: usize, param_dim: usize, rng: &mut R) -> Array2<T>
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let mut cm = Array2::<T>::zeros((param_dim, input_dim));
        self.fill(&mut cm, rng);
        cm
    }
} // end of trait MatrixBuilder

//==============================================================================

/// The builder chosen by a factory. Each variant keeps its own parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Dct(DctBuilder),
    Gaussian(GaussianBuilder),
    SparseRandom(SparseRandomBuilder),
    Average(AverageBuilder),
    Edge(EdgeBuilder),
}

impl MatrixBuilder for Projection {
    fn name(&self) -> &'static str {
        match self {
            Projection::Dct(b) => b.name(),
            Projection::Gaussian(b) => b.name(),
            Projection::SparseRandom(b) => b.name(),
            Projection::Average(b) => b.name(),
            Projection::Edge(b) => b.name(),
        }
    }

    fn fill<T, R>(&self, cm: &mut Array2<T>, rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        match self {
            Projection::Dct(b) => b.fill(cm, rng),
            Projection::Gaussian(b) => b.fill(cm, rng),
            Projection::SparseRandom(b) => b.fill(cm, rng),
            Projection::Average(b) => b.fill(cm, rng),
            Projection::Edge(b) => b.fill(cm, rng),
        }
    }
} // end of impl MatrixBuilder for Projection
