//! compression matrix made of a full gaussian random matrix.
//! Used when no structure of the data can be exploited (Johnson-Lindenstrauss random projection).

use num_traits::float::Float;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::builder::MatrixBuilder;

#[cfg_attr(doc, katexit::katexit)]
/// Dimension reduction using multiplication by a full $N(0, 1/p)$ matrix, p being param_dim.
///
/// With this scaling $E(||\Phi x||^2) = ||x||^2$, and the relative deviation of $||\Phi x||^2$ decreases as $\sqrt{2/p}$.
/// Nothing prevents param_dim > input_dim, the matrix is then an (approximate) isometric embedding.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GaussianBuilder;

impl MatrixBuilder for GaussianBuilder {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn fill<T, R>(&self, cm: &mut Array2<T>, rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let f: T = T::from(cm.nrows()).unwrap().sqrt();
        for x in cm.iter_mut() {
            let g: T = StandardNormal.sample(rng);
            *x = g / f;
        }
    }
} // end of impl MatrixBuilder for GaussianBuilder

//========================================================

// end of mod tests
