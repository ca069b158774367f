//! sparse random projection, based on :
//!
//! - Database-friendly random projections. Achlioptas 2001
//! - Very sparse random projections. Li, Hastie, Church 2006
//!
//! Most entries are 0 so applying the matrix costs a fraction of a dense gaussian projection,
//! with the same norm conservation in expectation.

use num_traits::float::Float;

use ndarray::Array2;
use rand::distr::StandardUniform;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::builder::MatrixBuilder;

/// sparsity used by Achlioptas : 2/3 of entries are 0
pub const ACHLIOPTAS_SPARSITY: f64 = 3.;

#[cfg_attr(doc, katexit::katexit)]
/// With sparsity $d \ge 1$ and $p$ = param_dim, each entry is
/// $$ \sqrt{d/p} \times \begin{cases} +1 & \text{with probability } 1/(2d) \\\\ 0 & \text{with probability } 1 - 1/d \\\\ -1 & \text{with probability } 1/(2d) \end{cases} $$
/// so entries have variance $1/p$ as in [GaussianBuilder](super::gaussmat::GaussianBuilder).
///
/// d = 1 gives a dense Rademacher matrix, d = 3 is Achlioptas choice, $d = \sqrt{n}$ is the very sparse projection of Li et al.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SparseRandomBuilder {
    sparsity: f64,
}

impl SparseRandomBuilder {
    pub fn new(sparsity: f64) -> anyhow::Result<Self> {
        if !sparsity.is_finite() || sparsity < 1. {
            anyhow::bail!("sparsity must be finite and >= 1, got {}", sparsity);
        }
        Ok(SparseRandomBuilder { sparsity })
    }

    /// very sparse projection, sparsity is sqrt(input_dim)
    pub fn very_sparse(input_dim: usize) -> Self {
        SparseRandomBuilder {
            sparsity: (input_dim as f64).sqrt().max(1.),
        }
    }

    pub fn get_sparsity(&self) -> f64 {
        self.sparsity
    }

    /// expected fraction of non null entries
    pub fn get_density(&self) -> f64 {
        1. / self.sparsity
    }
} // end of impl SparseRandomBuilder

impl Default for SparseRandomBuilder {
    fn default() -> Self {
        SparseRandomBuilder {
            sparsity: ACHLIOPTAS_SPARSITY,
        }
    }
}

impl MatrixBuilder for SparseRandomBuilder {
    fn name(&self) -> &'static str {
        "sparse_random"
    }

    fn fill<T, R>(&self, cm: &mut Array2<T>, rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let half_density = 0.5 / self.sparsity;
        let s: T = T::from((self.sparsity / cm.nrows() as f64).sqrt()).unwrap();
        log::debug!(
            "sparse random projection, sparsity : {:.3e}, entry magnitude : {:.3e}",
            self.sparsity,
            s.to_f64().unwrap()
        );
        for x in cm.iter_mut() {
            let r: f64 = StandardUniform.sample(rng);
            *x = if r < half_density {
                s
            } else if r < 2. * half_density {
                -s
            } else {
                T::zero()
            };
        }
    } // end of fill
} // end of impl MatrixBuilder for SparseRandomBuilder

//========================================================
