//! deterministic local filters : block averaging and first difference (edge detector) along the input ordering.

use num_traits::float::Float;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::builder::MatrixBuilder;

/// Returns the column range [start, end) averaged by row `row`.
///
/// For param_dim <= input_dim the ranges partition [0, input_dim) in contiguous blocks whose sizes differ by at most one.
/// For param_dim > input_dim each row gets the single column floor(row * input_dim / param_dim).
pub fn average_block(row: usize, input_dim: usize, param_dim: usize) -> (usize, usize) {
    assert!(row < param_dim);
    let start = row * input_dim / param_dim;
    let end = ((row + 1) * input_dim / param_dim).max(start + 1);
    (start, end)
}

/// Each output coordinate is the mean of one contiguous block of inputs, see [average_block].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AverageBuilder;

impl MatrixBuilder for AverageBuilder {
    fn name(&self) -> &'static str {
        "average"
    }

    fn fill<T, R>(&self, cm: &mut Array2<T>, _rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let (param_dim, input_dim) = cm.dim();
        if param_dim > input_dim {
            log::warn!(
                "average with param_dim {} > input_dim {}, blocks are reduced to one column and overlap",
                param_dim,
                input_dim
            );
        }
        cm.fill(T::zero());
        for (i, mut row) in cm.rows_mut().into_iter().enumerate() {
            let (start, end) = average_block(i, input_dim, param_dim);
            let w = T::one() / T::from(end - start).unwrap();
            for j in start..end {
                row[j] = w;
            }
        }
    } // end of fill
} // end of impl MatrixBuilder for AverageBuilder

//==============================================================================

/// First difference : row i has +1 at column k and -1 at column k+1 with k = i mod (input_dim - 1).
/// For param_dim < input_dim this is k = i, the usual difference operator. Every row sums to 0.
///
/// With input_dim = 1 there is no difference to take and the matrix is null.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EdgeBuilder;

impl MatrixBuilder for EdgeBuilder {
    fn name(&self) -> &'static str {
        "edge"
    }

    fn fill<T, R>(&self, cm: &mut Array2<T>, _rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let (param_dim, input_dim) = cm.dim();
        cm.fill(T::zero());
        if input_dim < 2 {
            log::warn!("edge filter needs input_dim >= 2, got {}, matrix is null", input_dim);
            return;
        }
        if param_dim >= input_dim {
            log::warn!(
                "edge with param_dim {} >= input_dim {}, differences are repeated",
                param_dim,
                input_dim
            );
        }
        for i in 0..param_dim {
            let k = i % (input_dim - 1);
            cm[[i, k]] = T::one();
            cm[[i, k + 1]] = -T::one();
        }
    } // end of fill
} // end of impl MatrixBuilder for EdgeBuilder

//========================================================
