//! applying a compression matrix as a fixed linear operator

use num_traits::float::Float;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix1};
use serde::{Deserialize, Serialize};

use rayon::prelude::*;

use super::factory::Transformation;

/// trait for dimension reduction of a batch of samples
pub trait Reducer<T> {
    /// reduce dimension of data, returning reduced data
    fn reduce(&self, data: &[&Vec<T>]) -> Vec<Vec<T>>;
    /// same as reduce for ndarray vectors
    fn reduce_a(&self, data: &[&Array1<T>]) -> Vec<Array1<T>>;
}

//==============================================================================

/// A compression matrix Φ of shape (param_dim, input_dim) with the orientation it is meant to be used in.
///
/// - compress = true : Φ maps an input of dimension input_dim to param_dim (Φ·x), typically features of a sample.
/// - compress = false : Φ is used transposed, mapping param_dim compressed parameters to input_dim weights (Φᵀ·y).
///
/// The matrix is computed once and reused for every sample or parameter update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionMatrix<T> {
    transformation: Transformation,
    //
    compress: bool,
    //
    phi: Array2<T>,
}

impl<T> CompressionMatrix<T>
where
    T: 'static + Float,
{
    pub fn new(phi: Array2<T>, transformation: Transformation, compress: bool) -> Self {
        CompressionMatrix {
            transformation,
            compress,
            phi,
        }
    }

    /// returns Φ
    pub fn get_matrix(&self) -> &Array2<T> {
        &self.phi
    }

    /// gives back Φ to caller
    pub fn into_matrix(self) -> Array2<T> {
        self.phi
    }

    pub fn get_transformation(&self) -> Transformation {
        self.transformation
    }

    /// true if used as Φ·x, false if used as Φᵀ·y
    pub fn is_compress(&self) -> bool {
        self.compress
    }

    pub fn get_input_dim(&self) -> usize {
        self.phi.ncols()
    }

    pub fn get_param_dim(&self) -> usize {
        self.phi.nrows()
    }

    /// dimension of vectors accepted by [apply](Self::apply)
    pub fn get_from_dim(&self) -> usize {
        if self.compress { self.get_input_dim() } else { self.get_param_dim() }
    }

    /// dimension of vectors returned by [apply](Self::apply)
    pub fn get_to_dim(&self) -> usize {
        if self.compress { self.get_param_dim() } else { self.get_input_dim() }
    }

    /// Φ·x, x of dimension input_dim
    pub fn compress_vector<S: Data<Elem = T>>(&self, x: &ArrayBase<S, Ix1>) -> Array1<T> {
        assert_eq!(
            x.len(),
            self.get_input_dim(),
            "compress_vector : vector has dimension {}, matrix input dimension is {}",
            x.len(),
            self.get_input_dim()
        );
        self.phi.dot(x)
    }

    /// Φᵀ·y, y of dimension param_dim
    pub fn decompress_vector<S: Data<Elem = T>>(&self, y: &ArrayBase<S, Ix1>) -> Array1<T> {
        assert_eq!(
            y.len(),
            self.get_param_dim(),
            "decompress_vector : vector has dimension {}, matrix param dimension is {}",
            y.len(),
            self.get_param_dim()
        );
        self.phi.t().dot(y)
    }

    /// applies the matrix in its configured orientation
    pub fn apply<S: Data<Elem = T>>(&self, x: &ArrayBase<S, Ix1>) -> Array1<T> {
        if self.compress {
            self.compress_vector(x)
        } else {
            self.decompress_vector(x)
        }
    }
} // end of impl CompressionMatrix

impl<T> Reducer<T> for CompressionMatrix<T>
where
    T: 'static + Send + Sync + Float,
{
    fn reduce(&self, data: &[&Vec<T>]) -> Vec<Vec<T>> {
        //
        let reduce_item = |v: &Vec<T>| -> Vec<T> { self.apply(&ArrayView1::from(v.as_slice())).to_vec() };
        //
        data.par_iter().map(|item| reduce_item(item)).collect::<Vec<Vec<T>>>()
    }

    fn reduce_a(&self, data: &[&Array1<T>]) -> Vec<Array1<T>> {
        data.par_iter().map(|item| self.apply(*item)).collect::<Vec<Array1<T>>>()
    }
} // end of impl Reducer

//========================================================
