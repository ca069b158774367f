//! Factory of compression matrices.
//!
//! A factory is configured once with the dimensions and the kind of transformation,
//! then produces a (param_dim, input_dim) matrix drawn with a caller supplied random generator.
//! Seeding the generator is the caller's job, the factory never uses a global random source.

use std::fmt;
use std::str::FromStr;

use num_traits::float::Float;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::builder::{MatrixBuilder, Projection};
use super::dct::DctBuilder;
use super::filters::{AverageBuilder, EdgeBuilder};
use super::gaussmat::GaussianBuilder;
use super::reducer::CompressionMatrix;
use super::sparse::SparseRandomBuilder;

/// The families of compression matrices
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transformation {
    /// first coefficients of an orthonormal discrete cosine transform
    #[default]
    Dct,
    /// dense N(0, 1/param_dim) entries
    Gaussian,
    /// Achlioptas sparse ternary entries
    SparseRandom,
    /// mean over contiguous blocks of inputs
    Average,
    /// first difference of adjacent inputs
    Edge,
}

impl Transformation {
    pub fn name(&self) -> &'static str {
        match self {
            Transformation::Dct => "dct",
            Transformation::Gaussian => "gaussian",
            Transformation::SparseRandom => "sparse_random",
            Transformation::Average => "average",
            Transformation::Edge => "edge",
        }
    }

    /// true if the matrix depends on the random generator
    pub fn is_random(&self) -> bool {
        matches!(self, Transformation::Gaussian | Transformation::SparseRandom)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Transformation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dct" => Ok(Transformation::Dct),
            "gaussian" | "gauss" => Ok(Transformation::Gaussian),
            "sparse_random" | "sparse" => Ok(Transformation::SparseRandom),
            "average" => Ok(Transformation::Average),
            "edge" => Ok(Transformation::Edge),
            _ => Err(anyhow::anyhow!("unknown transformation : {:?}", s)),
        }
    }
}

//==============================================================================

fn default_compress() -> bool {
    true
}

/// configuration of a [CompressionMatrixFactory]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// dimension of the vector to compress (number of columns)
    pub input_dim: usize,
    /// compressed dimension (number of rows)
    pub param_dim: usize,
    #[serde(default)]
    pub transformation: Transformation,
    /// Φ·x if true, Φᵀ·y if false
    #[serde(default = "default_compress")]
    pub compress: bool,
    /// only used by sparse random projections, defaults to Achlioptas value 3.
    #[serde(default)]
    pub sparsity: Option<f64>,
}

impl CompressionConfig {
    pub fn new(input_dim: usize, param_dim: usize, transformation: Transformation) -> Self {
        CompressionConfig {
            input_dim,
            param_dim,
            transformation,
            compress: true,
            sparsity: None,
        }
    }

    /// checks dimensions and sparsity, returns the builder realizing the transformation
    fn validate(&self) -> anyhow::Result<Projection> {
        if self.input_dim == 0 {
            anyhow::bail!("input dimension must be positive");
        }
        if self.param_dim == 0 {
            anyhow::bail!("param dimension must be positive");
        }
        if self.sparsity.is_some() && self.transformation != Transformation::SparseRandom {
            log::warn!("sparsity is ignored by transformation {}", self.transformation);
        }
        let projection = match self.transformation {
            Transformation::Dct => Projection::Dct(DctBuilder),
            Transformation::Gaussian => Projection::Gaussian(GaussianBuilder),
            Transformation::SparseRandom => match self.sparsity {
                Some(sparsity) => Projection::SparseRandom(SparseRandomBuilder::new(sparsity)?),
                None => Projection::SparseRandom(SparseRandomBuilder::default()),
            },
            Transformation::Average => Projection::Average(AverageBuilder),
            Transformation::Edge => Projection::Edge(EdgeBuilder),
        };
        Ok(projection)
    } // end of validate
} // end of impl CompressionConfig

//==============================================================================

/// Creates compression matrices Φ of shape (param_dim, input_dim).
///
/// A compression matrix can either compress a data vector (Φ·x) or the parameters of a learner,
/// whose input_dim weights are then expressed as Φᵀ·α from param_dim coefficients α.
///
/// ```
/// use annbase::compress::{CompressionMatrixFactory, Transformation};
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
///
/// let factory = CompressionMatrixFactory::new(784, 64, Transformation::SparseRandom).unwrap();
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(4567_u64);
/// let phi = factory.create_compression_matrix::<f64, _>(&mut rng);
/// assert_eq!(phi.dim(), (64, 784));
/// ```
#[derive(Debug, Clone)]
pub struct CompressionMatrixFactory {
    config: CompressionConfig,
    //
    projection: Projection,
}

impl CompressionMatrixFactory {
    /// factory producing matrices used as Φ·x. Fails on null dimensions.
    pub fn new(
        input_dim: usize,
        param_dim: usize,
        transformation: Transformation,
    ) -> anyhow::Result<Self> {
        Self::from_config(CompressionConfig::new(input_dim, param_dim, transformation))
    }

    pub fn from_config(config: CompressionConfig) -> anyhow::Result<Self> {
        let projection = config.validate()?;
        log::debug!(
            "compression factory : input_dim {}, param_dim {}, transformation {}, compress {}",
            config.input_dim,
            config.param_dim,
            config.transformation,
            config.compress
        );
        if config.param_dim > config.input_dim {
            log::info!(
                "param_dim {} > input_dim {}, matrix expands dimension",
                config.param_dim,
                config.input_dim
            );
        }
        Ok(CompressionMatrixFactory { config, projection })
    }

    /// set sparsity of a sparse random projection. Fails if sparsity < 1.
    pub fn with_sparsity(self, sparsity: f64) -> anyhow::Result<Self> {
        let mut config = self.config;
        config.sparsity = Some(sparsity);
        Self::from_config(config)
    }

    /// set orientation of the produced [CompressionMatrix]
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.config.compress = compress;
        self
    }

    pub fn get_config(&self) -> &CompressionConfig {
        &self.config
    }

    pub fn get_input_dim(&self) -> usize {
        self.config.input_dim
    }

    pub fn get_param_dim(&self) -> usize {
        self.config.param_dim
    }

    pub fn get_transformation(&self) -> Transformation {
        self.config.transformation
    }

    pub fn is_compress(&self) -> bool {
        self.config.compress
    }

    /// the builder selected at construction
    pub fn get_projection(&self) -> &Projection {
        &self.projection
    }

    /// allocates and fills a (param_dim, input_dim) matrix.
    /// Each call on a random transformation is a new independent draw from rng.
    pub fn create_compression_matrix<T, R>(&self, rng: &mut R) -> Array2<T>
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let mut cm = Array2::<T>::zeros((self.config.param_dim, self.config.input_dim));
        self.fill_compression_matrix(&mut cm, rng);
        cm
    }

    /// fills a caller allocated matrix which must have shape (param_dim, input_dim)
    pub fn fill_compression_matrix<T, R>(&self, cm: &mut Array2<T>, rng: &mut R)
    where
        T: Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        assert_eq!(
            cm.dim(),
            (self.config.param_dim, self.config.input_dim),
            "fill_compression_matrix : matrix has shape {:?}, expected (param_dim, input_dim) = {:?}",
            cm.dim(),
            (self.config.param_dim, self.config.input_dim)
        );
        log::info!(
            "building {} compression matrix ({}, {})",
            self.projection.name(),
            self.config.param_dim,
            self.config.input_dim
        );
        self.projection.fill(cm, rng);
    }

    /// builds Φ and wraps it with the configured orientation
    pub fn compression_matrix<T, R>(&self, rng: &mut R) -> CompressionMatrix<T>
    where
        T: 'static + Float,
        StandardNormal: Distribution<T>,
        R: Rng + ?Sized,
    {
        let phi = self.create_compression_matrix(rng);
        CompressionMatrix::new(phi, self.config.transformation, self.config.compress)
    }
} // end of impl CompressionMatrixFactory

//========================================================
