//! compression by the first coefficients of a discrete cosine transform.
//! Smooth signals (images, weights of neighbouring units) concentrate their energy in low frequencies,
//! so keeping the param_dim first DCT-II coefficients is a deterministic compression.

use std::f64::consts::PI;

use num_traits::float::Float;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::builder::MatrixBuilder;

#[cfg_attr(doc, katexit::katexit)]
/// Rows are the orthonormal DCT-II basis vectors :
/// $$ \Phi_{ij} = c_i \cos \left( \frac{\pi}{n} (j + \frac{1}{2}) i \right) $$
/// with $c_0 = \sqrt{1/n}$ and $c_i = \sqrt{2/n}$ for $i > 0$, n being the input dimension.
///
/// For param_dim <= input_dim the rows are orthonormal, so the transpose reconstructs the projection of
/// the input on the retained frequencies.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DctBuilder;

impl MatrixBuilder for DctBuilder {
    fn name(&self) -> &'static str {
        "dct"
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
                "dct with param_dim {} > input_dim {}, rows beyond input_dim are not orthogonal",
                param_dim,
                input_dim
            );
        }
        let n = input_dim as f64;
        let c0 = (1. / n).sqrt();
        let c = (2. / n).sqrt();
        for ((i, j), x) in cm.indexed_iter_mut() {
            let scale = if i == 0 { c0 } else { c };
            let v = scale * (PI / n * (j as f64 + 0.5) * i as f64).cos();
            *x = T::from(v).unwrap();
        }
    } // end of fill
} // end of impl MatrixBuilder for DctBuilder

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array1;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn check_orthonormal_rows(mat: &Array2<f64>) {
        let gram = mat.dot(&mat.t());
        let epsil = 1.0e-10;
        for i in 0..gram.nrows() {
            for j in 0..gram.ncols() {
                let expected = if i == j { 1. } else { 0. };
                if (gram[[i, j]] - expected).abs() > epsil {
                    log::error!(" i : {} , j : {} , val : {:?}", i, j, gram[[i, j]]);
                }
                assert!((gram[[i, j]] - expected).abs() <= epsil);
            }
        }
    }

    #[test]
    fn check_dct_orthonormality() {
        log_init_test();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(234567_u64);
        let phi: Array2<f64> = DctBuilder.build(64, 16, &mut rng);
        assert_eq!(phi.dim(), (16, 64));
        check_orthonormal_rows(&phi);
        // square case is an orthogonal matrix
        let phi: Array2<f64> = DctBuilder.build(33, 33, &mut rng);
        check_orthonormal_rows(&phi);
        check_orthonormal_rows(&phi.t().to_owned());
    }

    #[test]
    fn check_dct_constant_signal() {
        log_init_test();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1_u64);
        let n = 50;
        let phi: Array2<f64> = DctBuilder.build(n, 10, &mut rng);
        let x = Array1::<f64>::from_elem(n, 2.);
        let y = phi.dot(&x);
        // all energy in the DC coefficient
        assert!((y[0] - 2. * (n as f64).sqrt()).abs() < 1.0e-10);
        assert!(y.iter().skip(1).all(|v| v.abs() < 1.0e-10));
    }

    #[test]
    fn check_dct_deterministic() {
        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(1_u64);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(2_u64);
        let phi1: Array2<f32> = DctBuilder.build(20, 5, &mut rng1);
        let phi2: Array2<f32> = DctBuilder.build(20, 5, &mut rng2);
        assert_eq!(phi1, phi2);
    }
}
