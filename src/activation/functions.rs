//! Transfer functions applied inside a layer forward pass, with the derivatives used in the backward pass.
//!
//! Each function reads a pre-activation matrix `a` and writes into a caller allocated matrix `z` of the same shape.
//! There is no resizing: a shape mismatch is a programming error and panics.
//!
//! The derivatives of logistic, tanh and rectifier are expressed in terms of the **output** `z` of the forward pass,
//! not the pre-activation. A caller must keep `z` around until the backward pass.

use num_traits::float::Float;

use ndarray::parallel::prelude::*;
use ndarray::{ArrayBase, Axis, Data, DataMut, Ix2, Zip};

// LeCun 1998, Efficient BackProp : f(x) = 1.7159 tanh(2x/3)
const SCALED_TANH_AMPLITUDE: f64 = 1.7159;
const SCALED_TANH_SLOPE: f64 = 2.0 / 3.0;

fn check_shape(op: &str, input: (usize, usize), output: (usize, usize)) {
    assert_eq!(
        input, output,
        "{} : shape mismatch, input is {:?} output is {:?}",
        op, input, output
    );
}

#[inline]
fn logistic_scalar<T: Float>(x: T) -> T {
    // exp is only evaluated on non positive arguments so it cannot overflow
    if x >= T::zero() {
        T::one() / (T::one() + (-x).exp())
    } else {
        let e = x.exp();
        e / (T::one() + e)
    }
}

#[cfg_attr(doc, katexit::katexit)]
/// Row-wise softmax, in place. Each row of `a` is one sample.
///
/// $$ a_{ij} \leftarrow \frac{\exp(a_{ij} - \max_k a_{ik})}{\sum_l \exp(a_{il} - \max_k a_{ik})} $$
///
/// The row maximum is subtracted before exponentiation, so large pre-activations do not overflow.
/// After the call every row sums to 1 and all entries are in [0,1]. Rows are processed in parallel.
pub fn softmax<T, S>(a: &mut ArrayBase<S, Ix2>)
where
    T: Float + Send + Sync,
    S: DataMut<Elem = T>,
{
    a.axis_iter_mut(Axis(0)).into_par_iter().for_each(|mut row| {
        let max = row.fold(T::neg_infinity(), |acc, x| acc.max(*x));
        row.mapv_inplace(|x| (x - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|x| x / sum);
    });
} // end of softmax

/// z = 1/(1+exp(-a))
pub fn logistic<T, S1, S2>(a: &ArrayBase<S1, Ix2>, z: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("logistic", a.dim(), z.dim());
    Zip::from(z).and(a).for_each(|z, &a| *z = logistic_scalar(a));
}

/// gd = z * (1-z), where z is the result of [logistic]. Values are in [0, 0.25].
pub fn logistic_derivative<T, S1, S2>(z: &ArrayBase<S1, Ix2>, gd: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("logistic_derivative", z.dim(), gd.dim());
    Zip::from(gd)
        .and(z)
        .for_each(|gd, &z| *gd = z * (T::one() - z));
}

/// z = tanh(a), values in (-1,1)
pub fn normaltanh<T, S1, S2>(a: &ArrayBase<S1, Ix2>, z: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("normaltanh", a.dim(), z.dim());
    Zip::from(z).and(a).for_each(|z, &a| *z = a.tanh());
}

/// gd = 1 - z², where z is the result of [normaltanh]. Values are in [0,1].
pub fn normaltanh_derivative<T, S1, S2>(z: &ArrayBase<S1, Ix2>, gd: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("normaltanh_derivative", z.dim(), gd.dim());
    Zip::from(gd)
        .and(z)
        .for_each(|gd, &z| *gd = T::one() - z * z);
}

#[cfg_attr(doc, katexit::katexit)]
/// LeCun scaled tangent : $$ z = 1.7159 \tanh(\frac{2}{3} a) $$
/// so that f(1) ≈ 1 and f(-1) ≈ -1. Values are in (-1.7159, 1.7159).
pub fn scaledtanh<T, S1, S2>(a: &ArrayBase<S1, Ix2>, z: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("scaledtanh", a.dim(), z.dim());
    let amplitude = T::from(SCALED_TANH_AMPLITUDE).unwrap();
    let slope = T::from(SCALED_TANH_SLOPE).unwrap();
    Zip::from(z)
        .and(a)
        .for_each(|z, &a| *z = amplitude * (slope * a).tanh());
}

#[cfg_attr(doc, katexit::katexit)]
/// Derivative of [scaledtanh] from its output :
/// $$ gd = \frac{2/3}{1.7159} (1.7159 - z) (1.7159 + z) $$
pub fn scaledtanh_derivative<T, S1, S2>(z: &ArrayBase<S1, Ix2>, gd: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("scaledtanh_derivative", z.dim(), gd.dim());
    let amplitude = T::from(SCALED_TANH_AMPLITUDE).unwrap();
    let factor = T::from(SCALED_TANH_SLOPE / SCALED_TANH_AMPLITUDE).unwrap();
    Zip::from(gd)
        .and(z)
        .for_each(|gd, &z| *gd = factor * (amplitude - z) * (amplitude + z));
}

/// identity, z = a
pub fn linear<T, S1, S2>(a: &ArrayBase<S1, Ix2>, z: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("linear", a.dim(), z.dim());
    z.assign(a);
}

/// The derivative of the identity does not depend on the activation, so gd is just filled with 1.
pub fn linear_derivative<T, S>(gd: &mut ArrayBase<S, Ix2>)
where
    T: Float,
    S: DataMut<Elem = T>,
{
    gd.fill(T::one());
}

/// z = max(0, a)
pub fn rectifier<T, S1, S2>(a: &ArrayBase<S1, Ix2>, z: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("rectifier", a.dim(), z.dim());
    Zip::from(z).and(a).for_each(|z, &a| *z = a.max(T::zero()));
}

/// gd = 1 where z > 0, 0 elsewhere. Computed from the output of [rectifier], so the kink at 0 gets 0.
pub fn rectifier_derivative<T, S1, S2>(z: &ArrayBase<S1, Ix2>, gd: &mut ArrayBase<S2, Ix2>)
where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    check_shape("rectifier_derivative", z.dim(), gd.dim());
    Zip::from(gd).and(z).for_each(|gd, &z| {
        *gd = if z > T::zero() { T::one() } else { T::zero() };
    });
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array2;
    use rand::distr::{Distribution, Uniform};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // uniform in [-scale, scale] as a (rows, cols) matrix
    fn random_mat(rows: usize, cols: usize, scale: f64, seed: u64) -> Array2<f64> {
        let unif = Uniform::<f64>::new(-1., 1.).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Array2::from_shape_fn((rows, cols), |_| scale * unif.sample(&mut rng))
    }

    fn min_coeff(m: &Array2<f64>) -> f64 {
        m.fold(f64::INFINITY, |acc, x| acc.min(*x))
    }

    fn max_coeff(m: &Array2<f64>) -> f64 {
        m.fold(f64::NEG_INFINITY, |acc, x| acc.max(*x))
    }

    #[test]
    fn check_softmax() {
        log_init_test();
        let n = 1000;
        let mut a = random_mat(1, n, 1., 234567_u64);
        softmax(&mut a);
        log::info!("softmax sum : {:.5e}", a.sum());
        assert!((a.sum() - 1.).abs() < 1.0e-3);
        let (min, max) = (min_coeff(&a), max_coeff(&a));
        assert!((0. ..=1.).contains(&min));
        assert!((0. ..=1.).contains(&max));
        assert!(min <= max);
    }

    #[test]
    fn check_softmax_rows() {
        log_init_test();
        let mut a = random_mat(20, 7, 3., 4537_u64);
        softmax(&mut a);
        for row in a.rows() {
            assert!((row.sum() - 1.).abs() < 1.0e-10);
            assert!(row.iter().all(|x| (0. ..=1.).contains(x)));
        }
    }

    #[test]
    fn check_softmax_overflow() {
        log_init_test();
        // without max subtraction exp(1000.) is inf and we would get NaN
        let mut a = Array2::<f64>::from_shape_vec((2, 3), vec![1000., 999., 998., -1000., -1000., -1000.]).unwrap();
        softmax(&mut a);
        assert!(a.iter().all(|x| x.is_finite()));
        assert!((a.row(0).sum() - 1.).abs() < 1.0e-12);
        assert!(a[[0, 0]] > a[[0, 1]] && a[[0, 1]] > a[[0, 2]]);
        for j in 0..3 {
            assert!((a[[1, j]] - 1. / 3.).abs() < 1.0e-12);
        }
    }

    #[test]
    fn check_softmax_f32() {
        let mut a = Array2::<f32>::from_shape_vec((1, 4), vec![100., 200., 300., 400.]).unwrap();
        softmax(&mut a);
        assert!((a.sum() - 1.).abs() < 1.0e-5);
        assert!(a.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn check_logistic() {
        log_init_test();
        let n = 1000;
        let a = random_mat(n, 1, 10., 1789_u64);
        let mut z = Array2::<f64>::zeros((n, 1));
        logistic(&a, &mut z);
        assert!((0.0..=0.2).contains(&min_coeff(&z)));
        assert!((0.8..=1.0).contains(&max_coeff(&z)));
        //
        let mut gd = Array2::<f64>::zeros((n, 1));
        logistic_derivative(&z, &mut gd);
        assert!(min_coeff(&gd) >= 0.);
        assert!(max_coeff(&gd) <= 0.25);
    }

    #[test]
    fn check_logistic_saturation() {
        let a = Array2::<f64>::from_shape_vec((1, 5), vec![-1000., -50., 0., 50., 1000.]).unwrap();
        let mut z = Array2::<f64>::zeros((1, 5));
        logistic(&a, &mut z);
        assert!(z.iter().all(|x| x.is_finite()));
        assert!(z.iter().all(|x| (0. ..=1.).contains(x)));
        assert!(z[[0, 1]] > 0.);
        assert_eq!(z[[0, 2]], 0.5);
        assert_eq!(z[[0, 4]], 1.);
        // symmetry f(-x) = 1 - f(x)
        assert!((z[[0, 1]] + z[[0, 3]] - 1.).abs() < 1.0e-15);
    }

    #[test]
    fn check_normaltanh() {
        log_init_test();
        let n = 1000;
        let a = random_mat(n, 1, 10., 98765_u64);
        let mut z = Array2::<f64>::zeros((n, 1));
        normaltanh(&a, &mut z);
        assert!((-1.0..=-0.5).contains(&min_coeff(&z)));
        assert!((0.5..=1.0).contains(&max_coeff(&z)));
        //
        let mut gd = Array2::<f64>::zeros((n, 1));
        normaltanh_derivative(&z, &mut gd);
        assert!((0.0..=1.0).contains(&min_coeff(&gd)));
        assert!((0.0..=1.0).contains(&max_coeff(&gd)));
    }

    #[test]
    fn check_scaledtanh() {
        log_init_test();
        let n = 1000;
        let a = random_mat(1, n, 10., 5431_u64);
        let mut z = Array2::<f64>::zeros((1, n));
        scaledtanh(&a, &mut z);
        assert!(min_coeff(&z) >= -SCALED_TANH_AMPLITUDE);
        assert!(max_coeff(&z) <= SCALED_TANH_AMPLITUDE);
        assert!(max_coeff(&z) > 1.);
        // f(1) is close to 1
        let one = Array2::<f64>::ones((1, 1));
        let mut z1 = Array2::<f64>::zeros((1, 1));
        scaledtanh(&one, &mut z1);
        assert!((z1[[0, 0]] - 1.).abs() < 1.0e-3);
        //
        let mut gd = Array2::<f64>::zeros((1, n));
        scaledtanh_derivative(&z, &mut gd);
        assert!(min_coeff(&gd) >= 0.);
        // slope at 0 is 1.7159 * 2/3
        let zero = Array2::<f64>::zeros((1, 1));
        let mut gd0 = Array2::<f64>::zeros((1, 1));
        scaledtanh_derivative(&zero, &mut gd0);
        assert!((gd0[[0, 0]] - SCALED_TANH_AMPLITUDE * SCALED_TANH_SLOPE).abs() < 1.0e-12);
    }

    #[test]
    fn check_linear() {
        log_init_test();
        let n = 1000;
        let a = random_mat(n, 1, 10., 1111_u64);
        let mut z = Array2::<f64>::zeros((n, 1));
        linear(&a, &mut z);
        assert_eq!(min_coeff(&a), min_coeff(&z));
        assert_eq!(max_coeff(&a), max_coeff(&z));
        assert_eq!(a, z);
        //
        let mut gd = Array2::<f64>::zeros((n, 1));
        linear_derivative(&mut gd);
        assert_eq!(gd.sum(), n as f64);
    }

    #[test]
    fn check_rectifier() {
        log_init_test();
        let n = 1000;
        let a = random_mat(1, n, 10., 2222_u64);
        let mut z = Array2::<f64>::zeros((1, n));
        rectifier(&a, &mut z);
        assert_eq!(0., min_coeff(&z));
        assert_eq!(max_coeff(&a), max_coeff(&z));
        //
        let mut gd = Array2::<f64>::zeros((1, n));
        rectifier_derivative(&z, &mut gd);
        let nb_positive = z.iter().filter(|x| **x > 0.).count();
        assert_eq!(gd.sum(), nb_positive as f64);
        for (g, z) in gd.iter().zip(z.iter()) {
            assert_eq!(*g, if *z > 0. { 1. } else { 0. });
        }
    }

    #[test]
    fn check_rectifier_kink() {
        // the derivative at exactly 0 is 0
        let z = Array2::<f64>::zeros((2, 2));
        let mut gd = Array2::<f64>::ones((2, 2));
        rectifier_derivative(&z, &mut gd);
        assert_eq!(gd.sum(), 0.);
    }

    #[test]
    fn check_views() {
        // functions accept views, here we activate the second half of a batch
        let a = random_mat(4, 6, 2., 3333_u64);
        let mut z = Array2::<f64>::zeros((4, 6));
        logistic(&a.slice(ndarray::s![2.., ..]), &mut z.slice_mut(ndarray::s![2.., ..]));
        assert!(z.row(0).iter().all(|x| *x == 0.));
        assert!(z.row(3).iter().all(|x| *x > 0.));
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn check_shape_mismatch() {
        let a = Array2::<f64>::zeros((3, 2));
        let mut z = Array2::<f64>::zeros((2, 3));
        logistic(&a, &mut z);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn check_derivative_shape_mismatch() {
        let z = Array2::<f64>::zeros((1, 10));
        let mut gd = Array2::<f64>::zeros((1, 9));
        rectifier_derivative(&z, &mut gd);
    }
} // end of mod tests
