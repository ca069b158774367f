//! Compares the compression matrices on synthetic smooth signals of dimension 784 (the size of a mnist image)
//! reduced to 64 coordinates. For each transformation we report the time to build the matrix and
//! compress the data, and the quantiles of the norm ratio |Φx| / |x|.
//!
//! The compressed vectors are then fed to a logistic layer and a softmax to show the activation functions
//! on the reduced data.
//!
//! run with : RUST_LOG=info cargo run --release --example projection

use cpu_time::ProcessTime;
use std::time::{Duration, SystemTime};

use ndarray::{Array1, Array2};
use quantiles::ckms::CKMS;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

use annbase::activation::*;
use annbase::compress::*;

const INPUT_DIM: usize = 784;
const PARAM_DIM: usize = 64;
const NB_SAMPLES: usize = 2000;

// random walks smoothed by a moving average, so that low frequencies dominate
fn generate_signals(rng: &mut Xoshiro256PlusPlus) -> Vec<Vec<f64>> {
    let step = Normal::<f64>::new(0., 1.).unwrap();
    (0..NB_SAMPLES)
        .map(|_| {
            let mut walk = Vec::<f64>::with_capacity(INPUT_DIM);
            let mut x = 0.;
            for _ in 0..INPUT_DIM {
                x += step.sample(rng);
                walk.push(x);
            }
            (0..INPUT_DIM)
                .map(|i| {
                    let (lo, hi) = (i.saturating_sub(4), (i + 5).min(INPUT_DIM));
                    walk[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
                })
                .collect()
        })
        .collect()
}

fn norm(v: &[f64]) -> f64 {
    v.iter().fold(0., |acc, x| acc + x * x).sqrt()
}

pub fn main() {
    annbase::log_init();
    //
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(234567_u64);
    let signals = generate_signals(&mut rng);
    let signals_ref: Vec<&Vec<f64>> = signals.iter().collect();
    //
    let transformations = [
        Transformation::Dct,
        Transformation::Gaussian,
        Transformation::SparseRandom,
        Transformation::Average,
        Transformation::Edge,
    ];
    for transformation in transformations {
        let cpu_start = ProcessTime::now();
        let sys_now = SystemTime::now();
        //
        let factory = match CompressionMatrixFactory::new(INPUT_DIM, PARAM_DIM, transformation) {
            Ok(factory) => factory,
            Err(e) => {
                println!("could not create factory : {:?}", e);
                return;
            }
        };
        let cm = factory.compression_matrix::<f64, _>(&mut rng);
        let reduced = cm.reduce(&signals_ref);
        let cpu_time: Duration = cpu_start.elapsed();
        //
        let mut ckms = CKMS::<f64>::new(0.001);
        for (x, y) in signals.iter().zip(reduced.iter()) {
            ckms.insert(norm(y) / norm(x));
        }
        let nb_zero = cm.get_matrix().iter().filter(|x| **x == 0.).count();
        println!("\n transformation : {}", transformation);
        println!(
            "  matrix density : {:.3e}",
            1. - nb_zero as f64 / cm.get_matrix().len() as f64
        );
        println!(
            "  norm ratio quantiles 0.05 : {:.3e}, 0.5 : {:.3e}, 0.95 : {:.3e}",
            ckms.query(0.05).unwrap().1,
            ckms.query(0.5).unwrap().1,
            ckms.query(0.95).unwrap().1
        );
        println!(
            "  sys time(ms) {:?} cpu time(ms) {:?}",
            sys_now.elapsed().unwrap().as_millis(),
            cpu_time.as_millis()
        );
        //
        // a batch of reduced samples through a logistic layer then softmax
        let batch: Vec<Array1<f64>> = reduced.iter().take(8).map(|v| Array1::from(v.clone())).collect();
        let mut a = Array2::<f64>::zeros((batch.len(), PARAM_DIM));
        for (i, v) in batch.iter().enumerate() {
            a.row_mut(i).assign(v);
        }
        let mut z = Array2::<f64>::zeros(a.dim());
        activation_function(ActivationFunction::Logistic, &a, &mut z);
        let mut gd = Array2::<f64>::zeros(a.dim());
        activation_function_derivative(ActivationFunction::Logistic, &z, &mut gd);
        softmax(&mut a);
        println!(
            "  logistic mean : {:.3e}, derivative max : {:.3e}, softmax row 0 sum : {:.3e}",
            z.mean().unwrap(),
            gd.fold(0., |acc: f64, x| acc.max(*x)),
            a.row(0).sum()
        );
    }
}
