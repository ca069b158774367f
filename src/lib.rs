//! Numerical building blocks of neural network layers and learners :
//!
//! - [activation] : transfer functions (logistic, tanh, scaled tanh, rectifier, linear, softmax) and their derivatives.
//! - [compress] : factory of compression matrices (dct, gaussian, sparse random, average, edge)
//!   used to reduce the dimension of inputs or parameters.

use lazy_static::lazy_static;

lazy_static! {
    static ref LOG: u64 = init_log();
}

// install a logger facility
fn init_log() -> u64 {
    let _res = env_logger::try_init();
    println!("\n ************** initializing logger *****************\n");
    1
}

/// installs env_logger once, for programs not setting their own logger
pub fn log_init() {
    lazy_static::initialize(&LOG);
}

pub mod activation;
pub mod compress;
