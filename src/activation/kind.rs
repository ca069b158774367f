//! selection of the transfer function of a layer by name or numeric code

use std::fmt;
use std::str::FromStr;

use num_traits::float::Float;

use ndarray::{ArrayBase, Data, DataMut, Ix2};
use serde::{Deserialize, Serialize};

use super::functions::*;

/// Transfer functions a layer can be configured with.
/// The numeric codes are stable and used in layer configurations.
///
/// Softmax is not in this list as it is row-wise and only used for output layers with a cross entropy error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Logistic = 0,
    Tanh = 1,
    ScaledTanh = 2,
    Rectifier = 3,
    Linear = 4,
}

impl ActivationFunction {
    /// numeric code of the function
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Logistic => "logistic",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ScaledTanh => "scaled_tanh",
            ActivationFunction::Rectifier => "rectifier",
            ActivationFunction::Linear => "linear",
        }
    }
} // end of impl ActivationFunction

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logistic" | "sigmoid" => Ok(ActivationFunction::Logistic),
            "tanh" | "normaltanh" => Ok(ActivationFunction::Tanh),
            "scaled_tanh" | "scaledtanh" | "tanh_scaled" => Ok(ActivationFunction::ScaledTanh),
            "rectifier" | "relu" => Ok(ActivationFunction::Rectifier),
            "linear" => Ok(ActivationFunction::Linear),
            _ => Err(anyhow::anyhow!("unknown activation function : {:?}", s)),
        }
    }
}

impl TryFrom<u32> for ActivationFunction {
    type Error = anyhow::Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ActivationFunction::Logistic),
            1 => Ok(ActivationFunction::Tanh),
            2 => Ok(ActivationFunction::ScaledTanh),
            3 => Ok(ActivationFunction::Rectifier),
            4 => Ok(ActivationFunction::Linear),
            _ => Err(anyhow::anyhow!("unknown activation function code : {}", code)),
        }
    }
}

//==============================================================================

/// forward pass of act : z = act(a)
pub fn activation_function<T, S1, S2>(
    act: ActivationFunction,
    a: &ArrayBase<S1, Ix2>,
    z: &mut ArrayBase<S2, Ix2>,
) where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    match act {
        ActivationFunction::Logistic => logistic(a, z),
        ActivationFunction::Tanh => normaltanh(a, z),
        ActivationFunction::ScaledTanh => scaledtanh(a, z),
        ActivationFunction::Rectifier => rectifier(a, z),
        ActivationFunction::Linear => linear(a, z),
    }
}

/// backward pass of act. **z must be the output of [activation_function]**, not the pre-activation.
pub fn activation_function_derivative<T, S1, S2>(
    act: ActivationFunction,
    z: &ArrayBase<S1, Ix2>,
    gd: &mut ArrayBase<S2, Ix2>,
) where
    T: Float,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    match act {
        ActivationFunction::Logistic => logistic_derivative(z, gd),
        ActivationFunction::Tanh => normaltanh_derivative(z, gd),
        ActivationFunction::ScaledTanh => scaledtanh_derivative(z, gd),
        ActivationFunction::Rectifier => rectifier_derivative(z, gd),
        ActivationFunction::Linear => {
            assert_eq!(
                z.dim(),
                gd.dim(),
                "linear_derivative : shape mismatch, input is {:?} output is {:?}",
                z.dim(),
                gd.dim()
            );
            linear_derivative(gd)
        }
    }
} // end of activation_function_derivative

//========================================================

// end of mod tests
