//! Activation functions for neural networks
//!
//! Each activation comes with a derivative expressed in terms of the activation's own
//! output `y = f(x)`, which is the value the network keeps around after a forward pass:
//! - Sigmoid: `y * (1 - y)`
//! - ReLU: `1` when `y > 0`, otherwise `0`
//! - Tanh: `1 - y^2`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming y = sigmoid(x).
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// ReLU activation function.
pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// ReLU derivative assuming y = relu(x).
pub fn relu_derivative(y: f64) -> f64 {
    if y > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Hyperbolic tangent activation function.
pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// Tanh derivative assuming y = tanh(x).
pub fn tanh_derivative(y: f64) -> f64 {
    1.0 - y * y
}

/// Activation selected per network instance.
///
/// Serialized with lowercase names so training configs can say `"activation": "tanh"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Sigmoid,
    Relu,
    Tanh,
}

impl Activation {
    /// All supported activations, in declaration order.
    pub const ALL: [Activation; 3] = [Activation::Sigmoid, Activation::Relu, Activation::Tanh];

    /// Apply the activation to a pre-activation sum.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Relu => relu(x),
            Activation::Tanh => tanh(x),
        }
    }

    /// Derivative evaluated at the activation's output `y`, not at the raw sum.
    pub fn derivative(self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid_derivative(y),
            Activation::Relu => relu_derivative(y),
            Activation::Tanh => tanh_derivative(y),
        }
    }

    /// Lowercase name, matching the config representation.
    pub fn name(self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no supported activation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activation '{0}', expected one of: sigmoid, relu, tanh")]
pub struct UnknownActivation(pub String);

impl FromStr for Activation {
    type Err = UnknownActivation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Activation::ALL
            .into_iter()
            .find(|activation| activation.name() == lowered)
            .ok_or_else(|| UnknownActivation(s.to_string()))
    }
}
