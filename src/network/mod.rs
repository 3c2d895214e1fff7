//! Fully connected feedforward network
//!
//! [`Network`] owns one [`DenseLayer`] per transition between adjacent layers together with
//! the per-layer activation and delta buffers that the forward and backward passes fill in.
//!
//! The network is trained in place and is not meant to be shared: every call that touches
//! activations, deltas or momentum memory takes `&mut self`. Independent instances can be
//! trained on separate threads.

mod backward;
mod forward;

pub use backward::squared_error;

use crate::error::NetworkError;
use crate::layers::DenseLayer;
use crate::utils::{Activation, SimpleRng};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scalar hyperparameters fixed when a network is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub learning_rate: f64,
    pub momentum_factor: f64,
    #[serde(default)]
    pub activation: Activation,
}

impl Hyperparameters {
    pub fn new(learning_rate: f64, momentum_factor: f64, activation: Activation) -> Self {
        Self {
            learning_rate,
            momentum_factor,
            activation,
        }
    }
}

/// Multilayer perceptron trained by online backpropagation with momentum.
///
/// Layer `0` is the input layer and layer `depth() - 1` the output layer. Parameters for
/// layer `l >= 1` live in [`Network::layer`]`(l)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layer_sizes: Vec<usize>,
    layers: Vec<DenseLayer>,
    activations: Vec<Vec<f64>>,
    deltas: Vec<Vec<f64>>,
    hyperparameters: Hyperparameters,
}

impl Network {
    /// Build a network with weights drawn from `rng`.
    ///
    /// Fails with [`NetworkError::InvalidTopology`] if fewer than two layer sizes are given
    /// or any size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use online_mlp::network::{Hyperparameters, Network};
    /// use online_mlp::utils::{Activation, SimpleRng};
    ///
    /// let mut rng = SimpleRng::new(7);
    /// let hp = Hyperparameters::new(0.5, 0.4, Activation::Sigmoid);
    /// let network = Network::initialize(&[2, 3, 1], hp, &mut rng).unwrap();
    /// assert_eq!(network.depth(), 3);
    /// ```
    pub fn initialize<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        hyperparameters: Hyperparameters,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        validate_topology(layer_sizes)?;

        let layers = layer_sizes
            .windows(2)
            .map(|pair| DenseLayer::new(pair[0], pair[1], &mut *rng))
            .collect();

        Ok(Self::assemble(layer_sizes.to_vec(), layers, hyperparameters))
    }

    /// Build a network from a fixed seed, reproducing the same weights on every call.
    pub fn seeded(
        layer_sizes: &[usize],
        hyperparameters: Hyperparameters,
        seed: u64,
    ) -> Result<Self, NetworkError> {
        Self::initialize(layer_sizes, hyperparameters, &mut SimpleRng::new(seed))
    }

    /// Build a network from known parameters.
    ///
    /// `weights[l - 1]` and `biases[l - 1]` hold the parameters of layer `l`; their shapes
    /// must match `layer_sizes` exactly.
    pub fn from_parameters(
        layer_sizes: &[usize],
        weights: Vec<Vec<Vec<f64>>>,
        biases: Vec<Vec<f64>>,
        hyperparameters: Hyperparameters,
    ) -> Result<Self, NetworkError> {
        validate_topology(layer_sizes)?;

        let transitions = layer_sizes.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(NetworkError::InvalidTopology(format!(
                "{} layer sizes need {} weight matrices and bias vectors, got {} and {}",
                layer_sizes.len(),
                transitions,
                weights.len(),
                biases.len()
            )));
        }

        let mut layers = Vec::with_capacity(transitions);
        for (l, (layer_weights, layer_biases)) in weights.into_iter().zip(biases).enumerate() {
            let layer = DenseLayer::from_parts(layer_weights, layer_biases)?;
            let (expected_in, expected_out) = (layer_sizes[l], layer_sizes[l + 1]);
            if layer.input_size() != expected_in || layer.output_size() != expected_out {
                return Err(NetworkError::InvalidTopology(format!(
                    "layer {} weights are {}x{}, expected {}x{}",
                    l + 1,
                    layer.output_size(),
                    layer.input_size(),
                    expected_out,
                    expected_in
                )));
            }
            layers.push(layer);
        }

        Ok(Self::assemble(layer_sizes.to_vec(), layers, hyperparameters))
    }

    /// Build a network whose weights all equal `value`, with zero biases.
    pub fn with_constant_weights(
        layer_sizes: &[usize],
        value: f64,
        hyperparameters: Hyperparameters,
    ) -> Result<Self, NetworkError> {
        validate_topology(layer_sizes)?;

        let weights = layer_sizes
            .windows(2)
            .map(|pair| vec![vec![value; pair[0]]; pair[1]])
            .collect();
        let biases = layer_sizes[1..].iter().map(|&size| vec![0.0; size]).collect();
        Self::from_parameters(layer_sizes, weights, biases, hyperparameters)
    }

    fn assemble(
        layer_sizes: Vec<usize>,
        layers: Vec<DenseLayer>,
        hyperparameters: Hyperparameters,
    ) -> Self {
        let activations = layer_sizes.iter().map(|&size| vec![0.0; size]).collect();
        let deltas = layer_sizes[1..].iter().map(|&size| vec![0.0; size]).collect();
        Self {
            layer_sizes,
            layers,
            activations,
            deltas,
            hyperparameters,
        }
    }

    /// Widths of every layer, input first.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Number of layers, including input and output.
    pub fn depth(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }

    pub fn activation(&self) -> Activation {
        self.hyperparameters.activation
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(DenseLayer::parameter_count).sum()
    }

    /// Parameters feeding layer `l`.
    ///
    /// # Panics
    ///
    /// Panics if `l == 0` or `l >= depth()`; the input layer has no incoming parameters.
    pub fn layer(&self, l: usize) -> &DenseLayer {
        assert!(l > 0, "the input layer has no incoming weights");
        &self.layers[l - 1]
    }

    /// Parameters feeding layer `l`, or `None` for the input layer or past the output.
    pub fn get_layer(&self, l: usize) -> Option<&DenseLayer> {
        self.layers.get(l.checked_sub(1)?)
    }

    /// Activations of layer `l` from the last forward pass. Layer `0` is the last input.
    ///
    /// # Panics
    ///
    /// Panics if `l >= depth()`.
    pub fn activations(&self, l: usize) -> &[f64] {
        &self.activations[l]
    }

    pub fn get_activations(&self, l: usize) -> Option<&[f64]> {
        self.activations.get(l).map(Vec::as_slice)
    }

    /// Deltas of layer `l` from the last backward pass.
    ///
    /// # Panics
    ///
    /// Panics if `l == 0` or `l >= depth()`.
    pub fn deltas(&self, l: usize) -> &[f64] {
        assert!(l > 0, "the input layer has no deltas");
        &self.deltas[l - 1]
    }

    pub fn get_deltas(&self, l: usize) -> Option<&[f64]> {
        self.deltas.get(l.checked_sub(1)?).map(Vec::as_slice)
    }
}

fn validate_topology(layer_sizes: &[usize]) -> Result<(), NetworkError> {
    if layer_sizes.len() < 2 {
        return Err(NetworkError::InvalidTopology(format!(
            "need at least an input and an output layer, got {} layer(s)",
            layer_sizes.len()
        )));
    }
    if let Some(l) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(NetworkError::InvalidTopology(format!(
            "layer {} has no neurons",
            l
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp() -> Hyperparameters {
        Hyperparameters::new(0.5, 0.0, Activation::Sigmoid)
    }

    #[test]
    fn test_initialize_shapes() {
        let network = Network::seeded(&[4, 3, 2, 1], hp(), 1).unwrap();

        assert_eq!(network.depth(), 4);
        assert_eq!(network.input_size(), 4);
        assert_eq!(network.output_size(), 1);
        for l in 1..network.depth() {
            let layer = network.layer(l);
            assert_eq!(layer.output_size(), network.layer_sizes()[l]);
            assert_eq!(layer.input_size(), network.layer_sizes()[l - 1]);
            assert_eq!(network.activations(l).len(), network.layer_sizes()[l]);
            assert_eq!(network.deltas(l).len(), network.layer_sizes()[l]);
        }
        assert_eq!(network.parameter_count(), (4 * 3 + 3) + (3 * 2 + 2) + (2 + 1));
    }

    #[test]
    fn test_checked_accessors() {
        let network = Network::seeded(&[3, 2, 1], hp(), 1).unwrap();

        assert!(network.get_layer(0).is_none());
        assert_eq!(network.get_layer(2), Some(network.layer(2)));
        assert!(network.get_layer(3).is_none());

        assert_eq!(network.get_activations(0).map(<[f64]>::len), Some(3));
        assert!(network.get_activations(3).is_none());

        assert!(network.get_deltas(0).is_none());
        assert_eq!(network.get_deltas(1).map(<[f64]>::len), Some(2));
        assert!(network.get_deltas(3).is_none());
    }

    #[test]
    fn test_hyperparameters_serde() {
        let hp = Hyperparameters::new(0.1, 0.2, Activation::Tanh);
        let json = serde_json::to_string(&hp).unwrap();
        let parsed: Hyperparameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hp);

        let defaulted: Hyperparameters =
            serde_json::from_str(r#"{"learning_rate": 0.5, "momentum_factor": 0.4}"#).unwrap();
        assert_eq!(defaulted.activation, Activation::Sigmoid);
    }

    #[test]
    fn test_initialize_rejects_short_topology() {
        assert!(matches!(
            Network::seeded(&[3], hp(), 1),
            Err(NetworkError::InvalidTopology(_))
        ));
        assert!(matches!(
            Network::seeded(&[], hp(), 1),
            Err(NetworkError::InvalidTopology(_))
        ));
    }

    #[test]
    fn test_initialize_rejects_empty_layer() {
        assert!(matches!(
            Network::seeded(&[2, 0, 1], hp(), 1),
            Err(NetworkError::InvalidTopology(_))
        ));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = Network::seeded(&[3, 5, 2], hp(), 99).unwrap();
        let b = Network::seeded(&[3, 5, 2], hp(), 99).unwrap();
        let c = Network::seeded(&[3, 5, 2], hp(), 100).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.layer(1).weights(), c.layer(1).weights());
    }

    #[test]
    fn test_from_parameters_rejects_wrong_shape() {
        let result = Network::from_parameters(
            &[2, 1],
            vec![vec![vec![0.1, 0.2, 0.3]]],
            vec![vec![0.0]],
            hp(),
        );
        assert!(matches!(result, Err(NetworkError::InvalidTopology(_))));

        let result =
            Network::from_parameters(&[2, 2, 1], vec![vec![vec![0.1, 0.2]]], vec![vec![0.0]], hp());
        assert!(matches!(result, Err(NetworkError::InvalidTopology(_))));
    }

    #[test]
    fn test_with_constant_weights() {
        let network = Network::with_constant_weights(&[2, 2, 1], 0.5, hp()).unwrap();
        for l in 1..network.depth() {
            assert!(network.layer(l).weights().iter().flatten().all(|&w| w == 0.5));
            assert!(network.layer(l).biases().iter().all(|&b| b == 0.0));
        }
    }

    #[test]
    #[should_panic(expected = "the input layer has no incoming weights")]
    fn test_layer_zero_panics() {
        let network = Network::seeded(&[2, 1], hp(), 1).unwrap();
        network.layer(0);
    }
}
