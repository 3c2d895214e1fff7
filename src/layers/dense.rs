//! Dense (fully connected) layer implementation
//!
//! A DenseLayer owns the parameters of one transition between two adjacent layers of the
//! network: the weight matrix, the bias vector, and the momentum memory for both.

use crate::error::NetworkError;
use rand::Rng;

/// Half-width of the symmetric range initial weights are drawn from.
pub const WEIGHT_INIT_RANGE: f64 = 1.0;

/// Fully connected transition from `input_size` neurons to `output_size` neurons.
///
/// # Fields
///
/// * `weights` - `weights[j][k]` connects input neuron `k` to output neuron `j`
/// * `biases` - One bias per output neuron
/// * `weight_changes` - Change applied to each weight on the previous update (momentum memory)
/// * `bias_changes` - Change applied to each bias on the previous update
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    input_size: usize,
    output_size: usize,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    weight_changes: Vec<Vec<f64>>,
    bias_changes: Vec<f64>,
}

impl DenseLayer {
    /// Create a new DenseLayer with uniformly random weights.
    ///
    /// Every weight is drawn independently from `[-WEIGHT_INIT_RANGE, WEIGHT_INIT_RANGE)`.
    /// Biases and momentum memory start at zero.
    ///
    /// # Example
    ///
    /// ```
    /// use online_mlp::layers::DenseLayer;
    /// use online_mlp::utils::SimpleRng;
    ///
    /// let mut rng = SimpleRng::new(42);
    /// let layer = DenseLayer::new(3, 2, &mut rng);
    /// assert_eq!(layer.parameter_count(), 3 * 2 + 2);
    /// ```
    pub fn new<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Self {
        let weights = (0..output_size)
            .map(|_| {
                (0..input_size)
                    .map(|_| rng.gen_range(-WEIGHT_INIT_RANGE..WEIGHT_INIT_RANGE))
                    .collect()
            })
            .collect();

        Self {
            input_size,
            output_size,
            weights,
            biases: vec![0.0; output_size],
            weight_changes: vec![vec![0.0; input_size]; output_size],
            bias_changes: vec![0.0; output_size],
        }
    }

    /// Build a layer from known parameters, with empty momentum memory.
    ///
    /// `weights` must be a non-empty rectangular `[output_size][input_size]` matrix and
    /// `biases` must hold one entry per row.
    pub fn from_parts(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Result<Self, NetworkError> {
        let output_size = weights.len();
        let input_size = weights.first().map_or(0, Vec::len);
        if output_size == 0 || input_size == 0 {
            return Err(NetworkError::InvalidTopology(
                "a layer needs at least one input and one output neuron".to_string(),
            ));
        }
        if let Some(row) = weights.iter().position(|row| row.len() != input_size) {
            return Err(NetworkError::InvalidTopology(format!(
                "weight row {} has {} entries, expected {}",
                row,
                weights[row].len(),
                input_size
            )));
        }
        if biases.len() != output_size {
            return Err(NetworkError::InvalidTopology(format!(
                "{} biases supplied for {} neurons",
                biases.len(),
                output_size
            )));
        }

        Ok(Self {
            input_size,
            output_size,
            weights,
            biases,
            weight_changes: vec![vec![0.0; input_size]; output_size],
            bias_changes: vec![0.0; output_size],
        })
    }

    /// Get the input size of the layer.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the output size of the layer.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Get the number of trainable parameters (weights plus biases).
    pub fn parameter_count(&self) -> usize {
        self.input_size * self.output_size + self.output_size
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Weight changes stored by the last update, reapplied as momentum on the next one.
    pub fn weight_changes(&self) -> &[Vec<f64>] {
        &self.weight_changes
    }

    pub fn bias_changes(&self) -> &[f64] {
        &self.bias_changes
    }

    /// Compute `output[j] = f(bias[j] + sum_k input[k] * weights[j][k])`.
    ///
    /// Callers guarantee `input.len() == input_size` and `output.len() == output_size`.
    pub(crate) fn forward<F>(&self, input: &[f64], activation: F, output: &mut [f64])
    where
        F: Fn(f64) -> f64,
    {
        debug_assert_eq!(input.len(), self.input_size);
        debug_assert_eq!(output.len(), self.output_size);

        for ((out, row), bias) in output.iter_mut().zip(&self.weights).zip(&self.biases) {
            let sum = row
                .iter()
                .zip(input)
                .fold(*bias, |acc, (weight, value)| acc + weight * value);
            *out = activation(sum);
        }
    }

    /// Pull deltas of this layer's outputs back onto its inputs.
    ///
    /// Writes `pulled[k] = sum_j deltas[j] * weights[j][k]`, before any activation
    /// derivative is applied.
    pub(crate) fn pull_back(&self, deltas: &[f64], pulled: &mut [f64]) {
        debug_assert_eq!(deltas.len(), self.output_size);
        debug_assert_eq!(pulled.len(), self.input_size);

        pulled.iter_mut().for_each(|value| *value = 0.0);
        for (delta, row) in deltas.iter().zip(&self.weights) {
            for (value, weight) in pulled.iter_mut().zip(row) {
                *value += delta * weight;
            }
        }
    }

    /// Apply the delta rule with momentum to every parameter.
    ///
    /// For each weight, `change = deltas[j] * inputs[k]`, the weight moves by
    /// `learning_rate * change + momentum_factor * previous_change`, and only then is
    /// `change` stored as the new previous change. Biases see a constant input of 1.
    pub(crate) fn apply_deltas(
        &mut self,
        deltas: &[f64],
        inputs: &[f64],
        learning_rate: f64,
        momentum_factor: f64,
    ) {
        debug_assert_eq!(deltas.len(), self.output_size);
        debug_assert_eq!(inputs.len(), self.input_size);

        let rows = self.weights.iter_mut().zip(self.weight_changes.iter_mut());
        for ((row, changes), &delta) in rows.zip(deltas) {
            for ((weight, previous), &input) in row.iter_mut().zip(changes.iter_mut()).zip(inputs) {
                let change = delta * input;
                *weight += learning_rate * change + momentum_factor * *previous;
                *previous = change;
            }
        }

        let biases = self.biases.iter_mut().zip(self.bias_changes.iter_mut());
        for ((bias, previous), &delta) in biases.zip(deltas) {
            *bias += learning_rate * delta + momentum_factor * *previous;
            *previous = delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SimpleRng;

    #[test]
    fn test_dense_layer_creation() {
        let mut rng = SimpleRng::new(42);
        let layer = DenseLayer::new(10, 5, &mut rng);

        assert_eq!(layer.input_size(), 10);
        assert_eq!(layer.output_size(), 5);
        assert_eq!(layer.weights.len(), 5);
        assert!(layer.weights.iter().all(|row| row.len() == 10));
        assert_eq!(layer.biases.len(), 5);
        assert_eq!(layer.parameter_count(), 55);
    }

    #[test]
    fn test_initialization_range() {
        let mut rng = SimpleRng::new(42);
        let layer = DenseLayer::new(100, 50, &mut rng);

        for &weight in layer.weights.iter().flatten() {
            assert!(
                (-WEIGHT_INIT_RANGE..WEIGHT_INIT_RANGE).contains(&weight),
                "Weight {} outside initialization range",
                weight
            );
        }
        assert!(layer.biases.iter().all(|&b| b == 0.0));
        assert!(layer.weight_changes.iter().flatten().all(|&c| c == 0.0));
    }

    #[test]
    fn test_deterministic_initialization() {
        let layer1 = DenseLayer::new(10, 5, &mut SimpleRng::new(42));
        let layer2 = DenseLayer::new(10, 5, &mut SimpleRng::new(42));
        assert_eq!(layer1, layer2);
    }

    #[test]
    fn test_from_parts_rejects_ragged_rows() {
        let result = DenseLayer::from_parts(vec![vec![1.0, 2.0], vec![3.0]], vec![0.0, 0.0]);
        assert!(matches!(result, Err(NetworkError::InvalidTopology(_))));
    }

    #[test]
    fn test_from_parts_rejects_bias_count() {
        let result = DenseLayer::from_parts(vec![vec![1.0, 2.0]], vec![0.0, 0.0]);
        assert!(matches!(result, Err(NetworkError::InvalidTopology(_))));
    }

    #[test]
    fn test_forward_identity_activation() {
        let layer =
            DenseLayer::from_parts(vec![vec![1.0, 2.0], vec![-1.0, 0.5]], vec![0.5, 0.0]).unwrap();
        let mut output = [0.0; 2];
        layer.forward(&[1.0, 2.0], |x| x, &mut output);
        assert_eq!(output, [5.5, 0.0]);
    }

    #[test]
    fn test_pull_back_transposes() {
        let layer =
            DenseLayer::from_parts(vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![0.0, 0.0]).unwrap();
        let mut pulled = [9.0; 2];
        layer.pull_back(&[1.0, 0.5], &mut pulled);
        assert_eq!(pulled, [2.5, 4.0]);
    }

    #[test]
    fn test_apply_deltas_stores_change_after_update() {
        let mut layer = DenseLayer::from_parts(vec![vec![0.0]], vec![0.0]).unwrap();

        layer.apply_deltas(&[1.0], &[2.0], 0.1, 0.5);
        assert!((layer.weights[0][0] - 0.2).abs() < 1e-12);
        assert_eq!(layer.weight_changes[0][0], 2.0);

        // Second step reuses the stored change once, then overwrites it.
        layer.apply_deltas(&[1.0], &[2.0], 0.1, 0.5);
        assert!((layer.weights[0][0] - (0.2 + 0.2 + 1.0)).abs() < 1e-12);
        assert_eq!(layer.weight_changes[0][0], 2.0);
        assert!((layer.biases[0] - (0.1 + 0.1 + 0.5)).abs() < 1e-12);
    }
}
