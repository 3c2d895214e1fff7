//! Forward propagation.

use super::Network;
use crate::error::{NetworkError, VectorKind};

impl Network {
    /// Propagate `input` through every layer and return the output layer's activations.
    ///
    /// All stored activations are recomputed, so after the call they are consistent with
    /// `input`. Fails with [`NetworkError::DimensionMismatch`] before touching anything if
    /// `input` does not match the input layer width.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        NetworkError::check_width(VectorKind::Input, self.input_size(), input.len())?;
        self.propagate(input);
        Ok(self.output().to_vec())
    }

    /// Same computation as [`Network::forward`] using scratch buffers, leaving the network
    /// untouched.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        NetworkError::check_width(VectorKind::Input, self.input_size(), input.len())?;

        let activation = self.activation();
        let mut current = input.to_vec();
        for layer in &self.layers {
            let mut next = vec![0.0; layer.output_size()];
            layer.forward(&current, |x| activation.apply(x), &mut next);
            current = next;
        }
        Ok(current)
    }

    /// Output layer activations from the last forward pass.
    pub fn output(&self) -> &[f64] {
        &self.activations[self.activations.len() - 1]
    }

    // Width checks are the caller's job.
    pub(super) fn propagate(&mut self, input: &[f64]) {
        let activation = self.activation();
        self.activations[0].copy_from_slice(input);

        for (l, layer) in self.layers.iter().enumerate() {
            let (below, above) = self.activations.split_at_mut(l + 1);
            layer.forward(&below[l], |x| activation.apply(x), &mut above[0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::network::{Hyperparameters, Network};
    use crate::utils::activations::sigmoid;
    use crate::utils::Activation;

    #[test]
    fn test_forward_fills_every_layer() {
        let hp = Hyperparameters::new(0.1, 0.0, Activation::Sigmoid);
        let mut network = Network::with_constant_weights(&[2, 2, 1], 0.5, hp).unwrap();

        let output = network.forward(&[1.0, 0.0]).unwrap();

        assert_eq!(network.activations(0), &[1.0, 0.0]);
        assert_eq!(network.activations(1), &[sigmoid(0.5), sigmoid(0.5)]);
        assert_eq!(output, network.output());
    }

    #[test]
    fn test_predict_matches_forward() {
        let hp = Hyperparameters::new(0.1, 0.0, Activation::Tanh);
        let mut network = Network::seeded(&[3, 4, 4, 2], hp, 5).unwrap();
        let input = [0.2, -0.7, 0.9];

        let predicted = network.predict(&input).unwrap();
        let forwarded = network.forward(&input).unwrap();
        assert_eq!(predicted, forwarded);
    }

    #[test]
    fn test_relu_output_is_non_negative() {
        let hp = Hyperparameters::new(0.1, 0.0, Activation::Relu);
        let mut network = Network::seeded(&[4, 8, 3], hp, 11).unwrap();
        let output = network.forward(&[0.3, -1.0, 0.5, 2.0]).unwrap();
        assert!(output.iter().all(|&y| y >= 0.0));
    }
}
