//! Backpropagation: delta computation followed by the momentum weight update.

use super::{Hyperparameters, Network};
use crate::error::{NetworkError, VectorKind};
use crate::example::Example;

/// Half the summed squared difference between `desired` and `actual`.
///
/// Fails with [`NetworkError::DimensionMismatch`] if `actual` is not as long as `desired`.
pub fn squared_error(desired: &[f64], actual: &[f64]) -> Result<f64, NetworkError> {
    NetworkError::check_width(VectorKind::Output, desired.len(), actual.len())?;
    let sum: f64 = desired
        .iter()
        .zip(actual)
        .map(|(t, y)| (t - y) * (t - y))
        .sum();
    Ok(0.5 * sum)
}

impl Network {
    /// Train on a single example and return its squared error.
    ///
    /// Runs a forward pass, computes deltas from the output layer down to the first hidden
    /// layer, then updates every weight and bias with learning rate and momentum. The
    /// returned error is measured on the forward pass that preceded the update.
    ///
    /// Fails with [`NetworkError::DimensionMismatch`] before any mutation if either vector
    /// of `example` does not match the network.
    pub fn backward(&mut self, example: &Example) -> Result<f64, NetworkError> {
        self.check_example(example)?;

        self.propagate(example.input());
        self.compute_deltas(example.output());
        self.update_parameters();

        squared_error(example.output(), self.output())
    }

    pub(crate) fn check_example(&self, example: &Example) -> Result<(), NetworkError> {
        NetworkError::check_width(VectorKind::Input, self.input_size(), example.input().len())?;
        NetworkError::check_width(
            VectorKind::Output,
            self.output_size(),
            example.output().len(),
        )
    }

    fn compute_deltas(&mut self, target: &[f64]) {
        let activation = self.activation();

        let last = self.deltas.len() - 1;
        let outputs = &self.activations[self.activations.len() - 1];
        for ((delta, &y), &t) in self.deltas[last].iter_mut().zip(outputs).zip(target) {
            *delta = activation.derivative(y) * (t - y);
        }

        // Layer l reads the finished deltas of layer l + 1, so walk downwards.
        for l in (1..self.layer_sizes.len() - 1).rev() {
            let (lower, upper) = self.deltas.split_at_mut(l);
            let current = &mut lower[l - 1];
            self.layers[l].pull_back(&upper[0], current);
            for (delta, &a) in current.iter_mut().zip(&self.activations[l]) {
                *delta *= activation.derivative(a);
            }
        }
    }

    // Deltas are all computed from the pre-update weights before anything moves.
    fn update_parameters(&mut self) {
        let Hyperparameters {
            learning_rate,
            momentum_factor,
            ..
        } = self.hyperparameters;

        for (l, layer) in self.layers.iter_mut().enumerate() {
            layer.apply_deltas(
                &self.deltas[l],
                &self.activations[l],
                learning_rate,
                momentum_factor,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Activation;

    #[test]
    fn test_squared_error() {
        assert_eq!(squared_error(&[1.0, 0.0], &[0.5, 0.5]), Ok(0.25));
        assert_eq!(squared_error(&[], &[]), Ok(0.0));
    }

    #[test]
    fn test_squared_error_rejects_mismatched_lengths() {
        assert_eq!(
            squared_error(&[1.0, 1.0], &[0.0]),
            Err(NetworkError::DimensionMismatch {
                vector: VectorKind::Output,
                expected: 2,
                actual: 1,
            })
        );
        assert!(squared_error(&[1.0], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_backward_rejects_bad_output_without_mutation() {
        let hp = Hyperparameters::new(0.5, 0.9, Activation::Sigmoid);
        let mut network = Network::seeded(&[2, 3, 2], hp, 3).unwrap();
        let before = network.clone();

        let err = network
            .backward(&Example::new(vec![0.0, 1.0], vec![1.0]))
            .unwrap_err();

        assert_eq!(
            err,
            NetworkError::DimensionMismatch {
                vector: VectorKind::Output,
                expected: 2,
                actual: 1,
            }
        );
        assert_eq!(network, before);
    }

    #[test]
    fn test_backward_fills_deltas_for_every_layer() {
        let hp = Hyperparameters::new(0.5, 0.0, Activation::Sigmoid);
        let mut network = Network::seeded(&[2, 3, 3, 1], hp, 8).unwrap();

        network
            .backward(&Example::new(vec![1.0, 0.0], vec![1.0]))
            .unwrap();

        for l in 1..network.depth() {
            assert!(network.deltas(l).iter().any(|&d| d != 0.0));
        }
    }
}
